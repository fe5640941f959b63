//! Local content directory: template source and rendered-document sink.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::errors::AppError;

#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn read_template(&self, name: &str) -> Result<String, AppError>;
}

#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn write_document(&self, name: &str, text: &str) -> Result<(), AppError>;
}

/// A flat directory holding templates and rendered documents side by side.
#[derive(Debug, Clone)]
pub struct ContentDir {
    root: PathBuf,
}

impl ContentDir {
    /// Opens `root`, creating it when absent.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Resolves a bare file name inside the directory.
    fn resolve(&self, name: &str) -> Result<PathBuf, AppError> {
        let is_bare = !name.is_empty()
            && !name.contains(|c: char| c == '/' || c == '\\')
            && name != "."
            && name != "..";
        if !is_bare {
            return Err(AppError::Validation(format!("'{name}' is not a valid file name")));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl TemplateSource for ContentDir {
    async fn read_template(&self, name: &str) -> Result<String, AppError> {
        let path = self.resolve(name)?;
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("Template {name} not found")))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl DocumentSink for ContentDir {
    async fn write_document(&self, name: &str, text: &str) -> Result<(), AppError> {
        let path = self.resolve(name)?;
        fs::write(&path, text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentDir::open(dir.path()).await.unwrap();
        content.write_document("Inv_Acme_41.html", "<p>hi</p>").await.unwrap();
        assert_eq!(
            content.read_template("Inv_Acme_41.html").await.unwrap(),
            "<p>hi</p>"
        );
    }

    #[tokio::test]
    async fn test_missing_template_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentDir::open(dir.path()).await.unwrap();
        let err = content.read_template("invoice_template.html").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_path_escapes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentDir::open(dir.path()).await.unwrap();
        for name in ["../secrets", "a/b.html", "..", ""] {
            assert!(matches!(
                content.write_document(name, "x").await,
                Err(AppError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_open_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("content");
        ContentDir::open(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
