use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::Provider;

/// Application configuration loaded from environment variables.
/// Built once in `main` and shared through `AppState`; nothing reads the
/// environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub s3_public_url: String,
    pub s3_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub llm: LlmConfig,
    pub content_dir: PathBuf,
    pub brand_logo: String,
    pub invoice_title: String,
    pub port: u16,
    pub rust_log: String,
}

/// Provider selection plus the credentials of the selected backend.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    pub api_key: String,
    /// OpenAI organization or Grok team id, sent as an extra header when set.
    pub account_id: Option<String>,
    pub model: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_endpoint = require_env("S3_ENDPOINT")?;
        let s3_bucket = require_env("S3_BUCKET")?;
        let s3_public_url = optional_env("S3_PUBLIC_URL")
            .unwrap_or_else(|| format!("{}/{}", s3_endpoint.trim_end_matches('/'), s3_bucket));

        let content_dir = PathBuf::from(optional_env("CONTENT_DIR").unwrap_or_else(|| "content".to_string()));
        let brand_logo = optional_env("BRAND_LOGO")
            .unwrap_or_else(|| content_dir.join("brand_logo.jpg").to_string_lossy().into_owned());

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket,
            s3_endpoint,
            s3_public_url,
            s3_region: optional_env("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            llm: LlmConfig::from_env()?,
            content_dir,
            brand_logo,
            invoice_title: optional_env("INVOICE_TITLE")
                .unwrap_or_else(|| "Technology Services".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl LlmConfig {
    fn from_env() -> Result<Self> {
        let provider: Provider = optional_env("LLM_PROVIDER")
            .unwrap_or_else(|| "openai".to_string())
            .parse()?;

        // Only the selected backend's key is mandatory.
        let (api_key, account_id) = match provider {
            Provider::OpenAi => (require_env("OPENAI_API_KEY")?, optional_env("OPENAI_ORG")),
            Provider::Anthropic => (require_env("ANTHROPIC_API_KEY")?, None),
            Provider::Grok => (require_env("GROK_API_KEY")?, optional_env("GROK_TEAM_ID")),
        };

        Ok(LlmConfig {
            provider,
            api_key,
            account_id,
            model: optional_env("LLM_MODEL"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
