//! Object-storage bucket for CVs, job descriptions and other uploads.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Upload/lookup wrapper over one S3-compatible bucket with public read access.
#[derive(Clone)]
pub struct BucketStorage {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl BucketStorage {
    pub fn new(client: S3Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Public URL an object of this bucket is served from.
    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    /// Stores `data` under `key`, overwriting any existing object, and returns its public URL.
    pub async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .cache_control("max-age=3600")
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Upload of {key} failed: {e}")))?;

        info!("Uploaded s3://{}/{}", self.bucket, key);
        Ok(self.url_for(key))
    }

    /// Public URL of `key` when the object exists.
    pub async fn public_url(&self, key: &str) -> Result<Option<String>, AppError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(Some(self.url_for(key))),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_not_found())
                    .unwrap_or(false);
                if not_found {
                    Ok(None)
                } else {
                    Err(AppError::Storage(format!("Lookup of {key} failed: {e}")))
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn test_bucket() -> BucketStorage {
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "test"))
        .endpoint_url("http://127.0.0.1:9")
        .force_path_style(true)
        .build();
    BucketStorage::new(
        S3Client::from_conf(config),
        "agency".to_string(),
        "http://cdn.test/agency/".to_string(),
    )
}
