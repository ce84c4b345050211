//! S3 object store

use super::{ObjectStore, StorageError};
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;

/// [`ObjectStore`] backed by Amazon S3
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        tracing::info!(
            region = ?sdk_config.region().map(|r| r.to_string()),
            "S3 client configured"
        );

        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn name(&self) -> &str {
        "s3"
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Get(DisplayErrorContext(e).to_string()))?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?;

        Ok(body.into_bytes().to_vec())
    }
}
