//! Stored Document Retrieval
//!
//! Every telemetry row carries `bucket_region`, `bucket_name` and `key` fields
//! pointing at the uploaded document. This module fetches that document:
//!
//! - **Store**: the [`ObjectStore`] seam and its S3 implementation
//! - **Regions**: [`ObjectStores`] holds one store per bucket region

mod s3;

#[cfg(test)]
pub(crate) mod testing;

pub use s3::S3ObjectStore;

use crate::params::{BucketRegion, ObjectLocation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// A blob store able to return an object's bytes
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Read the whole object at `bucket` / `key`
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;
}

/// Errors reported by an object store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("failed to get object: {0}")]
    Get(String),

    #[error("failed to read object body: {0}")]
    Read(String),
}

/// One object store per bucket region
#[derive(Clone)]
pub struct ObjectStores {
    us_east_1: Arc<dyn ObjectStore>,
    us_west_1: Arc<dyn ObjectStore>,
}

impl ObjectStores {
    pub fn new(us_east_1: Arc<dyn ObjectStore>, us_west_1: Arc<dyn ObjectStore>) -> Self {
        Self {
            us_east_1,
            us_west_1,
        }
    }

    pub fn for_region(&self, region: BucketRegion) -> &Arc<dyn ObjectStore> {
        match region {
            BucketRegion::UsEast1 => &self.us_east_1,
            BucketRegion::UsWest1 => &self.us_west_1,
        }
    }

    /// Fetch a document as text (invalid UTF-8 is replaced)
    pub async fn fetch(&self, location: &ObjectLocation) -> Result<String, StorageError> {
        let store = self.for_region(location.region);
        let bytes = store
            .get_object(&location.bucket_name, &location.object_key)
            .await?;

        tracing::debug!(
            store = store.name(),
            region = %location.region,
            bucket = %location.bucket_name,
            key = %location.object_key,
            bytes = bytes.len(),
            "Fetched stored object"
        );

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::testing::InMemoryObjectStore;
    use super::*;

    fn location(region: BucketRegion) -> ObjectLocation {
        ObjectLocation {
            region,
            bucket_name: "drp-cloudconnector".to_string(),
            object_key: "CZ056A/SG4491P001/usage.xml".to_string(),
        }
    }

    #[tokio::test]
    async fn test_region_selects_store() {
        let east = Arc::new(InMemoryObjectStore::new().with_object(
            "drp-cloudconnector",
            "CZ056A/SG4491P001/usage.xml",
            b"<east/>",
        ));
        let west = Arc::new(InMemoryObjectStore::new().with_object(
            "drp-cloudconnector",
            "CZ056A/SG4491P001/usage.xml",
            b"<west/>",
        ));
        let stores = ObjectStores::new(east.clone(), west.clone());

        assert_eq!(stores.fetch(&location(BucketRegion::UsEast1)).await.unwrap(), "<east/>");
        assert_eq!(stores.fetch(&location(BucketRegion::UsWest1)).await.unwrap(), "<west/>");
        assert_eq!(east.requests().len(), 1);
        assert_eq!(west.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_object_propagates() {
        let store = Arc::new(InMemoryObjectStore::new());
        let stores = ObjectStores::new(store.clone(), store);

        let err = stores.fetch(&location(BucketRegion::UsEast1)).await.unwrap_err();
        assert!(matches!(err, StorageError::Get(_)));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let store = Arc::new(InMemoryObjectStore::new().with_object(
            "drp-cloudconnector",
            "CZ056A/SG4491P001/usage.xml",
            &[b'o', b'k', 0xff],
        ));
        let stores = ObjectStores::new(store.clone(), store);

        let text = stores.fetch(&location(BucketRegion::UsEast1)).await.unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.contains('\u{FFFD}'));
    }
}
