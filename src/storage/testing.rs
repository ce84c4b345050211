//! In-memory object store for tests

use super::{ObjectStore, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: HashMap<(String, String), Vec<u8>>,
    requests: Mutex<Vec<(String, String)>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, bucket: &str, key: &str, body: &[u8]) -> Self {
        self.objects
            .insert((bucket.to_string(), key.to_string()), body.to_vec());
        self
    }

    /// Every (bucket, key) asked for, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let id = (bucket.to_string(), key.to_string());
        self.requests.lock().unwrap().push(id.clone());
        self.objects
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::Get(format!("NoSuchKey: {}/{}", bucket, key)))
    }
}
