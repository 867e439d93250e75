//! In-memory buckets for tests and local dry runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use object_store::memory::InMemory;

use super::Buckets;
use crate::Error;
use crate::client::ObjectStoreClient;

/// Buckets kept in process memory, created on first use.
///
/// Clones share the same buckets.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuckets {
    buckets: Arc<Mutex<HashMap<String, ObjectStoreClient>>>,
}

impl MemoryBuckets {
    /// Creates an empty set of buckets.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Buckets for MemoryBuckets {
    fn id(&self) -> &'static str {
        "memory"
    }

    fn bucket(&self, name: &str) -> Result<ObjectStoreClient, Error> {
        let mut buckets = self
            .buckets
            .lock()
            .map_err(|e| Error::runtime(e.to_string(), self.id(), false))?;

        let client = buckets
            .entry(name.to_owned())
            .or_insert_with(|| ObjectStoreClient::new(name, InMemory::new()));

        Ok(client.clone())
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[tokio::test]
    async fn buckets_are_shared_between_lookups() {
        let buckets = MemoryBuckets::new();
        buckets
            .bucket("bucket-in")
            .unwrap()
            .put("diagram1.png", Bytes::from_static(b"png"), None)
            .await
            .unwrap();

        let again = buckets.clone().bucket("bucket-in").unwrap();
        assert_eq!(again.get("diagram1.png").await.unwrap().data.as_ref(), b"png");
    }

    #[tokio::test]
    async fn buckets_are_isolated() {
        let buckets = MemoryBuckets::new();
        buckets
            .bucket("bucket-in")
            .unwrap()
            .put("diagram1.png", Bytes::from_static(b"png"), None)
            .await
            .unwrap();

        let other = buckets.bucket("bucket-out").unwrap();
        assert!(other.get("diagram1.png").await.unwrap_err().is_not_found());
    }
}
