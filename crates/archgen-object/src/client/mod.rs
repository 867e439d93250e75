//! Unified object-store client backed by [`object_store::ObjectStore`].
//!
//! [`ObjectStoreClient`] is a thin, cloneable wrapper around
//! `Arc<dyn ObjectStore>` scoped to a single bucket. Every public method is
//! instrumented with [`tracing`] for observability.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use object_store::path::Path;
use object_store::{ObjectStore, PutOptions, PutPayload};

use crate::Error;

mod get_output;
mod put_output;

pub use get_output::GetOutput;
pub use put_output::PutOutput;

/// Cloneable handle to one bucket of an [`ObjectStore`] backend.
///
/// All methods accept human-readable string keys and convert them to
/// [`object_store::path::Path`] internally.
#[derive(Clone)]
pub struct ObjectStoreClient {
    bucket: Arc<str>,
    store: Arc<dyn ObjectStore>,
}

impl fmt::Debug for ObjectStoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStoreClient")
            .field("bucket", &self.bucket)
            .field("store", &self.store.to_string())
            .finish()
    }
}

impl ObjectStoreClient {
    /// Wrap a concrete [`ObjectStore`] implementation serving `bucket`.
    pub fn new(bucket: impl Into<Arc<str>>, store: impl ObjectStore) -> Self {
        Self {
            bucket: bucket.into(),
            store: Arc::new(store),
        }
    }

    /// Returns the bucket this client is bound to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Verify that the backing store is reachable.
    ///
    /// Issues a HEAD for a sentinel key: a not-found response is treated as
    /// success (the bucket exists), any other error is propagated.
    #[tracing::instrument(name = "object.verify", skip(self), fields(bucket = %self.bucket))]
    pub async fn verify_reachable(&self) -> Result<(), Error> {
        let path = Path::from("_archgen_verify_reachable");
        match self.store.head(&path).await {
            Ok(_) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(from_object_store(e)),
        }
    }

    /// Retrieve the raw bytes, content-type, and metadata stored at `key`.
    #[tracing::instrument(name = "object.get", skip(self), fields(bucket = %self.bucket))]
    pub async fn get(&self, key: &str) -> Result<GetOutput, Error> {
        let path = object_path(key)?;
        let result = self.store.get(&path).await.map_err(from_object_store)?;
        let meta = result.meta.clone();
        let content_type = result
            .attributes
            .get(&object_store::Attribute::ContentType)
            .map(|v| v.to_string());
        let data = result.bytes().await.map_err(from_object_store)?;
        Ok(GetOutput {
            data,
            content_type,
            meta,
        })
    }

    /// Upload `data` to `key`, overwriting any existing object and optionally
    /// setting the content-type.
    #[tracing::instrument(
        name = "object.put",
        skip(self, data),
        fields(bucket = %self.bucket, size = data.len())
    )]
    pub async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<PutOutput, Error> {
        let path = object_path(key)?;
        let payload = PutPayload::from(data);
        let mut opts = PutOptions::default();
        if let Some(ct) = content_type {
            opts.attributes
                .insert(object_store::Attribute::ContentType, ct.to_string().into());
        }
        let result = self
            .store
            .put_opts(&path, payload, opts)
            .await
            .map_err(from_object_store)?;
        Ok(result.into())
    }
}

/// Uses `key` verbatim as the object location.
///
/// `Path::from` would percent-encode characters such as `[`, `~` and `%`,
/// which the S3 backend then encodes a second time.
fn object_path(key: &str) -> Result<Path, Error> {
    Path::parse(key).map_err(|e| {
        Error::runtime(format!("invalid object key '{key}': {e}"), "object-store", false)
            .with_source(e)
    })
}

/// Convert an [`object_store::Error`] into a crate [`Error`].
fn from_object_store(err: object_store::Error) -> Error {
    let not_found = matches!(err, object_store::Error::NotFound { .. });
    let retryable = !matches!(
        err,
        object_store::Error::NotFound { .. }
            | object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. }
            | object_store::Error::AlreadyExists { .. }
            | object_store::Error::Precondition { .. }
    );
    let error = Error::runtime(err.to_string(), "object-store", retryable).with_source(err);
    if not_found { error.missing() } else { error }
}

#[cfg(test)]
mod tests {
    use object_store::memory::InMemory;

    use super::*;

    fn test_client() -> ObjectStoreClient {
        ObjectStoreClient::new("bucket-test", InMemory::new())
    }

    #[tokio::test]
    async fn put_and_get() {
        let client = test_client();
        let data = Bytes::from("Resources: {}");
        client
            .put("20240101000000.yaml", data.clone(), Some("application/x-yaml"))
            .await
            .unwrap();

        let result = client.get("20240101000000.yaml").await.unwrap();
        assert_eq!(result.data, data);
        assert_eq!(result.content_type.as_deref(), Some("application/x-yaml"));
    }

    #[tokio::test]
    async fn get_returns_meta() {
        let client = test_client();
        client
            .put("diagram.png", Bytes::from("abc"), None)
            .await
            .unwrap();

        let result = client.get("diagram.png").await.unwrap();
        assert_eq!(result.len(), 3);
        assert!(!result.is_empty());
        assert_eq!(result.meta.size, 3);
        assert_eq!(result.meta.location.as_ref(), "diagram.png");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let client = test_client();
        let err = client.get("missing.png").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn put_overwrites() {
        let client = test_client();
        client.put("same.yaml", Bytes::from("first"), None).await.unwrap();
        client.put("same.yaml", Bytes::from("second"), None).await.unwrap();

        let result = client.get("same.yaml").await.unwrap();
        assert_eq!(result.data, Bytes::from("second"));
    }

    #[test]
    fn object_path_keeps_reserved_characters() {
        for key in ["diagram[v2].png", "a~b.png", "50%.png", "my diagram.png"] {
            assert_eq!(object_path(key).unwrap().as_ref(), key);
        }
    }

    #[test]
    fn object_path_rejects_empty_segments() {
        let err = object_path("dir//diagram.png").unwrap_err();
        assert!(!err.is_retryable());
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn reserved_characters_round_trip() {
        let client = test_client();
        client
            .put("diagram[v2] 50%~.png", Bytes::from("png"), None)
            .await
            .unwrap();

        let result = client.get("diagram[v2] 50%~.png").await.unwrap();
        assert_eq!(result.meta.location.as_ref(), "diagram[v2] 50%~.png");
    }

    #[tokio::test]
    async fn verify_reachable() {
        let client = test_client();
        client.verify_reachable().await.unwrap();
        assert_eq!(client.bucket(), "bucket-test");
    }
}
