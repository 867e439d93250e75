//! Downloaded object returned by [`ObjectStoreClient::get`](super::ObjectStoreClient::get).

use bytes::Bytes;
use object_store::ObjectMeta;

/// Body and metadata of one downloaded object.
#[derive(Debug)]
pub struct GetOutput {
    /// Full object body.
    pub data: Bytes,
    /// `Content-Type` stored with the object, when the backend keeps one.
    pub content_type: Option<String>,
    /// Location, size, etag and modification time.
    pub meta: ObjectMeta,
}

impl GetOutput {
    /// Number of body bytes received.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for a zero-byte object.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
