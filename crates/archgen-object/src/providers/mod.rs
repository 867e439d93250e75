//! Bucket resolution for object storage providers.

mod memory;
mod s3;

pub use memory::MemoryBuckets;
pub use s3::{S3Buckets, S3Config};

use crate::Error;
use crate::client::ObjectStoreClient;

/// Resolves a bucket name to a client bound to that bucket.
///
/// Trigger events name their own source bucket, so clients cannot all be
/// built up front; implementations build (or look up) one per bucket name.
pub trait Buckets: Send + Sync + 'static {
    /// Unique identifier (e.g. "s3", "memory").
    fn id(&self) -> &'static str;

    /// Returns a client bound to `name`.
    fn bucket(&self, name: &str) -> Result<ObjectStoreClient, Error>;
}
