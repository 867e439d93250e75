//! Convenience re-exports.

pub use crate::Error;
pub use crate::client::{GetOutput, ObjectStoreClient, PutOutput};
pub use crate::providers::{Buckets, MemoryBuckets, S3Buckets, S3Config};
