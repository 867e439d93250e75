#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod client;
mod error;
/// Bucket resolution for S3 and in-memory stores.
pub mod providers;

#[doc(hidden)]
pub mod prelude;

pub use error::Error;

/// Tracing target for object storage operations.
pub const TRACING_TARGET: &str = "archgen_object";
