//! Downloads the uploaded diagram into scratch space.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use archgen_object::providers::Buckets;

use crate::{PipelineError, Result};

const TRACING_TARGET: &str = "archgen_pipeline::fetcher";

/// Copies trigger objects from their source bucket to a local file.
#[derive(Clone)]
pub struct Fetcher {
    buckets: Arc<dyn Buckets>,
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("buckets", &self.buckets.id())
            .finish()
    }
}

impl Fetcher {
    /// Creates a fetcher resolving source buckets through `buckets`.
    pub fn new(buckets: Arc<dyn Buckets>) -> Self {
        Self { buckets }
    }

    /// Downloads `bucket/key` to `destination`.
    ///
    /// Returns the destination path. An existing file is overwritten.
    #[tracing::instrument(name = "pipeline.fetch", skip(self, destination))]
    pub async fn fetch(&self, bucket: &str, key: &str, destination: &Path) -> Result<PathBuf> {
        tracing::info!(
            target: TRACING_TARGET,
            bucket = %bucket,
            key = %key,
            "Fetching diagram"
        );

        let client = self
            .buckets
            .bucket(bucket)
            .map_err(|e| PipelineError::storage_access("cannot open source bucket", e))?;

        let object = client.get(key).await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                bucket = %bucket,
                key = %key,
                error = %e,
                "Failed to download diagram"
            );
            PipelineError::storage_access("cannot download diagram", e)
        })?;

        if object.is_empty() {
            tracing::warn!(
                target: TRACING_TARGET,
                key = %key,
                "Diagram object is empty"
            );
        }

        tokio::fs::write(destination, &object.data)
            .await
            .map_err(|e| PipelineError::scratch(destination, e))?;

        tracing::info!(
            target: TRACING_TARGET,
            key = %key,
            size = object.len(),
            path = %destination.display(),
            "Diagram downloaded"
        );

        Ok(destination.to_path_buf())
    }
}
