//! Uploads finished templates to the output bucket.

use std::path::PathBuf;
use std::sync::Arc;

use archgen_object::prelude::{Buckets, PutOutput};
use bytes::Bytes;

use crate::{ArtifactName, PipelineError, Result};

const TRACING_TARGET: &str = "archgen_pipeline::publisher";

/// Content type set on published templates.
pub const TEMPLATE_CONTENT_TYPE: &str = "application/x-yaml";

/// Stages a template in scratch space and uploads it under its artifact name.
#[derive(Clone)]
pub struct Publisher {
    buckets: Arc<dyn Buckets>,
    output_bucket: String,
    scratch_dir: PathBuf,
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("buckets", &self.buckets.id())
            .field("output_bucket", &self.output_bucket)
            .field("scratch_dir", &self.scratch_dir)
            .finish()
    }
}

impl Publisher {
    /// Creates a publisher writing to `output_bucket`.
    pub fn new(
        buckets: Arc<dyn Buckets>,
        output_bucket: impl Into<String>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            buckets,
            output_bucket: output_bucket.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Writes `body` to `<scratch_dir>/<name>` and uploads that file as `<name>`.
    #[tracing::instrument(
        name = "pipeline.publish",
        skip(self, body),
        fields(bucket = %self.output_bucket, key = %name)
    )]
    pub async fn publish(&self, name: &ArtifactName, body: &str) -> Result<PutOutput> {
        let path = self.scratch_dir.join(name.as_str());

        tokio::fs::write(&path, body)
            .await
            .map_err(|e| PipelineError::scratch(&path, e))?;

        let staged = tokio::fs::read(&path)
            .await
            .map_err(|e| PipelineError::scratch(&path, e))?;

        let client = self
            .buckets
            .bucket(&self.output_bucket)
            .map_err(|e| PipelineError::storage_access("cannot open output bucket", e))?;

        let size = staged.len();
        let output = client
            .put(name.as_str(), Bytes::from(staged), Some(TEMPLATE_CONTENT_TYPE))
            .await
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    bucket = %self.output_bucket,
                    key = %name,
                    error = %e,
                    "Failed to upload template"
                );
                PipelineError::storage_access("cannot upload template", e)
            })?;

        tracing::info!(
            target: TRACING_TARGET,
            bucket = %self.output_bucket,
            key = %name,
            size,
            "Template published"
        );

        Ok(output)
    }
}
