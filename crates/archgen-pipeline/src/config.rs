//! Pipeline configuration.

use std::path::PathBuf;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{PipelineError, Result};

/// Default scratch directory; the only writable path in the Lambda sandbox.
pub const DEFAULT_SCRATCH_DIR: &str = "/tmp";

/// Configuration of the pipeline steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct PipelineConfig {
    /// Path to the supplementary prompt merged into the task instruction
    #[cfg_attr(feature = "config", arg(long = "prompt-path", env = "PROMPT_PATH"))]
    pub prompt_path: PathBuf,

    /// Bucket receiving the generated templates
    #[cfg_attr(feature = "config", arg(long = "output-bucket", env = "OUTPUT_BUCKET"))]
    pub output_bucket: String,

    /// Local directory for scratch files
    #[cfg_attr(
        feature = "config",
        arg(long = "scratch-dir", env = "SCRATCH_DIR", default_value = DEFAULT_SCRATCH_DIR)
    )]
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SCRATCH_DIR)
}

impl PipelineConfig {
    /// Creates a configuration using the default scratch directory.
    pub fn new(prompt_path: impl Into<PathBuf>, output_bucket: impl Into<String>) -> Self {
        Self {
            prompt_path: prompt_path.into(),
            output_bucket: output_bucket.into(),
            scratch_dir: default_scratch_dir(),
        }
    }

    /// Overrides the scratch directory.
    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.output_bucket.trim().is_empty() {
            return Err(PipelineError::Config("output bucket must not be empty".into()));
        }
        if self.prompt_path.as_os_str().is_empty() {
            return Err(PipelineError::Config("prompt path must not be empty".into()));
        }
        Ok(())
    }
}
