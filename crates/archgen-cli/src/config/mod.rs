//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── bedrock: BedrockConfig      # Bedrock region, model id
//! ├── pipeline: PipelineConfig    # Prompt file, output bucket, scratch dir
//! ├── s3: S3Config                # Endpoint and region overrides
//! └── telemetry: TelemetryConfig  # Log format
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod provider;
mod telemetry;

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use archgen_aws::BedrockConfig;
use archgen_object::providers::S3Config;
use archgen_pipeline::PipelineConfig;
use clap::Parser;
pub use provider::create_pipeline;
use serde::{Deserialize, Serialize};
pub use telemetry::{LogFormat, TelemetryConfig};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "archgen")]
#[command(about = "Turns architecture diagrams into CloudFormation templates")]
#[command(version)]
pub struct Cli {
    /// Vision model configuration.
    #[clap(flatten)]
    pub bedrock: BedrockConfig,

    /// Pipeline configuration.
    #[clap(flatten)]
    pub pipeline: PipelineConfig,

    /// Object storage overrides.
    #[clap(flatten)]
    pub s3: S3Config,

    /// Log output configuration.
    #[clap(flatten)]
    pub telemetry: TelemetryConfig,

    /// Process one S3 notification read from this file and exit
    #[arg(long = "event-file")]
    pub event_file: Option<PathBuf>,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.bedrock
            .validate()
            .context("invalid Bedrock configuration")?;
        self.pipeline
            .validate()
            .context("invalid pipeline configuration")?;
        self.s3.validate().context("invalid S3 configuration")?;
        Ok(())
    }

    /// Logs configuration (no credentials are part of it).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            bedrock_region = %self.bedrock.bedrock_region,
            model_id = %self.bedrock.model_id,
            prompt_path = %self.pipeline.prompt_path.display(),
            output_bucket = %self.pipeline.output_bucket,
            scratch_dir = %self.pipeline.scratch_dir.display(),
            s3_endpoint = ?self.s3.s3_endpoint,
            log_format = ?self.telemetry.log_format,
            one_shot = self.event_file.is_some(),
            "Pipeline configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
