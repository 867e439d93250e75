//! Log output configuration.

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// Shape of emitted log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines with ANSI colors.
    Text,
    /// One JSON object per line, as expected by CloudWatch Logs Insights.
    #[default]
    Json,
}

/// Telemetry configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long = "log-format", env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    #[serde(default)]
    pub log_format: LogFormat,
}
