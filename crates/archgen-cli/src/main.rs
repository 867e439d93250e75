#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod runtime;
mod telemetry;

use std::process;

use anyhow::Context;

use crate::config::{Cli, create_pipeline};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "archgen_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "archgen_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "archgen_cli::config";
pub const TRACING_TARGET_RUNTIME: &str = "archgen_cli::runtime";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing(cli.telemetry.log_format)?;
    cli.log();
    cli.validate()?;

    let pipeline = create_pipeline(&cli)
        .await
        .context("failed to create pipeline")?;

    match &cli.event_file {
        Some(path) => {
            let response = runtime::run_once(&pipeline, path).await?;
            tracing::info!(
                target: TRACING_TARGET_RUNTIME,
                status_code = response.status_code,
                "Event file processed"
            );
            Ok(())
        }
        None => runtime::serve(pipeline).await,
    }
}
