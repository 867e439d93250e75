//! Construction of the pipeline and its clients.

use std::sync::Arc;

use anyhow::Context;
use archgen_aws::{BedrockProvider, CloudFormationProvider, load_sdk_config};
use archgen_core::{Result as ServiceResult, ServiceHealth, ValidatorService, VlmService};
use archgen_object::providers::{Buckets, S3Buckets};
use archgen_pipeline::Pipeline;

use super::Cli;
use crate::TRACING_TARGET_STARTUP;

/// Creates every client and wires them into a [`Pipeline`].
///
/// # Errors
///
/// Returns an error if a client cannot be configured.
pub async fn create_pipeline(cli: &Cli) -> anyhow::Result<Pipeline> {
    let vlm = BedrockProvider::from_config(&cli.bedrock)
        .await
        .context("failed to create Bedrock client")?;
    let vlm = VlmService::new(vlm);

    let sdk_config = load_sdk_config(None).await;
    let validator = ValidatorService::new(CloudFormationProvider::new(&sdk_config));

    log_service_health("bedrock", vlm.health_check().await);
    log_service_health("cloudformation", validator.health_check().await);

    let buckets: Arc<dyn Buckets> = Arc::new(S3Buckets::new(cli.s3.clone()));
    check_output_bucket(buckets.as_ref(), &cli.pipeline.output_bucket).await;

    Ok(Pipeline::new(cli.pipeline.clone(), buckets, vlm, validator))
}

/// Logs a provider health report; never fails startup.
fn log_service_health(service: &str, health: ServiceResult<ServiceHealth>) {
    match health {
        Ok(health) if health.is_healthy() => tracing::info!(
            target: TRACING_TARGET_STARTUP,
            service,
            response_ms = health.response.map(|d| d.as_millis() as u64),
            "Service healthy"
        ),
        Ok(health) => tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            service,
            status = ?health.status,
            message = health.message.as_deref().unwrap_or_default(),
            "Service reported a problem"
        ),
        Err(e) => tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            service,
            error = %e,
            "Service health check failed"
        ),
    }
}

/// Checks that the output bucket answers; only logs on failure.
async fn check_output_bucket(buckets: &dyn Buckets, name: &str) {
    let reachable = match buckets.bucket(name) {
        Ok(client) => client.verify_reachable().await,
        Err(e) => Err(e),
    };

    match reachable {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_STARTUP,
            bucket = %name,
            "Output bucket reachable"
        ),
        Err(e) => tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            bucket = %name,
            error = %e,
            "Output bucket is not reachable, uploads may fail"
        ),
    }
}
