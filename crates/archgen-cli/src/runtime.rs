//! Event sources: the Lambda runtime API or a single event file.

use std::path::Path;

use anyhow::Context;
use archgen_pipeline::{InvocationResponse, Pipeline};
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{LambdaEvent, service_fn};

use crate::TRACING_TARGET_RUNTIME;

/// Serves invocations from the Lambda runtime API until the process is stopped.
pub async fn serve(pipeline: Pipeline) -> anyhow::Result<()> {
    tracing::info!(target: TRACING_TARGET_RUNTIME, "Waiting for invocations");

    let pipeline = &pipeline;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<S3Event>| async move {
        tracing::debug!(
            target: TRACING_TARGET_RUNTIME,
            request_id = %event.context.request_id,
            records = event.payload.records.len(),
            "Received invocation"
        );

        pipeline
            .handle_s3_event(&event.payload)
            .await
            .map_err(lambda_runtime::Error::from)
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime stopped: {e}"))
}

/// Processes the notification stored at `path` once.
pub async fn run_once(pipeline: &Pipeline, path: &Path) -> anyhow::Result<InvocationResponse> {
    let event = load_event(path).await?;

    tracing::info!(
        target: TRACING_TARGET_RUNTIME,
        path = %path.display(),
        records = event.records.len(),
        "Processing event file"
    );

    pipeline
        .handle_s3_event(&event)
        .await
        .context("invocation failed")
}

/// Reads and parses an S3 notification from disk.
async fn load_event(path: &Path) -> anyhow::Result<S3Event> {
    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read event file {}", path.display()))?;

    serde_json::from_slice(&raw)
        .with_context(|| format!("event file {} is not an S3 notification", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT: &str = r#"{
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventTime": "2024-01-01T12:00:00.000Z",
            "eventName": "ObjectCreated:Put",
            "userIdentity": { "principalId": "AWS:EXAMPLE" },
            "requestParameters": { "sourceIPAddress": "127.0.0.1" },
            "responseElements": {},
            "s3": {
                "s3SchemaVersion": "1.0",
                "configurationId": "diagram-upload",
                "bucket": {
                    "name": "bucket-in",
                    "ownerIdentity": { "principalId": "EXAMPLE" },
                    "arn": "arn:aws:s3:::bucket-in"
                },
                "object": { "key": "diagram1.png", "size": 1024 }
            }
        }]
    }"#;

    #[tokio::test]
    async fn loads_event_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, EVENT).unwrap();

        let event = load_event(&path).await.unwrap();
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].s3.object.key.as_deref(), Some("diagram1.png"));
    }

    #[tokio::test]
    async fn rejects_malformed_event_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, "{\"Records\": 1}").unwrap();

        assert!(load_event(&path).await.is_err());
    }
}
