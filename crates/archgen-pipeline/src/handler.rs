//! End-to-end wiring of the pipeline steps.

use std::sync::Arc;

use archgen_core::{ValidatorService, VlmService};
use archgen_object::providers::Buckets;
use aws_lambda_events::event::s3::S3Event;
use serde::{Deserialize, Serialize};

use crate::{
    Fetcher, InvocationStamp, PipelineConfig, Publisher, Result, TemplateGenerator,
    TriggerEvent, Validator,
};

const TRACING_TARGET: &str = "archgen_pipeline::handler";

/// Value returned to the platform after a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// Always `200` for a completed run.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl InvocationResponse {
    /// Response of a completed run.
    pub const fn ok() -> Self {
        Self { status_code: 200 }
    }
}

/// Processes one trigger event from download to upload.
///
/// Holds process-lifetime clients; no state is kept between invocations.
#[derive(Debug, Clone)]
pub struct Pipeline {
    fetcher: Fetcher,
    generator: TemplateGenerator,
    validator: Validator,
    publisher: Publisher,
    config: PipelineConfig,
}

impl Pipeline {
    /// Wires the pipeline steps to the given clients.
    pub fn new(
        config: PipelineConfig,
        buckets: Arc<dyn Buckets>,
        vlm: VlmService,
        validator: ValidatorService,
    ) -> Self {
        Self {
            fetcher: Fetcher::new(buckets.clone()),
            generator: TemplateGenerator::new(vlm, &config.prompt_path),
            validator: Validator::new(validator),
            publisher: Publisher::new(buckets, &config.output_bucket, &config.scratch_dir),
            config,
        }
    }

    /// Handles a raw object-created notification.
    pub async fn handle_s3_event(&self, event: &S3Event) -> Result<InvocationResponse> {
        let trigger = TriggerEvent::from_s3_event(event)?;
        self.handle(&trigger).await
    }

    /// Handles `event`, stamping it with the current time.
    pub async fn handle(&self, event: &TriggerEvent) -> Result<InvocationResponse> {
        self.handle_at(event, InvocationStamp::now()).await
    }

    /// Handles `event` with an explicit invocation stamp.
    ///
    /// Steps run strictly in order; the first failing step aborts the run and
    /// nothing is uploaded.
    #[tracing::instrument(
        name = "pipeline.handle",
        skip_all,
        fields(bucket = %event.bucket, key = %event.key, stamp = %stamp)
    )]
    pub async fn handle_at(
        &self,
        event: &TriggerEvent,
        stamp: InvocationStamp,
    ) -> Result<InvocationResponse> {
        let started_at = std::time::Instant::now();

        let result = self.run(event, &stamp).await;

        let elapsed_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(_) => tracing::info!(
                target: TRACING_TARGET,
                elapsed_ms,
                "Invocation completed"
            ),
            Err(e) => tracing::error!(
                target: TRACING_TARGET,
                elapsed_ms,
                error = %e,
                "Invocation failed"
            ),
        }

        result
    }

    async fn run(&self, event: &TriggerEvent, stamp: &InvocationStamp) -> Result<InvocationResponse> {
        let image_path = self.config.scratch_dir.join(stamp.image_file_name());
        let image_path = self
            .fetcher
            .fetch(&event.bucket, &event.key, &image_path)
            .await?;

        let answer = self.generator.generate(&image_path).await?;

        let template = self.validator.validate(&answer, stamp).await?;

        self.publisher.publish(&template.name, &template.body).await?;

        Ok(InvocationResponse::ok())
    }
}

#[cfg(test)]
mod tests {
    use archgen_core::ErrorKind;
    use archgen_core::mock::{MockValidator, MockVlm};
    use archgen_object::providers::MemoryBuckets;
    use bytes::Bytes;
    use tempfile::TempDir;

    use super::*;
    use crate::PipelineError;

    const STAMP: &str = "20240101120000";

    struct Harness {
        buckets: MemoryBuckets,
        scratch: TempDir,
        pipeline: Pipeline,
    }

    async fn harness(vlm: MockVlm, validator: MockValidator) -> Harness {
        let buckets = MemoryBuckets::new();
        buckets
            .bucket("bucket-in")
            .unwrap()
            .put("diagram1.png", Bytes::from_static(b"\x89PNG diagram"), None)
            .await
            .unwrap();

        let scratch = tempfile::tempdir().unwrap();
        let prompt_path = scratch.path().join("prompt.txt");
        std::fs::write(&prompt_path, "no additional constraints").unwrap();

        let config =
            PipelineConfig::new(&prompt_path, "bucket-out").with_scratch_dir(scratch.path());
        let pipeline = Pipeline::new(
            config,
            Arc::new(buckets.clone()),
            VlmService::new(vlm),
            ValidatorService::new(validator),
        );

        Harness {
            buckets,
            scratch,
            pipeline,
        }
    }

    fn stamp() -> InvocationStamp {
        STAMP.parse().unwrap()
    }

    async fn output(buckets: &MemoryBuckets, key: &str) -> Option<String> {
        let client = buckets.bucket("bucket-out").unwrap();
        let object = client.get(key).await.ok()?;
        Some(String::from_utf8(object.data.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn accepted_template_is_published() {
        let vlm = MockVlm::with_text("```yaml\nResources:\n  Bucket:\n    Type: AWS::S3::Bucket\n```");
        let validator = MockValidator::accepting();
        let h = harness(vlm.clone(), validator.clone()).await;

        let response = h
            .pipeline
            .handle_at(&TriggerEvent::new("bucket-in", "diagram1.png"), stamp())
            .await
            .unwrap();

        assert_eq!(response, InvocationResponse::ok());
        assert_eq!(
            output(&h.buckets, "20240101120000.yaml").await.as_deref(),
            Some("Resources:\n  Bucket:\n    Type: AWS::S3::Bucket")
        );
        assert_eq!(output(&h.buckets, "20240101120000_error.yaml").await, None);

        let image = std::fs::read(h.scratch.path().join("20240101120000.png")).unwrap();
        assert_eq!(image, b"\x89PNG diagram");
        assert_eq!(vlm.requests()[0].image.as_bytes(), b"\x89PNG diagram");
        assert!(vlm.requests()[0].text.ends_with("no additional constraints"));
        assert_eq!(
            validator.templates(),
            vec!["Resources:\n  Bucket:\n    Type: AWS::S3::Bucket".to_owned()]
        );
    }

    #[tokio::test]
    async fn rejected_template_is_published_with_error_suffix() {
        let h = harness(
            MockVlm::with_text("```yaml\nResources: [unclosed\n```"),
            MockValidator::rejecting("Template format error: YAML not well-formed"),
        )
        .await;

        let response = h
            .pipeline
            .handle_at(&TriggerEvent::new("bucket-in", "diagram1.png"), stamp())
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(
            output(&h.buckets, "20240101120000_error.yaml").await.as_deref(),
            Some("Resources: [unclosed")
        );
        assert_eq!(output(&h.buckets, "20240101120000.yaml").await, None);
    }

    #[tokio::test]
    async fn model_failure_leaves_output_empty() {
        let validator = MockValidator::accepting();
        let h = harness(
            MockVlm::failing(ErrorKind::ServiceUnavailable, "model overloaded"),
            validator.clone(),
        )
        .await;

        let error = h
            .pipeline
            .handle_at(&TriggerEvent::new("bucket-in", "diagram1.png"), stamp())
            .await
            .unwrap_err();

        assert!(matches!(error, PipelineError::ModelInvocation(_)));
        assert!(validator.templates().is_empty());
        assert_eq!(output(&h.buckets, "20240101120000.yaml").await, None);
        assert_eq!(output(&h.buckets, "20240101120000_error.yaml").await, None);
    }

    #[tokio::test]
    async fn missing_diagram_stops_before_model() {
        let vlm = MockVlm::with_text("Foo: Bar");
        let h = harness(vlm.clone(), MockValidator::accepting()).await;

        let error = h
            .pipeline
            .handle_at(&TriggerEvent::new("bucket-in", "absent.png"), stamp())
            .await
            .unwrap_err();

        assert!(matches!(error, PipelineError::StorageAccess { .. }));
        assert!(vlm.requests().is_empty());
    }

    #[tokio::test]
    async fn unreachable_validator_aborts() {
        let h = harness(
            MockVlm::with_text("Foo: Bar"),
            MockValidator::unavailable("connection reset"),
        )
        .await;

        let error = h
            .pipeline
            .handle_at(&TriggerEvent::new("bucket-in", "diagram1.png"), stamp())
            .await
            .unwrap_err();

        assert!(matches!(error, PipelineError::ValidationUnavailable(_)));
        assert_eq!(output(&h.buckets, "20240101120000.yaml").await, None);
        assert_eq!(output(&h.buckets, "20240101120000_error.yaml").await, None);
    }

    #[tokio::test]
    async fn s3_notification_with_encoded_key() {
        let vlm = MockVlm::with_text("Foo: Bar");
        let validator = MockValidator::accepting();
        let h = harness(vlm.clone(), validator.clone()).await;
        h.buckets
            .bucket("bucket-in")
            .unwrap()
            .put("my diagram.png", Bytes::from_static(b"png"), None)
            .await
            .unwrap();

        let event = crate::event::tests::s3_event(&[("bucket-in", "my+diagram.png")]);
        let before = InvocationStamp::now();
        let response = h.pipeline.handle_s3_event(&event).await.unwrap();
        let after = InvocationStamp::now();
        assert_eq!(response, InvocationResponse::ok());

        assert_eq!(vlm.requests()[0].image.as_bytes(), b"png");
        assert_eq!(validator.templates(), vec!["Foo: Bar".to_owned()]);

        let mut published = None;
        for stamp in [before, after] {
            if let Some(body) = output(&h.buckets, &format!("{stamp}.yaml")).await {
                published = Some(body);
            }
        }
        assert_eq!(published.as_deref(), Some("Foo: Bar"));
    }

    #[tokio::test]
    async fn empty_notification_is_rejected() {
        let h = harness(MockVlm::with_text("Foo: Bar"), MockValidator::accepting()).await;

        let event = crate::event::tests::s3_event(&[]);
        let error = h.pipeline.handle_s3_event(&event).await.unwrap_err();
        assert!(matches!(error, PipelineError::InvalidEvent(_)));
    }

    #[test]
    fn response_serializes_status_code() {
        let json = serde_json::to_value(InvocationResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "statusCode": 200 }));
    }
}
