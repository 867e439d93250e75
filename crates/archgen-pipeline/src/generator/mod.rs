//! Template generation through the vision model.

mod prompt;

use std::path::{Path, PathBuf};

use archgen_core::{GenerationParams, ImageAttachment, VlmRequest, VlmService};
pub use prompt::{PromptBundle, SYSTEM_PROMPT};

use crate::{PipelineError, Result};

const TRACING_TARGET: &str = "archgen_pipeline::generator";

/// Turns a diagram image into the model's raw answer.
#[derive(Debug, Clone)]
pub struct TemplateGenerator {
    vlm: VlmService,
    prompt_path: PathBuf,
    params: GenerationParams,
}

impl TemplateGenerator {
    /// Creates a generator reading its supplement from `prompt_path`.
    pub fn new(vlm: VlmService, prompt_path: impl Into<PathBuf>) -> Self {
        Self {
            vlm,
            prompt_path: prompt_path.into(),
            params: GenerationParams::default(),
        }
    }

    /// Reads the supplementary prompt; re-read on every invocation.
    async fn load_supplement(&self) -> Result<String> {
        let supplement = tokio::fs::read_to_string(&self.prompt_path)
            .await
            .map_err(|source| PipelineError::Prompt {
                path: self.prompt_path.clone(),
                source,
            })?;

        tracing::info!(
            target: TRACING_TARGET,
            path = %self.prompt_path.display(),
            supplement = %supplement,
            "Loaded supplementary prompt"
        );

        Ok(supplement)
    }

    /// Sends the diagram at `image_path` to the model and returns its answer.
    #[tracing::instrument(name = "pipeline.generate", skip_all)]
    pub async fn generate(&self, image_path: &Path) -> Result<String> {
        let supplement = self.load_supplement().await?;

        let image = tokio::fs::read(image_path)
            .await
            .map_err(|e| PipelineError::scratch(image_path, e))?;

        let prompt = PromptBundle::new(&supplement);
        let request = VlmRequest::new(prompt.system, prompt.task, ImageAttachment::png(image))
            .with_params(self.params);

        let response = self
            .vlm
            .invoke(&request)
            .await
            .map_err(PipelineError::ModelInvocation)?;

        tracing::info!(
            target: TRACING_TARGET,
            content = %response.text,
            "Model answered"
        );

        Ok(response.text)
    }
}

#[cfg(test)]
mod tests {
    use archgen_core::ErrorKind;
    use archgen_core::mock::MockVlm;

    use super::*;

    #[tokio::test]
    async fn sends_image_and_supplement() {
        let scratch = tempfile::tempdir().unwrap();
        let prompt_path = scratch.path().join("prompt.txt");
        let image_path = scratch.path().join("diagram.png");
        std::fs::write(&prompt_path, "Use t3.micro").unwrap();
        std::fs::write(&image_path, [1u8, 2, 3]).unwrap();

        let mock = MockVlm::with_text("```yaml\nFoo: Bar\n```");
        let generator = TemplateGenerator::new(VlmService::new(mock.clone()), &prompt_path);

        let answer = generator.generate(&image_path).await.unwrap();
        assert_eq!(answer, "```yaml\nFoo: Bar\n```");

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, SYSTEM_PROMPT);
        assert!(requests[0].text.ends_with("Use t3.micro"));
        assert_eq!(requests[0].image.as_bytes(), &[1, 2, 3]);
        assert_eq!(requests[0].image.media_type(), "image/png");
        assert_eq!(requests[0].params, GenerationParams::default());
    }

    #[tokio::test]
    async fn supplement_is_read_per_call() {
        let scratch = tempfile::tempdir().unwrap();
        let prompt_path = scratch.path().join("prompt.txt");
        let image_path = scratch.path().join("diagram.png");
        std::fs::write(&image_path, [0u8]).unwrap();

        let mock = MockVlm::with_text("Foo: Bar");
        let generator = TemplateGenerator::new(VlmService::new(mock.clone()), &prompt_path);

        std::fs::write(&prompt_path, "first").unwrap();
        generator.generate(&image_path).await.unwrap();
        std::fs::write(&prompt_path, "second").unwrap();
        generator.generate(&image_path).await.unwrap();

        let requests = mock.requests();
        assert!(requests[0].text.ends_with("first"));
        assert!(requests[1].text.ends_with("second"));
    }

    #[tokio::test]
    async fn missing_prompt_fails_before_model_call() {
        let scratch = tempfile::tempdir().unwrap();
        let image_path = scratch.path().join("diagram.png");
        std::fs::write(&image_path, [0u8]).unwrap();

        let mock = MockVlm::with_text("Foo: Bar");
        let generator = TemplateGenerator::new(
            VlmService::new(mock.clone()),
            scratch.path().join("missing.txt"),
        );

        let error = generator.generate(&image_path).await.unwrap_err();
        assert!(matches!(error, PipelineError::Prompt { .. }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn model_failure_is_propagated() {
        let scratch = tempfile::tempdir().unwrap();
        let prompt_path = scratch.path().join("prompt.txt");
        let image_path = scratch.path().join("diagram.png");
        std::fs::write(&prompt_path, "").unwrap();
        std::fs::write(&image_path, [0u8]).unwrap();

        let generator = TemplateGenerator::new(
            VlmService::new(MockVlm::failing(ErrorKind::RateLimited, "throttled")),
            &prompt_path,
        );

        match generator.generate(&image_path).await.unwrap_err() {
            PipelineError::ModelInvocation(e) => assert_eq!(e.kind, ErrorKind::RateLimited),
            other => panic!("unexpected error: {other}"),
        }
    }
}
