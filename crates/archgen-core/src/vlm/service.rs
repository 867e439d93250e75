//! VLM service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{TRACING_TARGET, VlmProvider, VlmRequest, VlmResponse};
use crate::{Result, ServiceHealth};

/// VLM service wrapper with observability.
///
/// This wrapper adds structured logging to any VLM implementation.
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct VlmService {
    inner: Arc<dyn VlmProvider>,
}

impl fmt::Debug for VlmService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VlmService").finish_non_exhaustive()
    }
}

impl VlmService {
    /// Create a new VLM service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: VlmProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Sends a request to the wrapped provider.
    pub async fn invoke(&self, request: &VlmRequest) -> Result<VlmResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            media_type = request.image.media_type(),
            image_bytes = request.image.as_bytes().len(),
            max_tokens = request.params.max_tokens,
            temperature = request.params.temperature,
            "Invoking vision model"
        );

        let result = self.inner.invoke(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                if response.is_truncated() {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        elapsed_ms = elapsed.as_millis(),
                        "Model answer hit the token limit"
                    );
                }
                tracing::debug!(
                    target: TRACING_TARGET,
                    response_chars = response.text.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Vision model invocation successful"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    retryable = error.is_retryable(),
                    elapsed_ms = elapsed.as_millis(),
                    "Vision model invocation failed"
                );
            }
        }

        result
    }

    /// Performs a health check on the wrapped provider.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        self.inner.health_check().await
    }
}
