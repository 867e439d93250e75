//! Validator service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{TRACING_TARGET, ValidationOutcome, ValidatorProvider};
use crate::{Result, ServiceHealth};

/// Validator service wrapper with observability.
///
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct ValidatorService {
    inner: Arc<dyn ValidatorProvider>,
}

impl fmt::Debug for ValidatorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorService").finish_non_exhaustive()
    }
}

impl ValidatorService {
    /// Create a new validator service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: ValidatorProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Validates a template with the wrapped provider.
    pub async fn validate(&self, template: &str) -> Result<ValidationOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            template_bytes = template.len(),
            "Validating template"
        );

        let result = self.inner.validate(template).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(outcome) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    accepted = outcome.is_accepted(),
                    elapsed_ms = elapsed.as_millis(),
                    "Template validation completed"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Template validator unavailable"
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
