//! Template cleaning, validation and artifact naming.

mod cleaner;

use std::fmt;

use archgen_core::{ValidationOutcome, ValidatorService};
pub use cleaner::clean_template;

use crate::{InvocationStamp, PipelineError, Result};

const TRACING_TARGET: &str = "archgen_pipeline::validation";

/// Name of the artifact an invocation publishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Derives the name from the stamp and the validator's verdict.
    pub fn for_outcome(stamp: &InvocationStamp, outcome: &ValidationOutcome) -> Self {
        if outcome.is_accepted() {
            Self(format!("{stamp}.yaml"))
        } else {
            Self(format!("{stamp}_error.yaml"))
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArtifactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A cleaned template together with its verdict and artifact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTemplate {
    /// Artifact name derived from the verdict.
    pub name: ArtifactName,
    /// Cleaned template body.
    pub body: String,
    /// Verdict returned by the validator.
    pub outcome: ValidationOutcome,
}

/// Cleans model answers and submits them to the template validator.
#[derive(Debug, Clone)]
pub struct Validator {
    service: ValidatorService,
}

impl Validator {
    /// Creates a validation step backed by `service`.
    pub fn new(service: ValidatorService) -> Self {
        Self { service }
    }

    /// Cleans `raw` and validates it.
    ///
    /// A rejected template is returned normally with an error-suffixed name.
    /// Only an unreachable validator fails the call.
    pub async fn validate(
        &self,
        raw: &str,
        stamp: &InvocationStamp,
    ) -> Result<ValidatedTemplate> {
        let body = clean_template(raw);

        let outcome = self
            .service
            .validate(&body)
            .await
            .map_err(PipelineError::ValidationUnavailable)?;

        match &outcome {
            ValidationOutcome::Accepted {
                description,
                parameters,
            } => tracing::info!(
                target: TRACING_TARGET,
                stamp = %stamp,
                description = description.as_deref().unwrap_or_default(),
                parameters = ?parameters,
                "Template accepted"
            ),
            ValidationOutcome::Rejected { reason } => tracing::warn!(
                target: TRACING_TARGET,
                stamp = %stamp,
                reason = %reason,
                "Template rejected"
            ),
        }

        Ok(ValidatedTemplate {
            name: ArtifactName::for_outcome(stamp, &outcome),
            body,
            outcome,
        })
    }
}
