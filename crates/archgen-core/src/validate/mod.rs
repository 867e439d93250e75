//! Template validation abstractions.
//!
//! A [`ValidatorProvider`] submits a template body to an external validation
//! service. Rejection is a regular [`ValidationOutcome`], not an error: errors
//! are reserved for the case where no verdict could be obtained at all.

mod outcome;
mod service;

pub use outcome::ValidationOutcome;
pub use service::ValidatorService;

use crate::{Result, ServiceHealth};

/// Tracing target for validation operations.
pub const TRACING_TARGET: &str = "archgen_core::validate";

/// Core trait for template validation providers.
#[async_trait::async_trait]
pub trait ValidatorProvider: Send + Sync {
    /// Submits `template` for validation and returns the verdict.
    async fn validate(&self, template: &str) -> Result<ValidationOutcome>;

    /// Performs a health check on the provider.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
