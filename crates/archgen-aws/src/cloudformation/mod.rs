//! AWS CloudFormation template validator.

use std::fmt;
use std::time::Instant;

use archgen_core::{Error, Result, ServiceHealth, ValidationOutcome, ValidatorProvider};
use aws_config::SdkConfig;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::operation::validate_template::{
    ValidateTemplateError, ValidateTemplateOutput,
};

use crate::TRACING_TARGET_CLOUDFORMATION;
use crate::sdk::transport_error;

/// Smallest template CloudFormation accepts, used by the health check.
const HEALTH_TEMPLATE: &str =
    "Resources:\n  Handle:\n    Type: AWS::CloudFormation::WaitConditionHandle\n";

/// [`ValidatorProvider`] backed by the CloudFormation `ValidateTemplate` API.
#[derive(Clone)]
pub struct CloudFormationProvider {
    client: Client,
}

impl fmt::Debug for CloudFormationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudFormationProvider")
            .finish_non_exhaustive()
    }
}

impl CloudFormationProvider {
    /// Creates a provider from an already loaded SDK configuration.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait::async_trait]
impl ValidatorProvider for CloudFormationProvider {
    async fn validate(&self, template: &str) -> Result<ValidationOutcome> {
        let result = self
            .client
            .validate_template()
            .template_body(template)
            .send()
            .await;

        match result {
            Ok(output) => Ok(accepted(&output)),
            Err(err) => rejected_or_error(err),
        }
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        let started_at = Instant::now();
        let health = match self.validate(HEALTH_TEMPLATE).await {
            Ok(ValidationOutcome::Accepted { .. }) => ServiceHealth::healthy(),
            Ok(ValidationOutcome::Rejected { reason }) => ServiceHealth::degraded(reason),
            Err(error) => ServiceHealth::unhealthy(error.to_string()),
        };
        Ok(health.with_response_time(started_at.elapsed()))
    }
}

fn accepted(output: &ValidateTemplateOutput) -> ValidationOutcome {
    tracing::debug!(
        target: TRACING_TARGET_CLOUDFORMATION,
        output = ?output,
        "Template accepted"
    );

    ValidationOutcome::Accepted {
        description: output.description().map(ToOwned::to_owned),
        parameters: output
            .parameters()
            .iter()
            .filter_map(|p| p.parameter_key().map(ToOwned::to_owned))
            .collect(),
    }
}

/// A service response means the template was judged; anything else means it
/// was never seen by the validator.
fn rejected_or_error(err: SdkError<ValidateTemplateError>) -> Result<ValidationOutcome> {
    let message = DisplayErrorContext(&err).to_string();
    let (reason, timed_out) = match &err {
        SdkError::ServiceError(context) => (Some(rejection_reason(context.err())), false),
        SdkError::TimeoutError(_) => (None, true),
        _ => (None, false),
    };

    match reason {
        Some(reason) => Ok(ValidationOutcome::rejected(reason)),
        None => Err(transport_error(message, timed_out, err)),
    }
}

fn rejection_reason(err: &ValidateTemplateError) -> String {
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (None, Some(message)) => message.to_owned(),
        (Some(code), None) => code.to_owned(),
        (None, None) => "template rejected without diagnostic".to_owned(),
    }
}
