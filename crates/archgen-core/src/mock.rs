//! Mock model and validator providers for testing.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! archgen-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! Both mocks are cheap to clone and share their call log, so a test can keep
//! one handle while the other is moved into a service wrapper.

use std::sync::{Arc, Mutex};

use crate::{
    Error, ErrorKind, Result, ServiceHealth, ValidationOutcome, ValidatorProvider, VlmProvider,
    VlmRequest, VlmResponse,
};

#[derive(Debug, Clone)]
enum Reply<T> {
    Ok(T),
    Fail(ErrorKind, String),
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Fail(kind, message) => Err(Error::new(*kind).with_message(message.clone())),
        }
    }
}

/// Mock vision model returning a fixed answer.
#[derive(Debug, Clone)]
pub struct MockVlm {
    reply: Reply<String>,
    requests: Arc<Mutex<Vec<VlmRequest>>>,
}

impl MockVlm {
    /// Creates a mock that answers every request with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Ok(text.into()),
            requests: Arc::default(),
        }
    }

    /// Creates a mock that fails every request.
    pub fn failing(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Fail(kind, message.into()),
            requests: Arc::default(),
        }
    }

    /// Returns all requests received so far.
    pub fn requests(&self) -> Vec<VlmRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl VlmProvider for MockVlm {
    async fn invoke(&self, request: &VlmRequest) -> Result<VlmResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.reply.get().map(VlmResponse::new)
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}

/// Mock template validator returning a fixed verdict.
#[derive(Debug, Clone)]
pub struct MockValidator {
    reply: Reply<ValidationOutcome>,
    templates: Arc<Mutex<Vec<String>>>,
}

impl MockValidator {
    /// Creates a mock that accepts every template.
    pub fn accepting() -> Self {
        Self::with_outcome(ValidationOutcome::accepted())
    }

    /// Creates a mock that rejects every template with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self::with_outcome(ValidationOutcome::rejected(reason))
    }

    /// Creates a mock that cannot be reached.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Fail(ErrorKind::NetworkError, message.into()),
            templates: Arc::default(),
        }
    }

    /// Creates a mock returning `outcome` for every template.
    pub fn with_outcome(outcome: ValidationOutcome) -> Self {
        Self {
            reply: Reply::Ok(outcome),
            templates: Arc::default(),
        }
    }

    /// Returns all templates received so far.
    pub fn templates(&self) -> Vec<String> {
        self.templates
            .lock()
            .map(|templates| templates.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ValidatorProvider for MockValidator {
    async fn validate(&self, template: &str) -> Result<ValidationOutcome> {
        if let Ok(mut templates) = self.templates.lock() {
            templates.push(template.to_owned());
        }
        self.reply.get()
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageAttachment, ValidatorService, VlmService};

    #[tokio::test]
    async fn mock_vlm_records_requests() {
        let mock = MockVlm::with_text("```yaml\nFoo: Bar\n```");
        let service = VlmService::new(mock.clone());

        let request = VlmRequest::new("sys", "task", ImageAttachment::png(vec![1, 2, 3]));
        let response = service.invoke(&request).await.unwrap();

        assert_eq!(response.text, "```yaml\nFoo: Bar\n```");
        assert_eq!(mock.requests().len(), 1);
        assert_eq!(mock.requests()[0].text, "task");
    }

    #[tokio::test]
    async fn mock_vlm_failure() {
        let service = VlmService::new(MockVlm::failing(ErrorKind::RateLimited, "quota"));

        let request = VlmRequest::new("sys", "task", ImageAttachment::png(Vec::new()));
        let error = service.invoke(&request).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::RateLimited);
        assert!(error.is_retryable());
    }

    #[tokio::test]
    async fn mock_validator_verdicts() {
        let accepting = MockValidator::accepting();
        let service = ValidatorService::new(accepting.clone());
        assert!(service.validate("Foo: Bar").await.unwrap().is_accepted());
        assert_eq!(accepting.templates(), vec!["Foo: Bar".to_owned()]);

        let service = ValidatorService::new(MockValidator::rejecting("bad"));
        assert_eq!(
            service.validate("Foo").await.unwrap(),
            ValidationOutcome::rejected("bad")
        );

        let service = ValidatorService::new(MockValidator::unavailable("down"));
        assert!(service.validate("Foo").await.is_err());
    }

    #[tokio::test]
    async fn services_forward_health_checks() {
        let vlm = VlmService::new(MockVlm::with_text("Foo: Bar"));
        assert!(vlm.health_check().await.unwrap().is_healthy());

        let validator = ValidatorService::new(MockValidator::accepting());
        assert!(validator.health_check().await.unwrap().is_healthy());
    }
}
