//! Amazon Bedrock vision model provider.

mod body;

use std::fmt;

use archgen_core::{Error, Result, ServiceHealth, VlmProvider, VlmRequest, VlmResponse};
use aws_config::SdkConfig;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
pub use body::{
    ANTHROPIC_VERSION, ContentBlock, ImageSource, Message, MessagesRequest, MessagesResponse,
    ResponseBlock,
};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_BEDROCK;
use crate::sdk::{kind_for_code, load_sdk_config, transport_error};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Configuration for the Bedrock runtime endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct BedrockConfig {
    /// Region of the Bedrock runtime endpoint
    #[cfg_attr(feature = "config", arg(long = "bedrock-region", env = "BEDROCK_REGION"))]
    pub bedrock_region: String,

    /// Identifier of the model to invoke
    #[cfg_attr(feature = "config", arg(long = "model-id", env = "MODEL_ID"))]
    pub model_id: String,
}

impl BedrockConfig {
    /// Validates the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.bedrock_region.trim().is_empty() {
            return Err(Error::configuration().with_message("bedrock region must not be empty"));
        }
        if self.model_id.trim().is_empty() {
            return Err(Error::configuration().with_message("model id must not be empty"));
        }
        Ok(())
    }
}

/// [`VlmProvider`] backed by the Bedrock runtime `InvokeModel` API.
#[derive(Clone)]
pub struct BedrockProvider {
    client: Client,
    model_id: String,
}

impl fmt::Debug for BedrockProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BedrockProvider")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}

impl BedrockProvider {
    /// Creates a provider from an already loaded SDK configuration.
    pub fn new(sdk_config: &SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(sdk_config),
            model_id: model_id.into(),
        }
    }

    /// Loads the SDK configuration for the configured region and creates a provider.
    pub async fn from_config(config: &BedrockConfig) -> Result<Self> {
        config.validate()?;

        let sdk_config = load_sdk_config(Some(&config.bedrock_region)).await;

        tracing::debug!(
            target: TRACING_TARGET_BEDROCK,
            region = %config.bedrock_region,
            model_id = %config.model_id,
            "Created Bedrock runtime client"
        );

        Ok(Self::new(&sdk_config, config.model_id.clone()))
    }
}

#[async_trait::async_trait]
impl VlmProvider for BedrockProvider {
    async fn invoke(&self, request: &VlmRequest) -> Result<VlmResponse> {
        let body = MessagesRequest::from_request(request).to_vec()?;

        tracing::debug!(
            target: TRACING_TARGET_BEDROCK,
            model_id = %self.model_id,
            body_bytes = body.len(),
            "Sending InvokeModel request"
        );

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(from_invoke_error)?;

        MessagesResponse::from_slice(output.body().as_ref())?.into_response()
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        // The runtime API has no side-effect free health call; a built client is assumed healthy.
        Ok(ServiceHealth::healthy())
    }
}

fn from_invoke_error(err: SdkError<InvokeModelError>) -> Error {
    let message = DisplayErrorContext(&err).to_string();
    let (kind, timed_out) = match &err {
        SdkError::ServiceError(context) => (Some(kind_for_code(context.err().code())), false),
        SdkError::TimeoutError(_) => (None, true),
        _ => (None, false),
    };

    match kind {
        Some(kind) => Error::from_source(kind, err).with_message(message),
        None => transport_error(message, timed_out, err),
    }
}
