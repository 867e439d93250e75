//! Vision-language model (VLM) abstractions.
//!
//! A [`VlmProvider`] turns a single multimodal [`VlmRequest`] (system
//! instruction, one image and one text instruction) into the raw text the
//! model answered with. Conversations, streaming and tool use are out of
//! scope: every request is a one-shot user turn.

mod request;
mod response;
mod service;

pub use request::{GenerationParams, ImageAttachment, VlmRequest};
pub use response::VlmResponse;
pub use service::VlmService;

use crate::{Result, ServiceHealth};

/// Tracing target for VLM operations.
pub const TRACING_TARGET: &str = "archgen_core::vlm";

/// Core trait for vision-language model providers.
///
/// Implement this trait to plug a concrete model endpoint into the pipeline.
#[async_trait::async_trait]
pub trait VlmProvider: Send + Sync {
    /// Sends the request to the model and returns its textual answer.
    async fn invoke(&self, request: &VlmRequest) -> Result<VlmResponse>;

    /// Performs a health check on the provider.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
