//! Request types for VLM invocations.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Default upper bound on generated tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Media type of diagram images accepted by the pipeline.
pub const MEDIA_TYPE_PNG: &str = "image/png";

/// Decoding parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum number of tokens the model may generate.
    pub max_tokens: u32,
    /// Sampling temperature; `0.0` selects greedy decoding.
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
        }
    }
}

/// An image attached to a request, kept as raw bytes until encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    media_type: String,
    data: Bytes,
}

impl ImageAttachment {
    /// Creates an attachment with an explicit media type.
    pub fn new(media_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Creates a PNG attachment.
    pub fn png(data: impl Into<Bytes>) -> Self {
        Self::new(MEDIA_TYPE_PNG, data)
    }

    /// Returns the media type.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the raw image bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the image encoded as standard (padded) base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// A single multimodal request: system instruction plus one user turn made of
/// an image followed by a text instruction.
#[derive(Debug, Clone)]
pub struct VlmRequest {
    /// System-level instruction.
    pub system: String,
    /// Text part of the user turn.
    pub text: String,
    /// Image part of the user turn.
    pub image: ImageAttachment,
    /// Decoding parameters.
    pub params: GenerationParams,
}

impl VlmRequest {
    /// Creates a request with default generation parameters.
    pub fn new(system: impl Into<String>, text: impl Into<String>, image: ImageAttachment) -> Self {
        Self {
            system: system.into(),
            text: text.into(),
            image,
            params: GenerationParams::default(),
        }
    }

    /// Overrides the generation parameters.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}
