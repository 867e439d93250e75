//! Response types for VLM invocations.

use serde::{Deserialize, Serialize};

/// The textual answer of a model invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlmResponse {
    /// Raw text of the first content segment, untouched.
    pub text: String,
    /// Reason the model stopped generating, if reported.
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl VlmResponse {
    /// Creates a response from raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stop_reason: None,
        }
    }

    /// Attaches the stop reason reported by the model.
    pub fn with_stop_reason(mut self, reason: impl Into<String>) -> Self {
        self.stop_reason = Some(reason.into());
        self
    }

    /// Returns `true` if generation stopped at the token limit.
    pub fn is_truncated(&self) -> bool {
        self.stop_reason.as_deref() == Some("max_tokens")
    }
}
