//! Verdict of a template validation.

use serde::{Deserialize, Serialize};

/// Result of submitting a template to a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The validator accepted the template.
    Accepted {
        /// Template description reported by the validator, if any.
        description: Option<String>,
        /// Names of the template parameters reported by the validator.
        parameters: Vec<String>,
    },
    /// The validator rejected the template.
    Rejected {
        /// Diagnostic returned by the validator.
        reason: String,
    },
}

impl ValidationOutcome {
    /// Creates an accepted outcome without details.
    pub fn accepted() -> Self {
        Self::Accepted {
            description: None,
            parameters: Vec::new(),
        }
    }

    /// Creates a rejected outcome with the validator's diagnostic.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the template was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
