//! Pipeline error types.

use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

/// Result type alias for pipeline operations.
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// Pipeline error type.
///
/// Every variant aborts the invocation. A template rejected by the validator
/// is not an error and never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The trigger event does not name a single object.
    #[error("invalid trigger event: {0}")]
    InvalidEvent(Cow<'static, str>),

    /// Reading from or writing to object storage failed.
    #[error("storage access failed: {message}: {source}")]
    StorageAccess {
        message: Cow<'static, str>,
        #[source]
        source: archgen_object::Error,
    },

    /// The vision model could not produce an answer.
    #[error("model invocation failed: {0}")]
    ModelInvocation(#[source] archgen_core::Error),

    /// The template validator could not be reached.
    #[error("template validator unavailable: {0}")]
    ValidationUnavailable(#[source] archgen_core::Error),

    /// The supplementary prompt file could not be read.
    #[error("failed to read supplementary prompt {}: {source}", path.display())]
    Prompt {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A local scratch file could not be written or read.
    #[error("scratch file {} failed: {source}", path.display())]
    Scratch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration values are unusable.
    #[error("invalid configuration: {0}")]
    Config(Cow<'static, str>),
}

impl PipelineError {
    /// Creates an invalid-event error.
    pub fn invalid_event(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidEvent(message.into())
    }

    /// Creates a storage access error with a message and source.
    pub fn storage_access(
        message: impl Into<Cow<'static, str>>,
        source: archgen_object::Error,
    ) -> Self {
        Self::StorageAccess {
            message: message.into(),
            source,
        }
    }

    /// Creates a scratch file error for `path`.
    pub fn scratch(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Scratch {
            path: path.into(),
            source,
        }
    }
}
