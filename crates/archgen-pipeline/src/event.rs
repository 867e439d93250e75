//! Trigger event decoding.

use aws_lambda_events::event::s3::S3Event;

use crate::{PipelineError, Result};

const TRACING_TARGET: &str = "archgen_pipeline::event";

/// The uploaded object that started an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Bucket holding the diagram.
    pub bucket: String,
    /// Decoded object key of the diagram.
    pub key: String,
}

impl TriggerEvent {
    /// Creates an event for an already decoded key.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Extracts the first record of an object-created notification.
    ///
    /// Keys arrive form-encoded (`+` for spaces, `%XX` escapes) and are decoded
    /// here. Records after the first are ignored.
    pub fn from_s3_event(event: &S3Event) -> Result<Self> {
        let Some(record) = event.records.first() else {
            return Err(PipelineError::invalid_event("event contains no records"));
        };

        if event.records.len() > 1 {
            tracing::warn!(
                target: TRACING_TARGET,
                records = event.records.len(),
                "Event carries more than one record, only the first is processed"
            );
        }

        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PipelineError::invalid_event("record has no bucket name"))?;

        let raw_key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PipelineError::invalid_event("record has no object key"))?;

        Ok(Self::new(bucket, decode_key(raw_key)?))
    }
}

/// Decodes a form-encoded object key.
fn decode_key(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|e| PipelineError::invalid_event(format!("object key is not valid UTF-8: {e}")))
}
