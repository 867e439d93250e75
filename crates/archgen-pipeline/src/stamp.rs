//! Invocation timestamps used to name scratch files and artifacts.

use std::fmt;
use std::str::FromStr;

use jiff::Zoned;

use crate::PipelineError;

/// Fourteen-digit `YYYYMMDDHHMMSS` stamp taken once per invocation.
///
/// Every file an invocation produces is named after the same stamp, so the
/// image, the scratch template and the published artifact correlate. Two
/// invocations starting within the same second share a stamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvocationStamp(String);

impl InvocationStamp {
    const FORMAT: &'static str = "%Y%m%d%H%M%S";

    /// Takes the stamp from the current local time.
    pub fn now() -> Self {
        Self::from_zoned(&Zoned::now())
    }

    /// Takes the stamp from `time` in its own time zone.
    pub fn from_zoned(time: &Zoned) -> Self {
        Self(time.strftime(Self::FORMAT).to_string())
    }

    /// Returns the stamp as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the downloaded diagram.
    pub fn image_file_name(&self) -> String {
        format!("{}.png", self.0)
    }
}

impl fmt::Display for InvocationStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for InvocationStamp {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 14 && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PipelineError::Config(
                format!("invocation stamp must be 14 digits, got {s:?}").into(),
            ))
        }
    }
}
