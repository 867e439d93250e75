#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod health;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;
pub mod validate;
pub mod vlm;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use health::{ServiceHealth, ServiceStatus};
pub use validate::{ValidationOutcome, ValidatorProvider, ValidatorService};
pub use vlm::{GenerationParams, ImageAttachment, VlmProvider, VlmRequest, VlmResponse, VlmService};
