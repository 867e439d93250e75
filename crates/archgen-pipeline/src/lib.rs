#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod error;
mod event;
mod fetcher;
mod generator;
mod handler;
mod publisher;
mod stamp;
mod validation;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use event::TriggerEvent;
pub use fetcher::Fetcher;
pub use generator::{PromptBundle, SYSTEM_PROMPT, TemplateGenerator};
pub use handler::{InvocationResponse, Pipeline};
pub use publisher::{Publisher, TEMPLATE_CONTENT_TYPE};
pub use stamp::InvocationStamp;
pub use validation::{ArtifactName, ValidatedTemplate, Validator, clean_template};
