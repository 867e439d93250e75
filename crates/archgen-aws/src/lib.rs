#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod bedrock;
pub mod cloudformation;
mod sdk;

pub use bedrock::{BedrockConfig, BedrockProvider};
pub use cloudformation::CloudFormationProvider;
pub use sdk::load_sdk_config;

/// Tracing target for Bedrock operations.
pub const TRACING_TARGET_BEDROCK: &str = "archgen_aws::bedrock";

/// Tracing target for CloudFormation operations.
pub const TRACING_TARGET_CLOUDFORMATION: &str = "archgen_aws::cloudformation";
