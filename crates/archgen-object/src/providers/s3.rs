//! S3-compatible provider using [`object_store::aws::AmazonS3Builder`].
//!
//! Credentials and region are read from the standard `AWS_*` environment
//! variables, which is how the Lambda runtime hands them to the function.

#[cfg(feature = "config")]
use clap::Args;
use object_store::aws::AmazonS3Builder;
use serde::{Deserialize, Serialize};

use super::Buckets;
use crate::client::ObjectStoreClient;
use crate::{Error, TRACING_TARGET};

/// Overrides applied on top of the `AWS_*` environment when building S3 clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    /// Endpoint URL for S3-compatible services (e.g. `http://localhost:9000`)
    #[cfg_attr(feature = "config", arg(long = "s3-endpoint", env = "S3_ENDPOINT"))]
    #[serde(default)]
    pub s3_endpoint: Option<String>,

    /// Region override; the `AWS_REGION` environment is used when absent
    #[cfg_attr(feature = "config", arg(long = "s3-region", env = "S3_REGION"))]
    #[serde(default)]
    pub s3_region: Option<String>,
}

impl S3Config {
    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(endpoint) = &self.s3_endpoint
            && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(Error::connection(
                format!("endpoint must be an http(s) URL, got '{endpoint}'"),
                S3Buckets::ID,
                false,
            ));
        }
        Ok(())
    }
}

/// Builds S3-backed clients, one per requested bucket.
#[derive(Debug, Clone, Default)]
pub struct S3Buckets {
    config: S3Config,
}

impl S3Buckets {
    const ID: &'static str = "s3";

    /// Creates a provider applying `config` on top of the environment.
    pub fn new(config: S3Config) -> Self {
        Self { config }
    }

    fn builder(&self, name: &str) -> AmazonS3Builder {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(name);

        if let Some(region) = &self.config.s3_region {
            builder = builder.with_region(region);
        }

        if let Some(endpoint) = &self.config.s3_endpoint {
            builder = builder.with_endpoint(endpoint);
            if endpoint.starts_with("http://") {
                builder = builder.with_allow_http(true);
            }
        }

        builder
    }
}

impl Buckets for S3Buckets {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn bucket(&self, name: &str) -> Result<ObjectStoreClient, Error> {
        tracing::debug!(target: TRACING_TARGET, bucket = name, "building S3 client");

        let store = self
            .builder(name)
            .build()
            .map_err(|e| Error::connection(e.to_string(), Self::ID, false).with_source(e))?;

        Ok(ObjectStoreClient::new(name, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_non_http_endpoint() {
        let config = S3Config {
            s3_endpoint: Some("localhost:9000".to_owned()),
            s3_region: None,
        };
        assert!(config.validate().is_err());

        let config = S3Config {
            s3_endpoint: Some("http://localhost:9000".to_owned()),
            s3_region: None,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builds_client_for_named_bucket() {
        let provider = S3Buckets::new(S3Config {
            s3_endpoint: Some("http://localhost:9000".to_owned()),
            s3_region: Some("us-east-1".to_owned()),
        });

        let client = provider.bucket("bucket-in").unwrap();
        assert_eq!(client.bucket(), "bucket-in");
        assert_eq!(provider.id(), "s3");
    }
}
