//! Shared AWS SDK plumbing: configuration loading and error classification.

use archgen_core::{Error, ErrorKind};
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Loads the AWS SDK configuration from the environment.
///
/// `region` overrides the default region chain (`AWS_REGION`, profile, IMDS).
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let region = RegionProviderChain::first_try(region.map(|r| Region::new(r.to_owned())))
        .or_default_provider();

    aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await
}

/// Maps an AWS error code to an [`ErrorKind`].
pub(crate) fn kind_for_code(code: Option<&str>) -> ErrorKind {
    match code {
        Some(
            "ThrottlingException" | "Throttling" | "ServiceQuotaExceededException"
            | "TooManyRequestsException",
        ) => ErrorKind::RateLimited,
        Some(
            "AccessDeniedException" | "AccessDenied" | "UnrecognizedClientException"
            | "ExpiredTokenException" | "InvalidClientTokenId",
        ) => ErrorKind::Authentication,
        Some("ValidationException" | "ValidationError") => ErrorKind::InvalidInput,
        Some("ResourceNotFoundException") => ErrorKind::NotFound,
        Some("ModelTimeoutException") => ErrorKind::Timeout,
        Some(
            "ServiceUnavailableException" | "ModelNotReadyException" | "InternalServerException",
        ) => ErrorKind::ServiceUnavailable,
        Some(_) => ErrorKind::ExternalError,
        None => ErrorKind::Unknown,
    }
}

/// Maps an SDK-level failure that never produced a service response.
pub(crate) fn transport_error<E>(message: String, timed_out: bool, source: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let kind = if timed_out {
        ErrorKind::Timeout
    } else {
        ErrorKind::NetworkError
    };
    Error::from_source(kind, source).with_message(message)
}
