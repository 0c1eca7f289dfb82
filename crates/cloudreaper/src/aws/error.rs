//! AWS error classification
//!
//! Uses the service error `.code()` from `ProvideErrorMetadata` rather than
//! string matching on Debug output. Deletion treats "not found" as success:
//! the resource is already gone, which is the state a nuke run wants.

use aws_sdk_ec2::error::ProvideErrorMetadata;

/// Known AWS error codes for "not found" conditions on the kinds we delete
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidInstanceID.NotFound",
    "InvalidAllocationID.NotFound",
    "InvalidVolume.NotFound",
    "InvalidSnapshot.NotFound",
    "InvalidAMIID.NotFound",
    "InvalidAMIID.Unavailable",
    "LoadBalancerNotFound",
    "NoSuchBucket",
];

/// Check a raw error code against the known "not found" set.
pub fn is_not_found_code(code: &str) -> bool {
    NOT_FOUND_CODES.contains(&code)
}

/// Check whether a service error means the resource no longer exists.
pub fn is_not_found(err: &impl ProvideErrorMetadata) -> bool {
    err.code().map(is_not_found_code).unwrap_or(false)
}

/// Render a service error with its provider code and message when available,
/// falling back to the error's own display form.
pub fn render_error<E>(err: &E) -> String
where
    E: ProvideErrorMetadata + std::fmt::Display,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => err.to_string(),
    }
}
