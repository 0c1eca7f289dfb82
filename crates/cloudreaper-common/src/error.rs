//! Error taxonomy for a nuke run
//!
//! Pre-discovery validation errors fail fast; deletion errors are collected
//! and only surface in aggregate after every batch has been attempted.

use crate::outcome::ResourceFailure;
use crate::resource_kind::ResourceKind;
use thiserror::Error;

/// A single (kind, region) listing call that failed during discovery.
///
/// Isolated to its unit of work: it never contaminates other units' results
/// and does not by itself fail the run unless the caller opted into that.
#[derive(Debug, Clone, Error)]
#[error("listing {kind} in {region} failed: {message}")]
pub struct DiscoveryError {
    pub kind: ResourceKind,
    pub region: String,
    pub message: String,
}

/// Top-level error type for a run.
#[derive(Debug, Error)]
pub enum NukeError {
    /// User-supplied exclusion not in the valid region set; rejected before
    /// any listing call is made.
    #[error("invalid value '{value}' for --{flag}: not a known region")]
    InvalidScope { flag: &'static str, value: String },

    /// Malformed `--older-than` value; rejected before any listing call.
    #[error("invalid duration '{value}': {reason}")]
    DurationParse { value: String, reason: String },

    /// Discovery failures escalated to a run failure (opt-in).
    #[error("{}", format_discovery_errors(.0))]
    Discovery(Vec<DiscoveryError>),

    /// Failure to read the operator's confirmation; no deletions attempted.
    #[error("failed to read confirmation: {0}")]
    Confirmation(String),

    /// One or more resources failed to delete. Every failure is listed; every
    /// other batch was still attempted.
    #[error("{}", format_failures(.0))]
    Aggregate(Vec<ResourceFailure>),
}

fn format_discovery_errors(errors: &[DiscoveryError]) -> String {
    let mut out = format!("{} discovery call(s) failed:", errors.len());
    for e in errors {
        out.push_str("\n  - ");
        out.push_str(&e.to_string());
    }
    out
}

fn format_failures(failures: &[ResourceFailure]) -> String {
    let mut out = format!("{} resource(s) failed to delete:", failures.len());
    for f in failures {
        out.push_str("\n  - ");
        out.push_str(&f.to_string());
    }
    out
}
