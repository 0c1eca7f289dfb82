//! Discovered resource descriptors

use crate::resource_kind::ResourceKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single cloud resource found during discovery.
///
/// Descriptors are immutable once discovered; filtering drops them, nothing
/// mutates them. The creation time is optional because some kinds cannot
/// report one from their list call (Elastic IPs, for example).
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDescriptor {
    /// Resource category
    pub kind: ResourceKind,
    /// Native region of the resource (not the region queried)
    pub region: String,
    /// Stable provider identifier used for deletion
    pub id: String,
    /// Human-readable name, when the provider has one
    pub name: Option<String>,
    /// Creation/launch timestamp, when knowable
    pub created_at: Option<DateTime<Utc>>,
}

impl ResourceDescriptor {
    pub fn new(kind: ResourceKind, region: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind,
            region: region.into(),
            id: id.into(),
            name: None,
            created_at: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Name for display purposes, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
