//! Per-run deletion accounting

use crate::descriptor::ResourceDescriptor;
use crate::error::NukeError;
use crate::resource_kind::ResourceKind;
use serde::Serialize;
use std::fmt;

/// One resource that could not be deleted, with enough identifying context to
/// locate it manually (there is no automatic retry).
#[derive(Debug, Clone, Serialize)]
pub struct ResourceFailure {
    pub kind: ResourceKind,
    pub region: String,
    pub id: String,
    pub name: Option<String>,
    pub error: String,
}

impl ResourceFailure {
    pub fn new(descriptor: &ResourceDescriptor, error: impl Into<String>) -> Self {
        Self {
            kind: descriptor.kind,
            region: descriptor.region.clone(),
            id: descriptor.id.clone(),
            name: descriptor.name.clone(),
            error: error.into(),
        }
    }
}

impl fmt::Display for ResourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(
                f,
                "{} '{}' ({}) in {}: {}",
                self.kind, self.id, name, self.region, self.error
            ),
            None => write!(
                f,
                "{} '{}' in {}: {}",
                self.kind, self.id, self.region, self.error
            ),
        }
    }
}

/// Run-level aggregate of every deletion attempt.
///
/// A failed resource stays in the report no matter what happens to the other
/// batches; the run is only judged after every batch has been attempted.
#[derive(Debug, Default)]
pub struct NukeOutcome {
    /// Total resources a delete call was issued for
    pub attempted: usize,
    /// Resources confirmed deleted
    pub deleted: usize,
    /// Every individual failure, in stable (priority, kind, region, id) order
    pub failures: Vec<ResourceFailure>,
}

impl NukeOutcome {
    /// Record one batch: how many were attempted and which of them failed.
    pub fn record_batch(&mut self, attempted: usize, failures: Vec<ResourceFailure>) {
        self.attempted += attempted;
        self.deleted += attempted - failures.len();
        self.failures.extend(failures);
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Sort the failure list into the same stable order the inventory uses.
    pub fn sort_failures(&mut self) {
        self.failures.sort_by(|a, b| {
            (a.kind.deletion_priority(), a.kind, a.region.as_str(), a.id.as_str()).cmp(&(
                b.kind.deletion_priority(),
                b.kind,
                b.region.as_str(),
                b.id.as_str(),
            ))
        });
    }

    /// Convert the accounting into the run result: `Ok` when every deletion
    /// succeeded, otherwise one aggregate error listing every failure.
    pub fn into_result(self) -> Result<Self, NukeError> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(NukeError::Aggregate(self.failures))
        }
    }
}
