//! Run inventory grouped by (kind, region) batches

use crate::descriptor::ResourceDescriptor;
use crate::resource_kind::ResourceKind;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Key identifying one (kind, region) unit of work.
///
/// Ordering follows deletion priority, then kind, then region, which makes
/// inventory iteration (and therefore the preview and the failure report)
/// stable within a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchKey {
    pub kind: ResourceKind,
    pub region: String,
}

impl BatchKey {
    pub fn new(kind: ResourceKind, region: impl Into<String>) -> Self {
        Self {
            kind,
            region: region.into(),
        }
    }
}

impl Ord for BatchKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.kind.deletion_priority(), self.kind, &self.region).cmp(&(
            other.kind.deletion_priority(),
            other.kind,
            &other.region,
        ))
    }
}

impl PartialOrd for BatchKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Everything discovered in one run, grouped into deletion batches.
///
/// Built once per run and consumed once by deletion; it is never partially
/// updated after discovery completes. Within a batch, descriptors keep their
/// discovery order.
#[derive(Debug, Default)]
pub struct Inventory {
    batches: BTreeMap<BatchKey, Vec<ResourceDescriptor>>,
    len: usize,
}

impl Inventory {
    pub fn push(&mut self, descriptor: ResourceDescriptor) {
        self.batches
            .entry(BatchKey::new(descriptor.kind, descriptor.region.clone()))
            .or_default()
            .push(descriptor);
        self.len += 1;
    }

    pub fn extend(&mut self, descriptors: impl IntoIterator<Item = ResourceDescriptor>) {
        for d in descriptors {
            self.push(d);
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Batches in stable (priority, kind, region) order.
    pub fn batches(&self) -> impl Iterator<Item = (&BatchKey, &[ResourceDescriptor])> {
        self.batches.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn into_batches(self) -> impl Iterator<Item = (BatchKey, Vec<ResourceDescriptor>)> {
        self.batches.into_iter()
    }

    /// All descriptors in stable order, for preview rendering.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.batches.values().flatten()
    }
}
