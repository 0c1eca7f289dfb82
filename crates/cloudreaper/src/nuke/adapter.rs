//! Resource adapter capability and registry
//!
//! Each resource kind implements one adapter. The orchestrators only ever see
//! this trait, so adding a kind means registering one implementation and never
//! touching discovery or deletion code.

use anyhow::Result;
use async_trait::async_trait;
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use std::sync::Arc;

/// Whether an adapter's list call is per-region or account-global.
///
/// Global kinds (S3 buckets) are queried once per run no matter how many
/// regions are in scope; their descriptors still report each resource's
/// native region so filtering stays uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    Regional,
    Global,
}

/// Capability interface every supported resource kind implements.
#[async_trait]
pub trait ResourceAdapter: Send + Sync {
    /// The kind this adapter lists and deletes.
    fn kind(&self) -> ResourceKind;

    /// Regional adapters are listed once per in-scope region.
    fn list_scope(&self) -> ListScope {
        ListScope::Regional
    }

    /// List candidate resources. For regional adapters, `region` is the
    /// region under query; for global adapters it is the home region to issue
    /// the call from. Descriptors report their own native region.
    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>>;

    /// Delete one batch of resources in `region`. Returns per-resource
    /// failures; an empty vec means the whole batch succeeded. A resource
    /// that is already gone counts as deleted.
    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure>;
}

/// Registry of adapters for one provider.
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn ResourceAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, adapter: Arc<dyn ResourceAdapter>) {
        self.adapters.push(adapter);
    }

    pub fn adapters(&self) -> &[Arc<dyn ResourceAdapter>] {
        &self.adapters
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&Arc<dyn ResourceAdapter>> {
        self.adapters.iter().find(|a| a.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<ResourceKind> = self.adapters.iter().map(|a| a.kind()).collect();
        f.debug_struct("AdapterRegistry").field("kinds", &kinds).finish()
    }
}
