//! Shared test doubles for engine tests
//!
//! In-process adapters, gates, and reporters so the orchestration engine can
//! be driven end-to-end without AWS.

use anyhow::bail;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cloudreaper::confirm::ConfirmationGate;
use cloudreaper::nuke::adapter::{ListScope, ResourceAdapter};
use cloudreaper::nuke::engine::RunReporter;
use cloudreaper_common::{
    DiscoveryError, Inventory, ResourceDescriptor, ResourceFailure, ResourceKind,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Adapter with canned listings and scriptable failures.
pub struct MockAdapter {
    kind: ResourceKind,
    scope: ListScope,
    resources: HashMap<String, Vec<ResourceDescriptor>>,
    fail_list_regions: Vec<String>,
    fail_delete_ids: Vec<String>,
    fail_whole_batch: bool,
    pub list_calls: AtomicUsize,
    pub deleted: Mutex<Vec<(String, Vec<String>)>>,
    delete_order: Option<Arc<Mutex<Vec<ResourceKind>>>>,
}

impl MockAdapter {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            scope: ListScope::Regional,
            resources: HashMap::new(),
            fail_list_regions: Vec::new(),
            fail_delete_ids: Vec::new(),
            fail_whole_batch: false,
            list_calls: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
            delete_order: None,
        }
    }

    pub fn global(mut self) -> Self {
        self.scope = ListScope::Global;
        self
    }

    /// Add a resource listed in `listed_region` (for global adapters this is
    /// the single unit; the descriptor's own region may differ).
    pub fn with_resource(mut self, listed_region: &str, descriptor: ResourceDescriptor) -> Self {
        self.resources
            .entry(listed_region.to_string())
            .or_default()
            .push(descriptor);
        self
    }

    pub fn fail_list_in(mut self, region: &str) -> Self {
        self.fail_list_regions.push(region.to_string());
        self
    }

    pub fn fail_delete_of(mut self, id: &str) -> Self {
        self.fail_delete_ids.push(id.to_string());
        self
    }

    pub fn fail_whole_batch(mut self) -> Self {
        self.fail_whole_batch = true;
        self
    }

    /// Record deletion order into a log shared with other adapters.
    pub fn record_order(mut self, log: Arc<Mutex<Vec<ResourceKind>>>) -> Self {
        self.delete_order = Some(log);
        self
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap()
            .iter()
            .flat_map(|(_, ids)| ids.clone())
            .collect()
    }
}

#[async_trait]
impl ResourceAdapter for MockAdapter {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn list_scope(&self) -> ListScope {
        self.scope
    }

    async fn list(&self, region: &str) -> anyhow::Result<Vec<ResourceDescriptor>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_list_regions.iter().any(|r| r == region) {
            bail!("simulated listing failure in {region}");
        }

        match self.scope {
            ListScope::Global => Ok(self.resources.values().flatten().cloned().collect()),
            ListScope::Regional => Ok(self.resources.get(region).cloned().unwrap_or_default()),
        }
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        if let Some(log) = &self.delete_order {
            log.lock().unwrap().push(self.kind);
        }

        if self.fail_whole_batch {
            return resources
                .iter()
                .map(|d| ResourceFailure::new(d, "simulated batch failure"))
                .collect();
        }

        let mut failures = Vec::new();
        let mut deleted = Vec::new();
        for descriptor in resources {
            if self.fail_delete_ids.iter().any(|id| id == &descriptor.id) {
                failures.push(ResourceFailure::new(descriptor, "simulated delete failure"));
            } else {
                deleted.push(descriptor.id.clone());
            }
        }

        self.deleted
            .lock()
            .unwrap()
            .push((region.to_string(), deleted));
        failures
    }
}

/// Gate behavior for one scripted run.
pub enum GateBehavior {
    Allow,
    Deny,
    Fail,
}

pub struct CannedGate {
    behavior: GateBehavior,
    pub calls: AtomicUsize,
}

impl CannedGate {
    pub fn new(behavior: GateBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationGate for CannedGate {
    async fn confirm(&self) -> anyhow::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            GateBehavior::Allow => Ok(true),
            GateBehavior::Deny => Ok(false),
            GateBehavior::Fail => bail!("simulated input failure"),
        }
    }
}

/// Gate adapter so an `Arc<CannedGate>` can be handed to the engine while the
/// test keeps its own handle for assertions.
pub struct SharedGate(pub Arc<CannedGate>);

#[async_trait]
impl ConfirmationGate for SharedGate {
    async fn confirm(&self) -> anyhow::Result<bool> {
        self.0.confirm().await
    }
}

/// Reporter that records what the operator would have seen.
#[derive(Default)]
pub struct RecordingReporter {
    pub previews: Mutex<Vec<Vec<String>>>,
    pub preview_errors: Mutex<Vec<usize>>,
    pub empty_calls: AtomicUsize,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previewed_ids(&self) -> Vec<Vec<String>> {
        self.previews.lock().unwrap().clone()
    }

    pub fn empty_count(&self) -> usize {
        self.empty_calls.load(Ordering::SeqCst)
    }
}

impl RunReporter for RecordingReporter {
    fn preview(&self, inventory: &Inventory, errors: &[DiscoveryError]) {
        let ids = inventory.iter().map(|d| d.id.clone()).collect();
        self.previews.lock().unwrap().push(ids);
        self.preview_errors.lock().unwrap().push(errors.len());
    }

    fn nothing_to_nuke(&self) {
        self.empty_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Descriptor shorthand for tests.
pub fn descriptor(
    kind: ResourceKind,
    region: &str,
    id: &str,
    created_at: Option<DateTime<Utc>>,
) -> ResourceDescriptor {
    ResourceDescriptor::new(kind, region, id).with_created_at(created_at)
}
