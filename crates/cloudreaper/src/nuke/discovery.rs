//! Discovery orchestrator
//!
//! Fans the adapter registry out across every (kind, region) unit of work,
//! applies the filter to each descriptor, and merges results into the
//! inventory on the collecting task. A unit's failure is isolated: it
//! contributes an error entry and nothing else.

use crate::nuke::adapter::{AdapterRegistry, ListScope, ResourceAdapter};
use cloudreaper_common::{DiscoveryError, Inventory, NukeFilter, RegionScope};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything discovery produces: the inventory plus a side list of failed
/// units, both complete before any confirmation step.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub inventory: Inventory,
    pub errors: Vec<DiscoveryError>,
}

pub struct DiscoveryOrchestrator {
    registry: Arc<AdapterRegistry>,
    filter: NukeFilter,
    /// Region global list calls are issued from
    home_region: String,
    /// Concurrent (kind, region) units in flight
    parallelism: usize,
}

impl DiscoveryOrchestrator {
    pub fn new(
        registry: Arc<AdapterRegistry>,
        filter: NukeFilter,
        home_region: impl Into<String>,
        parallelism: usize,
    ) -> Self {
        Self {
            registry,
            filter,
            home_region: home_region.into(),
            parallelism: parallelism.max(1),
        }
    }

    /// Discover all candidate resources in scope.
    ///
    /// Units run concurrently up to the parallelism bound; results are merged
    /// here on the awaiting task as each unit completes, so a slow unit never
    /// blocks collection of finished ones.
    pub async fn discover(&self, scope: &RegionScope) -> DiscoveryReport {
        let units = self.units(scope);
        debug!(units = units.len(), regions = scope.len(), "Starting discovery");

        let mut results = stream::iter(units)
            .map(|(adapter, region)| async move {
                let kind = adapter.kind();
                let listed = adapter.list(&region).await;
                (kind, region, listed)
            })
            .buffer_unordered(self.parallelism);

        // Merge each unit as it completes; a slow unit never holds up the
        // results of finished ones.
        let mut report = DiscoveryReport::default();
        while let Some((kind, region, result)) = results.next().await {
            match result {
                Ok(descriptors) => {
                    let found = descriptors.len();
                    report.inventory.extend(
                        descriptors
                            .into_iter()
                            .filter(|d| self.filter.includes(d, scope)),
                    );
                    debug!(kind = %kind, region = %region, found, "Listed resources");
                }
                Err(e) => {
                    warn!(kind = %kind, region = %region, error = ?e, "Discovery unit failed");
                    report.errors.push(DiscoveryError {
                        kind,
                        region,
                        message: format!("{e:#}"),
                    });
                }
            }
        }

        // Completion order is nondeterministic; the error list is not.
        report
            .errors
            .sort_by(|a, b| (a.kind, &a.region).cmp(&(b.kind, &b.region)));

        report
    }

    /// Expand the registry into (adapter, region) units. Global adapters get
    /// exactly one unit regardless of scope size.
    fn units(&self, scope: &RegionScope) -> Vec<(Arc<dyn ResourceAdapter>, String)> {
        let mut units = Vec::new();
        for adapter in self.registry.adapters() {
            match adapter.list_scope() {
                ListScope::Global => {
                    units.push((Arc::clone(adapter), self.home_region.clone()));
                }
                ListScope::Regional => {
                    for region in scope.regions() {
                        units.push((Arc::clone(adapter), region.to_string()));
                    }
                }
            }
        }
        units
    }
}
