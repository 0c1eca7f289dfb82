//! Deletion orchestrator
//!
//! Attempts every confirmed batch exactly once. Batches are processed in
//! deletion-priority tiers (dependency order); batches within a tier run
//! concurrently. No batch failure ever stops another batch, and every failure
//! ends up in the outcome.

use crate::nuke::adapter::AdapterRegistry;
use cloudreaper_common::{
    BatchKey, Inventory, NukeOutcome, ResourceDescriptor, ResourceFailure,
};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct DeletionOrchestrator {
    registry: Arc<AdapterRegistry>,
    parallelism: usize,
}

impl DeletionOrchestrator {
    pub fn new(registry: Arc<AdapterRegistry>, parallelism: usize) -> Self {
        Self {
            registry,
            parallelism: parallelism.max(1),
        }
    }

    /// Delete every batch in the inventory, collecting all failures.
    pub async fn delete_all(&self, inventory: Inventory) -> NukeOutcome {
        let mut tiers: BTreeMap<u8, Vec<(BatchKey, Vec<ResourceDescriptor>)>> = BTreeMap::new();
        for (key, batch) in inventory.into_batches() {
            tiers
                .entry(key.kind.deletion_priority())
                .or_default()
                .push((key, batch));
        }

        let mut outcome = NukeOutcome::default();
        for (tier, batches) in tiers {
            debug!(tier, batches = batches.len(), "Deleting batch tier");

            let mut results = stream::iter(batches)
                .map(|(key, batch)| async move {
                    let size = batch.len();
                    let failures = self.delete_batch(&key, batch).await;
                    (key, size, failures)
                })
                .buffer_unordered(self.parallelism);

            // Collect each batch's accounting as it completes
            while let Some((key, attempted, failures)) = results.next().await {
                if failures.is_empty() {
                    info!(kind = %key.kind, region = %key.region, count = attempted, "Batch deleted");
                } else {
                    warn!(
                        kind = %key.kind,
                        region = %key.region,
                        attempted,
                        failed = failures.len(),
                        "Batch finished with failures"
                    );
                }
                outcome.record_batch(attempted, failures);
            }
        }

        outcome.sort_failures();
        outcome
    }

    async fn delete_batch(
        &self,
        key: &BatchKey,
        batch: Vec<ResourceDescriptor>,
    ) -> Vec<ResourceFailure> {
        match self.registry.get(key.kind) {
            Some(adapter) => adapter.delete(&key.region, &batch).await,
            // Only reachable if the inventory didn't come from this registry
            None => batch
                .iter()
                .map(|d| ResourceFailure::new(d, "no adapter registered for kind"))
                .collect(),
        }
    }
}
