//! Run engine: discovery → preview → confirmation → deletion → report
//!
//! Drives one run through its lifecycle and guarantees the failure-handling
//! contract: validation errors fail before any listing, a declined or failed
//! confirmation deletes nothing, and deletion always ends with a complete
//! accounting.

use crate::confirm::ConfirmationGate;
use crate::nuke::adapter::AdapterRegistry;
use crate::nuke::deletion::DeletionOrchestrator;
use crate::nuke::discovery::DiscoveryOrchestrator;
use cloudreaper_common::{
    AgeCutoff, DiscoveryError, Inventory, NukeError, NukeFilter, NukeOutcome, RegionScope,
    UndatedPolicy,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Lifecycle of a run. `Aborted` is terminal with zero deletions performed;
/// `Reported` is terminal whether or not failures occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Scoped,
    Discovered,
    AwaitingConfirmation,
    Aborted,
    Deleting,
    Reported,
}

/// Read-only inputs for one run, computed once at start.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Full set of valid regions for the provider
    pub known_regions: Vec<String>,
    /// User-supplied region exclusions (validated against `known_regions`)
    pub excluded_regions: Vec<String>,
    /// Age cutoff computed from `--older-than`
    pub cutoff: AgeCutoff,
    /// Policy for resources with no creation time
    pub undated: UndatedPolicy,
    /// Region global list calls are issued from
    pub home_region: String,
    /// Bound on concurrent (kind, region) units
    pub parallelism: usize,
    /// Escalate discovery errors to a run failure instead of skip-and-report
    pub fail_on_discovery_error: bool,
}

/// Presentation hooks the engine calls between phases.
pub trait RunReporter: Send + Sync {
    /// Inventory preview shown before the confirmation gate.
    fn preview(&self, inventory: &Inventory, errors: &[DiscoveryError]);

    /// Called instead of `preview` when filtering leaves nothing to delete.
    fn nothing_to_nuke(&self);
}

/// Final accounting for a run.
#[derive(Debug)]
pub struct RunSummary {
    /// Terminal phase: `Reported` or `Aborted`
    pub phase: RunPhase,
    /// Deletion accounting; `None` when no deletion was attempted
    pub outcome: Option<NukeOutcome>,
    /// Discovery units that failed (skip-and-report mode)
    pub discovery_errors: Vec<DiscoveryError>,
}

impl RunSummary {
    /// Translate the accounting into the process-level result: aggregate
    /// error when any deletion failed, `Ok` otherwise (including aborts and
    /// empty runs).
    pub fn into_result(self) -> Result<Self, NukeError> {
        let Self {
            phase,
            outcome,
            discovery_errors,
        } = self;
        let outcome = outcome.map(NukeOutcome::into_result).transpose()?;
        Ok(Self {
            phase,
            outcome,
            discovery_errors,
        })
    }
}

/// One discovery-filter-confirm-delete run.
pub struct NukeRun {
    registry: Arc<AdapterRegistry>,
    gate: Box<dyn ConfirmationGate>,
    settings: RunSettings,
    phase: RunPhase,
}

impl NukeRun {
    pub fn new(
        registry: AdapterRegistry,
        gate: Box<dyn ConfirmationGate>,
        settings: RunSettings,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            gate,
            settings,
            phase: RunPhase::Idle,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Execute the run to a terminal phase.
    pub async fn run(mut self, reporter: &dyn RunReporter) -> Result<RunSummary, NukeError> {
        // Idle → Scoped. Rejecting a bad exclusion here means no listing call
        // is ever made for a command that was going to fail anyway.
        let scope = RegionScope::resolve(
            self.settings.known_regions.clone(),
            &self.settings.excluded_regions,
        )?;
        self.phase = RunPhase::Scoped;
        debug!(regions = scope.len(), "Scope resolved");

        // Scoped → Discovered
        let discovery = DiscoveryOrchestrator::new(
            Arc::clone(&self.registry),
            NukeFilter::new(self.settings.cutoff, self.settings.undated),
            self.settings.home_region.clone(),
            self.settings.parallelism,
        );
        let report = discovery.discover(&scope).await;
        self.phase = RunPhase::Discovered;
        info!(
            resources = report.inventory.len(),
            failed_units = report.errors.len(),
            "Discovery complete"
        );

        if self.settings.fail_on_discovery_error && !report.errors.is_empty() {
            return Err(NukeError::Discovery(report.errors));
        }

        if report.inventory.is_empty() {
            reporter.nothing_to_nuke();
            self.phase = RunPhase::Reported;
            return Ok(RunSummary {
                phase: self.phase,
                outcome: None,
                discovery_errors: report.errors,
            });
        }

        // Discovered → AwaitingConfirmation
        reporter.preview(&report.inventory, &report.errors);
        self.phase = RunPhase::AwaitingConfirmation;

        let confirmed = self
            .gate
            .confirm()
            .await
            .map_err(|e| NukeError::Confirmation(format!("{e:#}")))?;

        if !confirmed {
            info!("Run aborted at confirmation; nothing was deleted");
            self.phase = RunPhase::Aborted;
            return Ok(RunSummary {
                phase: self.phase,
                outcome: None,
                discovery_errors: report.errors,
            });
        }

        // AwaitingConfirmation → Deleting → Reported
        self.phase = RunPhase::Deleting;
        let deletion =
            DeletionOrchestrator::new(Arc::clone(&self.registry), self.settings.parallelism);
        let outcome = deletion.delete_all(report.inventory).await;
        self.phase = RunPhase::Reported;
        info!(
            attempted = outcome.attempted,
            deleted = outcome.deleted,
            failed = outcome.failed(),
            "Deletion complete"
        );

        Ok(RunSummary {
            phase: self.phase,
            outcome: Some(outcome),
            discovery_errors: report.errors,
        })
    }
}
