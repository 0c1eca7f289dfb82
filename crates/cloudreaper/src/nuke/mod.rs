//! Discovery-filter-confirm-delete orchestration
//!
//! - [`adapter`]: The per-kind capability interface and registry
//! - [`discovery`]: Fan-out listing across (kind, region) units
//! - [`deletion`]: Tiered, fail-everything-forward batch deletion
//! - [`engine`]: The run lifecycle driver

pub mod adapter;
pub mod deletion;
pub mod discovery;
pub mod engine;

pub use adapter::{AdapterRegistry, ListScope, ResourceAdapter};
pub use deletion::DeletionOrchestrator;
pub use discovery::{DiscoveryOrchestrator, DiscoveryReport};
pub use engine::{NukeRun, RunPhase, RunReporter, RunSettings, RunSummary};
