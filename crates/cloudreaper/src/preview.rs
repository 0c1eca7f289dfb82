//! Inventory preview rendering
//!
//! The operator reviews exactly this output before confirming, so it is
//! grouped per kind and region and stable across identical runs.

use crate::nuke::engine::RunReporter;
use cloudreaper_common::{DiscoveryError, Inventory};
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected 'table' or 'json')"
            )),
        }
    }
}

/// Prints the preview to stdout and discovery problems to the log.
pub struct ConsoleReporter {
    format: OutputFormat,
}

impl ConsoleReporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn print_table(inventory: &Inventory) {
        println!(
            "\nThe following {} resources are going to be nuked:\n",
            inventory.len()
        );
        println!(
            "{:<14} {:<34} {:<24} {:<16} {:<20}",
            "KIND", "ID", "NAME", "REGION", "CREATED"
        );
        println!("{}", "-".repeat(110));

        for descriptor in inventory.iter() {
            println!(
                "{:<14} {:<34} {:<24} {:<16} {:<20}",
                descriptor.kind.as_str(),
                truncate(&descriptor.id, 33),
                truncate(descriptor.name.as_deref().unwrap_or("-"), 23),
                descriptor.region,
                descriptor
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
    }

    fn print_json(inventory: &Inventory) {
        let descriptors: Vec<_> = inventory.iter().collect();
        match serde_json::to_string_pretty(&descriptors) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = ?e, "Failed to serialize inventory"),
        }
    }
}

impl RunReporter for ConsoleReporter {
    fn preview(&self, inventory: &Inventory, errors: &[DiscoveryError]) {
        for error in errors {
            warn!(kind = %error.kind, region = %error.region, message = %error.message, "Discovery unit skipped");
        }

        match self.format {
            OutputFormat::Table => Self::print_table(inventory),
            OutputFormat::Json => Self::print_json(inventory),
        }
    }

    fn nothing_to_nuke(&self) {
        println!("Nothing to nuke, you're all good!");
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() > max {
        format!("{}...", &s[..max.saturating_sub(3)])
    } else {
        s.to_string()
    }
}
