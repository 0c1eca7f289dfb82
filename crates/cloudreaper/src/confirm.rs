//! Confirmation gate implementations
//!
//! The one cancellation point in the whole flow. Either an interactive prompt
//! requiring the literal `nuke`, or (with `--force`) a logged countdown that
//! proceeds automatically — never a silent bypass.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Go/no-go decision point between preview and deletion.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    /// Returns `Ok(true)` to proceed with deletion. An error means the
    /// decision could not be read; the caller must not delete anything.
    async fn confirm(&self) -> Result<bool>;
}

/// Interactive prompt. Proceeds only on the literal `nuke` (case-insensitive,
/// anything else aborts).
pub struct InteractivePrompt;

#[async_trait]
impl ConfirmationGate for InteractivePrompt {
    async fn confirm(&self) -> Result<bool> {
        let input = tokio::task::spawn_blocking(|| {
            println!(
                "\n\x1b[1;31mTHE NEXT STEP DESTROYS EVERY RESOURCE LISTED ABOVE AND CANNOT BE UNDONE.\x1b[0m"
            );
            dialoguer::Input::<String>::new()
                .with_prompt("Are you sure? Type 'nuke' to confirm")
                .allow_empty(true)
                .interact_text()
        })
        .await
        .context("Confirmation prompt task failed")?
        .context("Failed to read confirmation input")?;

        Ok(input.trim().eq_ignore_ascii_case("nuke"))
    }
}

/// `--force` path: waits out a fixed, visible countdown and then proceeds.
pub struct ForcedCountdown {
    delay_secs: u64,
}

impl ForcedCountdown {
    pub fn new(delay_secs: u64) -> Self {
        Self { delay_secs }
    }
}

impl Default for ForcedCountdown {
    fn default() -> Self {
        Self::new(10)
    }
}

#[async_trait]
impl ConfirmationGate for ForcedCountdown {
    async fn confirm(&self) -> Result<bool> {
        use std::io::Write;

        warn!(
            delay_secs = self.delay_secs,
            "--force is set; proceeding to delete everything listed. Hit CTRL+C now to abort"
        );
        for remaining in (1..=self.delay_secs).rev() {
            print!("{remaining}...");
            let _ = std::io::stdout().flush();
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        if self.delay_secs > 0 {
            println!();
        }
        Ok(true)
    }
}
