//! cloudreaper: deletes cloud resources across an account. THE EFFECTS ARE
//! IRREVERSIBLE.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cloudreaper::aws::{self, AwsContext};
use cloudreaper::confirm::{ConfirmationGate, ForcedCountdown, InteractivePrompt};
use cloudreaper::nuke::{NukeRun, RunPhase, RunSettings};
use cloudreaper::preview::{ConsoleReporter, OutputFormat};
use cloudreaper_common::{AgeCutoff, UndatedPolicy, parse_duration};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cloudreaper")]
#[command(
    about = "Deletes cloud resources across an account. EVERYTHING IT REMOVES IS GONE FOR GOOD"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Nuke AWS resources (ASGs, load balancers, EC2, AMIs, snapshots,
    /// volumes, Elastic IPs, S3 buckets)
    Aws(AwsArgs),
}

#[derive(clap::Args, Debug)]
struct AwsArgs {
    /// Region to exclude from discovery and deletion (repeatable)
    #[arg(long = "exclude-region", value_name = "REGION")]
    exclude_region: Vec<String>,

    /// Only delete resources older than this duration (e.g. 30s, 10m, 8h, 2d)
    #[arg(long, default_value = "0s")]
    older_than: String,

    /// Skip the confirmation prompt. Deletion proceeds automatically after a
    /// 10 second countdown
    #[arg(long)]
    force: bool,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long)]
    profile: Option<String>,

    /// Maximum concurrent (kind, region) API calls
    #[arg(long, default_value = "8")]
    parallelism: usize,

    /// Policy for resources with no knowable creation time (eligible, excluded)
    #[arg(long, default_value = "eligible", value_name = "POLICY")]
    undated: String,

    /// Fail the run if any discovery call fails, instead of skipping the unit
    #[arg(long)]
    fail_on_discovery_error: bool,

    /// Preview output format (table, json)
    #[arg(long, default_value = "table")]
    output: String,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Aws(args) => nuke_aws(args).await,
    }
}

async fn nuke_aws(args: AwsArgs) -> Result<()> {
    // Flag validation fails before any network call is made
    let age = parse_duration(&args.older_than)?;
    let undated: UndatedPolicy = args.undated.parse().map_err(anyhow::Error::msg)?;
    let output: OutputFormat = args.output.parse().map_err(anyhow::Error::msg)?;

    let ctx = AwsContext::load(args.profile.as_deref()).await;
    if let Some(profile) = &args.profile {
        info!(profile = %profile, "Using AWS profile");
    }

    let account = aws::get_current_account_id(&ctx).await?;
    info!(account = %account, older_than = %args.older_than, "Retrieving all active AWS resources");

    let known_regions = aws::enabled_regions(&ctx, aws::DEFAULT_REGION).await?;

    let gate: Box<dyn ConfirmationGate> = if args.force {
        Box::new(ForcedCountdown::default())
    } else {
        Box::new(InteractivePrompt)
    };

    let settings = RunSettings {
        known_regions,
        excluded_regions: args.exclude_region,
        cutoff: AgeCutoff::older_than(age),
        undated,
        home_region: aws::DEFAULT_REGION.to_string(),
        parallelism: args.parallelism,
        fail_on_discovery_error: args.fail_on_discovery_error,
    };

    let registry = aws::default_registry(&ctx);
    let reporter = ConsoleReporter::new(output);
    let summary = NukeRun::new(registry, gate, settings).run(&reporter).await?;

    if summary.phase == RunPhase::Aborted {
        info!("Aborted; no resources were deleted");
    } else if let Some(outcome) = &summary.outcome {
        println!("\n=== Nuke Report ===");
        println!("Attempted: {}", outcome.attempted);
        println!("Deleted:   {}", outcome.deleted);
        println!("Failed:    {}", outcome.failed());
    }

    // Any deletion failure becomes the aggregate run error and a non-zero exit
    summary.into_result()?;
    Ok(())
}
