//! Region enumeration

use crate::aws::context::AwsContext;
use anyhow::{Context, Result};
use tracing::debug;

/// Enumerate the regions enabled for this account via `DescribeRegions`.
///
/// Opt-in regions the account has not enabled are excluded, so the scope
/// never contains a region no list call could succeed in. Sorted for stable
/// downstream ordering.
pub async fn enabled_regions(ctx: &AwsContext, bootstrap_region: &str) -> Result<Vec<String>> {
    let client = ctx.ec2_client(bootstrap_region);

    let response = client
        .describe_regions()
        .send()
        .await
        .context("Failed to enumerate AWS regions")?;

    let mut regions: Vec<String> = response
        .regions()
        .iter()
        .filter_map(|r| r.region_name().map(str::to_string))
        .collect();
    regions.sort();

    debug!(count = regions.len(), "Enumerated enabled regions");
    Ok(regions)
}
