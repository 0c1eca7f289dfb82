//! EBS snapshot adapter

use crate::aws::context::AwsContext;
use crate::aws::error::{is_not_found, render_error};
use crate::aws::to_chrono;
use crate::nuke::adapter::ResourceAdapter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use tracing::{debug, info};

pub struct SnapshotAdapter {
    ctx: AwsContext,
}

impl SnapshotAdapter {
    pub fn new(ctx: &AwsContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

#[async_trait]
impl ResourceAdapter for SnapshotAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Snapshot
    }

    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>> {
        let client = self.ctx.ec2_client(region);

        let mut resources = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = client.describe_snapshots().owner_ids("self");
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }

            let response = request
                .send()
                .await
                .context("Failed to describe snapshots")?;

            for snapshot in response.snapshots() {
                let Some(snapshot_id) = snapshot.snapshot_id() else {
                    continue;
                };
                resources.push(
                    ResourceDescriptor::new(ResourceKind::Snapshot, region, snapshot_id)
                        .with_created_at(snapshot.start_time().and_then(to_chrono)),
                );
            }

            match response.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(region = %region, count = resources.len(), "Found EBS snapshots");
        Ok(resources)
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        let client = self.ctx.ec2_client(region);
        let mut failures = Vec::new();

        for descriptor in resources {
            match client
                .delete_snapshot()
                .snapshot_id(&descriptor.id)
                .send()
                .await
            {
                Ok(_) => {
                    info!(snapshot = %descriptor.id, region = %region, "Deleted snapshot");
                }
                Err(e) if is_not_found(&e) => {}
                Err(e) => failures.push(ResourceFailure::new(descriptor, render_error(&e))),
            }
        }

        failures
    }
}
