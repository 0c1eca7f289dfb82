//! Auto Scaling group adapter
//!
//! ASGs are the highest-priority kind: deleting an instance an ASG still
//! manages just makes the group launch a replacement.

use crate::aws::context::AwsContext;
use crate::aws::error::render_error;
use crate::aws::to_chrono;
use crate::nuke::adapter::ResourceAdapter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use tracing::{debug, info};

pub struct AutoScalingGroupAdapter {
    ctx: AwsContext,
}

impl AutoScalingGroupAdapter {
    pub fn new(ctx: &AwsContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

#[async_trait]
impl ResourceAdapter for AutoScalingGroupAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::AutoScalingGroup
    }

    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>> {
        let client = self.ctx.autoscaling_client(region);

        let mut resources = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = client.describe_auto_scaling_groups();
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }

            let response = request
                .send()
                .await
                .context("Failed to describe Auto Scaling groups")?;

            for group in response.auto_scaling_groups() {
                let Some(name) = group.auto_scaling_group_name() else {
                    continue;
                };
                resources.push(
                    ResourceDescriptor::new(ResourceKind::AutoScalingGroup, region, name)
                        .with_created_at(group.created_time().and_then(to_chrono)),
                );
            }

            match response.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(region = %region, count = resources.len(), "Found Auto Scaling groups");
        Ok(resources)
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        let client = self.ctx.autoscaling_client(region);
        let mut failures = Vec::new();

        for descriptor in resources {
            match client
                .delete_auto_scaling_group()
                .auto_scaling_group_name(&descriptor.id)
                .force_delete(true)
                .send()
                .await
            {
                Ok(_) => {
                    info!(asg = %descriptor.id, region = %region, "Deleted Auto Scaling group");
                }
                Err(e) => failures.push(ResourceFailure::new(descriptor, render_error(&e))),
            }
        }

        failures
    }
}
