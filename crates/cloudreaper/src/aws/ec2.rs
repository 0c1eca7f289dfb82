//! EC2 instance adapter

use crate::aws::context::AwsContext;
use crate::aws::error::{is_not_found, render_error};
use crate::aws::to_chrono;
use crate::nuke::adapter::ResourceAdapter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_ec2::types::Filter;
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use tracing::{debug, info, warn};

pub struct Ec2InstanceAdapter {
    ctx: AwsContext,
}

impl Ec2InstanceAdapter {
    pub fn new(ctx: &AwsContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

#[async_trait]
impl ResourceAdapter for Ec2InstanceAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2Instance
    }

    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>> {
        let client = self.ctx.ec2_client(region);

        // Exclude instances that are already terminated or shutting down
        let state_filter = Filter::builder()
            .name("instance-state-name")
            .values("pending")
            .values("running")
            .values("stopping")
            .values("stopped")
            .build();

        let mut resources = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = client.describe_instances().filters(state_filter.clone());
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }

            let response = request
                .send()
                .await
                .context("Failed to describe instances")?;

            for reservation in response.reservations() {
                for instance in reservation.instances() {
                    let Some(instance_id) = instance.instance_id() else {
                        continue;
                    };

                    let name = instance
                        .tags()
                        .iter()
                        .find(|t| t.key() == Some("Name"))
                        .and_then(|t| t.value());

                    let mut descriptor =
                        ResourceDescriptor::new(ResourceKind::Ec2Instance, region, instance_id)
                            .with_created_at(instance.launch_time().and_then(to_chrono));
                    if let Some(name) = name {
                        descriptor = descriptor.with_name(name);
                    }
                    resources.push(descriptor);
                }
            }

            match response.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(region = %region, count = resources.len(), "Found EC2 instances");
        Ok(resources)
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        if resources.is_empty() {
            return Vec::new();
        }

        let client = self.ctx.ec2_client(region);
        let ids: Vec<String> = resources.iter().map(|d| d.id.clone()).collect();

        info!(count = ids.len(), region = %region, "Terminating instances in batch");

        match client
            .terminate_instances()
            .set_instance_ids(Some(ids))
            .send()
            .await
        {
            Ok(_) => Vec::new(),
            Err(e) => {
                // The whole call was rejected, so nothing terminated. Re-issue
                // per instance to attribute the error to the right resources.
                warn!(region = %region, error = %render_error(&e), "Batch terminate rejected; attributing per instance");

                let mut failures = Vec::new();
                for descriptor in resources {
                    match client
                        .terminate_instances()
                        .instance_ids(&descriptor.id)
                        .send()
                        .await
                    {
                        Ok(_) => {}
                        Err(e) if is_not_found(&e) => {}
                        Err(e) => failures.push(ResourceFailure::new(descriptor, render_error(&e))),
                    }
                }
                failures
            }
        }
    }
}
