//! Elastic IP adapter
//!
//! Allocations report no creation time, so every Elastic IP falls under the
//! undated policy.

use crate::aws::context::AwsContext;
use crate::aws::error::{is_not_found, render_error};
use crate::nuke::adapter::ResourceAdapter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use tracing::{debug, info};

pub struct ElasticIpAdapter {
    ctx: AwsContext,
}

impl ElasticIpAdapter {
    pub fn new(ctx: &AwsContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

#[async_trait]
impl ResourceAdapter for ElasticIpAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::ElasticIp
    }

    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>> {
        let client = self.ctx.ec2_client(region);

        let response = client
            .describe_addresses()
            .send()
            .await
            .context("Failed to describe addresses")?;

        let mut resources = Vec::new();
        for address in response.addresses() {
            // VPC allocations only; EC2-Classic addresses have no allocation ID
            let Some(allocation_id) = address.allocation_id() else {
                continue;
            };
            let mut descriptor =
                ResourceDescriptor::new(ResourceKind::ElasticIp, region, allocation_id);
            if let Some(public_ip) = address.public_ip() {
                descriptor = descriptor.with_name(public_ip);
            }
            resources.push(descriptor);
        }

        debug!(region = %region, count = resources.len(), "Found Elastic IPs");
        Ok(resources)
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        let client = self.ctx.ec2_client(region);
        let mut failures = Vec::new();

        for descriptor in resources {
            match client
                .release_address()
                .allocation_id(&descriptor.id)
                .send()
                .await
            {
                Ok(_) => {
                    info!(allocation_id = %descriptor.id, region = %region, "Released Elastic IP");
                }
                Err(e) if is_not_found(&e) => {}
                Err(e) => failures.push(ResourceFailure::new(descriptor, render_error(&e))),
            }
        }

        failures
    }
}
