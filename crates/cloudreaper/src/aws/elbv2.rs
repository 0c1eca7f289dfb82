//! Application/Network Load Balancer (ELBv2) adapter
//!
//! Identified by ARN; the short name is kept for display only.

use crate::aws::context::AwsContext;
use crate::aws::error::{is_not_found, render_error};
use crate::aws::to_chrono;
use crate::nuke::adapter::ResourceAdapter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use tracing::{debug, info};

pub struct LoadBalancerV2Adapter {
    ctx: AwsContext,
}

impl LoadBalancerV2Adapter {
    pub fn new(ctx: &AwsContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

#[async_trait]
impl ResourceAdapter for LoadBalancerV2Adapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::LoadBalancerV2
    }

    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>> {
        let client = self.ctx.elbv2_client(region);

        let mut resources = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut request = client.describe_load_balancers();
            if let Some(m) = &marker {
                request = request.marker(m);
            }

            let response = request
                .send()
                .await
                .context("Failed to describe v2 load balancers")?;

            for lb in response.load_balancers() {
                let Some(arn) = lb.load_balancer_arn() else {
                    continue;
                };
                let mut descriptor =
                    ResourceDescriptor::new(ResourceKind::LoadBalancerV2, region, arn)
                        .with_created_at(lb.created_time().and_then(to_chrono));
                if let Some(name) = lb.load_balancer_name() {
                    descriptor = descriptor.with_name(name);
                }
                resources.push(descriptor);
            }

            match response.next_marker() {
                Some(m) if !m.is_empty() => marker = Some(m.to_string()),
                _ => break,
            }
        }

        debug!(region = %region, count = resources.len(), "Found v2 load balancers");
        Ok(resources)
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        let client = self.ctx.elbv2_client(region);
        let mut failures = Vec::new();

        for descriptor in resources {
            match client
                .delete_load_balancer()
                .load_balancer_arn(&descriptor.id)
                .send()
                .await
            {
                Ok(_) => {
                    info!(elbv2 = %descriptor.display_name(), region = %region, "Deleted v2 load balancer");
                }
                Err(e) if is_not_found(&e) => {}
                Err(e) => failures.push(ResourceFailure::new(descriptor, render_error(&e))),
            }
        }

        failures
    }
}
