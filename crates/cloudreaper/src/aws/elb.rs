//! Classic Elastic Load Balancer adapter

use crate::aws::context::AwsContext;
use crate::aws::error::render_error;
use crate::aws::to_chrono;
use crate::nuke::adapter::ResourceAdapter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use tracing::{debug, info};

pub struct LoadBalancerAdapter {
    ctx: AwsContext,
}

impl LoadBalancerAdapter {
    pub fn new(ctx: &AwsContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

#[async_trait]
impl ResourceAdapter for LoadBalancerAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::LoadBalancer
    }

    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>> {
        let client = self.ctx.elb_client(region);

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
                .context("Failed to describe classic load balancers")?;

            for lb in response.load_balancer_descriptions() {
                let Some(name) = lb.load_balancer_name() else {
                    continue;
                };
                resources.push(
                    ResourceDescriptor::new(ResourceKind::LoadBalancer, region, name)
                        .with_created_at(lb.created_time().and_then(to_chrono)),
                );
            }

            match response.next_marker() {
                Some(m) if !m.is_empty() => marker = Some(m.to_string()),
                _ => break,
            }
        }

        debug!(region = %region, count = resources.len(), "Found classic load balancers");
        Ok(resources)
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        let client = self.ctx.elb_client(region);
        let mut failures = Vec::new();

        for descriptor in resources {
            match client
                .delete_load_balancer()
                .load_balancer_name(&descriptor.id)
                .send()
                .await
            {
                Ok(_) => {
                    info!(elb = %descriptor.id, region = %region, "Deleted classic load balancer");
                }
                Err(e) => failures.push(ResourceFailure::new(descriptor, render_error(&e))),
            }
        }

        failures
    }
}
