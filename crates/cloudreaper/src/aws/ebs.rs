//! EBS volume adapter
//!
//! Volumes attached to running instances usually free up once the instance
//! tier has terminated them; an attached volume that still refuses deletion is
//! reported like any other failure.

use crate::aws::context::AwsContext;
use crate::aws::error::{is_not_found, render_error};
use crate::aws::to_chrono;
use crate::nuke::adapter::ResourceAdapter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_ec2::types::Filter;
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use tracing::{debug, info};

pub struct EbsVolumeAdapter {
    ctx: AwsContext,
}

impl EbsVolumeAdapter {
    pub fn new(ctx: &AwsContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

#[async_trait]
impl ResourceAdapter for EbsVolumeAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::EbsVolume
    }

    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>> {
        let client = self.ctx.ec2_client(region);

        // Exclude volumes already being deleted
        let state_filter = Filter::builder()
            .name("status")
            .values("creating")
            .values("available")
            .values("in-use")
            .values("error")
            .build();

        let mut resources = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = client.describe_volumes().filters(state_filter.clone());
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }

            let response = request.send().await.context("Failed to describe volumes")?;

            for volume in response.volumes() {
                let Some(volume_id) = volume.volume_id() else {
                    continue;
                };

                let name = volume
                    .tags()
                    .iter()
                    .find(|t| t.key() == Some("Name"))
                    .and_then(|t| t.value());

                let mut descriptor =
                    ResourceDescriptor::new(ResourceKind::EbsVolume, region, volume_id)
                        .with_created_at(volume.create_time().and_then(to_chrono));
                if let Some(name) = name {
                    descriptor = descriptor.with_name(name);
                }
                resources.push(descriptor);
            }

            match response.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(region = %region, count = resources.len(), "Found EBS volumes");
        Ok(resources)
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        let client = self.ctx.ec2_client(region);
        let mut failures = Vec::new();

        for descriptor in resources {
            match client
                .delete_volume()
                .volume_id(&descriptor.id)
                .send()
                .await
            {
                Ok(_) => {
                    info!(volume = %descriptor.id, region = %region, "Deleted volume");
                }
                Err(e) if is_not_found(&e) => {}
                Err(e) => failures.push(ResourceFailure::new(descriptor, render_error(&e))),
            }
        }

        failures
    }
}
