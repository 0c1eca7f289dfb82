//! Machine image (AMI) adapter
//!
//! Only self-owned images are candidates. AMIs rank above snapshots in
//! deletion order because a snapshot backing a registered image cannot be
//! deleted.

use crate::aws::context::AwsContext;
use crate::aws::error::{is_not_found, render_error};
use crate::nuke::adapter::ResourceAdapter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use tracing::{debug, info};

pub struct AmiAdapter {
    ctx: AwsContext,
}

impl AmiAdapter {
    pub fn new(ctx: &AwsContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

/// AMI creation dates are RFC 3339 strings rather than SDK timestamps.
fn parse_creation_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl ResourceAdapter for AmiAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Ami
    }

    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>> {
        let client = self.ctx.ec2_client(region);

        let mut resources = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = client.describe_images().owners("self");
            if let Some(token) = &next_token {
                request = request.next_token(token);
            }

            let response = request.send().await.context("Failed to describe images")?;

            for image in response.images() {
                let Some(image_id) = image.image_id() else {
                    continue;
                };
                let mut descriptor = ResourceDescriptor::new(ResourceKind::Ami, region, image_id)
                    .with_created_at(image.creation_date().and_then(parse_creation_date));
                if let Some(name) = image.name() {
                    descriptor = descriptor.with_name(name);
                }
                resources.push(descriptor);
            }

            match response.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(region = %region, count = resources.len(), "Found AMIs");
        Ok(resources)
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        let client = self.ctx.ec2_client(region);
        let mut failures = Vec::new();

        for descriptor in resources {
            match client
                .deregister_image()
                .image_id(&descriptor.id)
                .send()
                .await
            {
                Ok(_) => {
                    info!(ami = %descriptor.id, region = %region, "Deregistered AMI");
                }
                Err(e) if is_not_found(&e) => {}
                Err(e) => failures.push(ResourceFailure::new(descriptor, render_error(&e))),
            }
        }

        failures
    }
}
