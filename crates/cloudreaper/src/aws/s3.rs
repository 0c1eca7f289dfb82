//! S3 bucket adapter
//!
//! The one global-listing kind: `ListBuckets` returns every bucket in the
//! account, so this adapter is queried once per run. Each bucket's home
//! region is resolved so the uniform region filter still applies, and
//! deletion happens against a client in that region.

use crate::aws::context::AwsContext;
use crate::aws::error::{is_not_found, render_error};
use crate::aws::to_chrono;
use crate::nuke::adapter::{ListScope, ResourceAdapter};
use anyhow::{Context, Result};
use async_trait::async_trait;
use cloudreaper_common::{ResourceDescriptor, ResourceFailure, ResourceKind};
use tracing::{debug, info, warn};

pub struct S3BucketAdapter {
    ctx: AwsContext,
}

impl S3BucketAdapter {
    pub fn new(ctx: &AwsContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    /// Delete every object in a bucket, then the bucket itself. Buckets must
    /// be empty before `DeleteBucket` succeeds.
    async fn delete_bucket(&self, region: &str, bucket: &str) -> Result<()> {
        let client = self.ctx.s3_client(region);

        let mut continuation_token = None;
        loop {
            let mut request = client.list_objects_v2().bucket(bucket);
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.context("Failed to list objects")?;

            for object in response.contents() {
                if let Some(key) = object.key() {
                    client
                        .delete_object()
                        .bucket(bucket)
                        .key(key)
                        .send()
                        .await
                        .with_context(|| format!("Failed to delete object '{key}'"))?;
                }
            }

            match response.next_continuation_token() {
                Some(token) => continuation_token = Some(token.to_string()),
                None => break,
            }
        }

        client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .context("Failed to delete bucket")?;

        Ok(())
    }
}

#[async_trait]
impl ResourceAdapter for S3BucketAdapter {
    fn kind(&self) -> ResourceKind {
        ResourceKind::S3Bucket
    }

    fn list_scope(&self) -> ListScope {
        ListScope::Global
    }

    async fn list(&self, region: &str) -> Result<Vec<ResourceDescriptor>> {
        let client = self.ctx.s3_client(region);

        let response = client
            .list_buckets()
            .send()
            .await
            .context("Failed to list buckets")?;

        let mut resources = Vec::new();
        for bucket in response.buckets() {
            let Some(bucket_name) = bucket.name() else {
                continue;
            };

            // A bucket lives in exactly one region; the region filter needs it
            let location = client
                .get_bucket_location()
                .bucket(bucket_name)
                .send()
                .await;
            let bucket_region = match location {
                Ok(response) => match response.location_constraint() {
                    Some(constraint) if !constraint.as_str().is_empty() => {
                        constraint.as_str().to_string()
                    }
                    // Empty/absent constraint is the us-east-1 legacy encoding
                    _ => "us-east-1".to_string(),
                },
                Err(e) => {
                    warn!(bucket = %bucket_name, error = %render_error(&e), "Could not resolve bucket region; skipping");
                    continue;
                }
            };

            resources.push(
                ResourceDescriptor::new(ResourceKind::S3Bucket, bucket_region, bucket_name)
                    .with_created_at(bucket.creation_date().and_then(to_chrono)),
            );
        }

        debug!(count = resources.len(), "Found S3 buckets");
        Ok(resources)
    }

    async fn delete(&self, region: &str, resources: &[ResourceDescriptor]) -> Vec<ResourceFailure> {
        let mut failures = Vec::new();

        for descriptor in resources {
            match self.delete_bucket(region, &descriptor.id).await {
                Ok(()) => {
                    info!(bucket = %descriptor.id, region = %region, "Deleted bucket and contents");
                }
                Err(e) => {
                    // Walk the chain: the SDK error sits under the context layer
                    let already_gone = e.chain().any(|cause| {
                        cause
                            .downcast_ref::<aws_sdk_s3::error::SdkError<
                                aws_sdk_s3::operation::delete_bucket::DeleteBucketError,
                            >>()
                            .map(|err| is_not_found(err))
                            .unwrap_or(false)
                    });
                    if !already_gone {
                        failures.push(ResourceFailure::new(descriptor, format!("{e:#}")));
                    }
                }
            }
        }

        failures
    }
}
