//! AWS provider modules
//!
//! - context: shared SDK configuration and per-region client construction
//! - regions: enabled-region enumeration
//! - account: STS caller-identity check
//! - error: service error classification
//! - one adapter module per supported resource kind

pub mod account;
pub mod ami;
pub mod asg;
pub mod context;
pub mod ebs;
pub mod ec2;
pub mod eip;
pub mod elb;
pub mod elbv2;
pub mod error;
pub mod regions;
pub mod s3;

pub use account::{AccountId, get_current_account_id};
pub use context::AwsContext;
pub use regions::enabled_regions;

use crate::nuke::adapter::AdapterRegistry;
use std::sync::Arc;

/// Region used for bootstrap calls (region enumeration, global listings).
pub const DEFAULT_REGION: &str = "us-east-1";

/// Build the registry of every supported AWS resource kind, in
/// deletion-priority order.
pub fn default_registry(ctx: &AwsContext) -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();
    registry.register(Arc::new(asg::AutoScalingGroupAdapter::new(ctx)));
    registry.register(Arc::new(elb::LoadBalancerAdapter::new(ctx)));
    registry.register(Arc::new(elbv2::LoadBalancerV2Adapter::new(ctx)));
    registry.register(Arc::new(ec2::Ec2InstanceAdapter::new(ctx)));
    registry.register(Arc::new(ami::AmiAdapter::new(ctx)));
    registry.register(Arc::new(snapshot::SnapshotAdapter::new(ctx)));
    registry.register(Arc::new(ebs::EbsVolumeAdapter::new(ctx)));
    registry.register(Arc::new(eip::ElasticIpAdapter::new(ctx)));
    registry.register(Arc::new(s3::S3BucketAdapter::new(ctx)));
    registry
}

/// Convert an SDK timestamp to a chrono UTC timestamp.
pub(crate) fn to_chrono(
    dt: &aws_sdk_ec2::primitives::DateTime,
) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}
