//! Resource kinds and deletion ordering
//!
//! Every supported cloud resource category is one variant here. Deletion
//! priority is shared by all orchestration code so that dependent resources
//! are always removed in an order the provider will accept.

use serde::Serialize;
use std::fmt;

/// Categories of cloud resources cloudreaper can discover and delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Auto Scaling group (must go first or it relaunches terminated instances)
    AutoScalingGroup,
    /// Classic Elastic Load Balancer
    LoadBalancer,
    /// Application/Network Load Balancer (ELBv2)
    LoadBalancerV2,
    /// EC2 instance
    Ec2Instance,
    /// Machine image (deregister before deleting its backing snapshots)
    Ami,
    /// EBS snapshot
    Snapshot,
    /// EBS volume
    EbsVolume,
    /// Elastic IP allocation
    ElasticIp,
    /// S3 bucket (listed globally, deleted in its home region)
    S3Bucket,
}

impl ResourceKind {
    /// All supported kinds, in deletion-priority order.
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::AutoScalingGroup,
        ResourceKind::LoadBalancer,
        ResourceKind::LoadBalancerV2,
        ResourceKind::Ec2Instance,
        ResourceKind::Ami,
        ResourceKind::Snapshot,
        ResourceKind::EbsVolume,
        ResourceKind::ElasticIp,
        ResourceKind::S3Bucket,
    ];

    /// Get deletion priority (lower number = delete first)
    ///
    /// Resources must be deleted in dependency order:
    /// - 0: Auto Scaling groups (they replace instances terminated under them)
    /// - 1: Load balancers (release their interfaces before instances go)
    /// - 2: EC2 instances
    /// - 3: AMIs (a snapshot backing a registered AMI cannot be deleted)
    /// - 4: EBS snapshots
    /// - 5: EBS volumes and Elastic IPs (freed once instances terminate)
    /// - 6: S3 buckets (no dependencies on the rest)
    pub fn deletion_priority(self) -> u8 {
        match self {
            ResourceKind::AutoScalingGroup => 0,
            ResourceKind::LoadBalancer => 1,
            ResourceKind::LoadBalancerV2 => 1,
            ResourceKind::Ec2Instance => 2,
            ResourceKind::Ami => 3,
            ResourceKind::Snapshot => 4,
            ResourceKind::EbsVolume => 5,
            ResourceKind::ElasticIp => 5,
            ResourceKind::S3Bucket => 6,
        }
    }

    /// Short identifier used in logs, reports, and the preview table.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::AutoScalingGroup => "asg",
            ResourceKind::LoadBalancer => "elb",
            ResourceKind::LoadBalancerV2 => "elbv2",
            ResourceKind::Ec2Instance => "ec2-instance",
            ResourceKind::Ami => "ami",
            ResourceKind::Snapshot => "ebs-snapshot",
            ResourceKind::EbsVolume => "ebs-volume",
            ResourceKind::ElasticIp => "elastic-ip",
            ResourceKind::S3Bucket => "s3-bucket",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
