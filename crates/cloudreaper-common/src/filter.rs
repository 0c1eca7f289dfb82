//! Uniform include/exclude filtering across all resource kinds
//!
//! One pure predicate decides whether a discovered resource enters the
//! inventory. No kind gets bespoke rules; a new kind inherits correct
//! filtering as long as its descriptors report a region and, when knowable, a
//! creation time.

use crate::descriptor::ResourceDescriptor;
use crate::scope::RegionScope;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;

/// Policy for resources with no knowable creation time.
///
/// This decides what gets destroyed, so it is an explicit setting rather than
/// an implicit fallback inside the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndatedPolicy {
    /// Undated resources are eligible for deletion (matches the age filter)
    #[default]
    Eligible,
    /// Undated resources are never deleted by an age-filtered run
    Excluded,
}

impl FromStr for UndatedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eligible" => Ok(UndatedPolicy::Eligible),
            "excluded" => Ok(UndatedPolicy::Excluded),
            other => Err(format!(
                "unknown undated policy '{other}' (expected 'eligible' or 'excluded')"
            )),
        }
    }
}

impl fmt::Display for UndatedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndatedPolicy::Eligible => f.write_str("eligible"),
            UndatedPolicy::Excluded => f.write_str("excluded"),
        }
    }
}

/// A single instant computed once at run start.
///
/// A resource passes the age rule only if it was created strictly before this
/// instant; a resource created exactly at the cutoff is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeCutoff(DateTime<Utc>);

impl AgeCutoff {
    /// Cutoff for "older than `age`", relative to now.
    pub fn older_than(age: Duration) -> Self {
        Self(Utc::now() - age)
    }

    /// Cutoff at an explicit instant (used by tests and callers that pin the
    /// run start).
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Pure filter applied to every descriptor before it enters the inventory.
#[derive(Debug, Clone, Copy)]
pub struct NukeFilter {
    cutoff: AgeCutoff,
    undated: UndatedPolicy,
}

impl NukeFilter {
    pub fn new(cutoff: AgeCutoff, undated: UndatedPolicy) -> Self {
        Self { cutoff, undated }
    }

    /// Both rules must pass; the conjunction is unordered.
    ///
    /// 1. The resource's region is in scope.
    /// 2. The creation time is strictly before the cutoff, or is unknown and
    ///    the undated policy says eligible.
    pub fn includes(&self, descriptor: &ResourceDescriptor, scope: &RegionScope) -> bool {
        if !scope.contains(&descriptor.region) {
            return false;
        }

        match descriptor.created_at {
            Some(created_at) => created_at < self.cutoff.instant(),
            None => self.undated == UndatedPolicy::Eligible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_kind::ResourceKind;

    fn scope() -> RegionScope {
        RegionScope::resolve(
            vec!["us-east-1".to_string(), "us-east-2".to_string()],
            &["us-east-2".to_string()],
        )
        .unwrap()
    }

    fn descriptor(region: &str, created_at: Option<DateTime<Utc>>) -> ResourceDescriptor {
        ResourceDescriptor::new(ResourceKind::Ec2Instance, region, "i-0abc")
            .with_created_at(created_at)
    }

    fn filter_at(cutoff: DateTime<Utc>, undated: UndatedPolicy) -> NukeFilter {
        NukeFilter::new(AgeCutoff::at(cutoff), undated)
    }

    #[test]
    fn created_before_cutoff_is_included() {
        let now = Utc::now();
        let f = filter_at(now, UndatedPolicy::Eligible);
        let d = descriptor("us-east-1", Some(now - Duration::minutes(15)));
        assert!(f.includes(&d, &scope()));
    }

    #[test]
    fn created_after_cutoff_is_excluded() {
        let now = Utc::now();
        let f = filter_at(now - Duration::minutes(10), UndatedPolicy::Eligible);
        let d = descriptor("us-east-1", Some(now - Duration::minutes(5)));
        assert!(!f.includes(&d, &scope()));
    }

    #[test]
    fn created_exactly_at_cutoff_is_excluded() {
        let instant = Utc::now();
        let f = filter_at(instant, UndatedPolicy::Eligible);
        let d = descriptor("us-east-1", Some(instant));
        assert!(!f.includes(&d, &scope()));
    }

    #[test]
    fn excluded_region_wins_regardless_of_age() {
        let now = Utc::now();
        let f = filter_at(now, UndatedPolicy::Eligible);
        let d = descriptor("us-east-2", Some(now - Duration::days(30)));
        assert!(!f.includes(&d, &scope()));
    }

    #[test]
    fn undated_follows_policy() {
        let f = filter_at(Utc::now(), UndatedPolicy::Eligible);
        assert!(f.includes(&descriptor("us-east-1", None), &scope()));

        let f = filter_at(Utc::now(), UndatedPolicy::Excluded);
        assert!(!f.includes(&descriptor("us-east-1", None), &scope()));
    }

    #[test]
    fn filtering_is_idempotent() {
        let now = Utc::now();
        let f = filter_at(now, UndatedPolicy::Eligible);
        let s = scope();
        let descriptors = vec![
            descriptor("us-east-1", Some(now - Duration::hours(1))),
            descriptor("us-east-2", Some(now - Duration::hours(1))),
            descriptor("us-east-1", None),
            descriptor("us-east-1", Some(now + Duration::hours(1))),
        ];

        let once: Vec<_> = descriptors
            .iter()
            .filter(|d| f.includes(d, &s))
            .cloned()
            .collect();
        let twice: Vec<_> = once.iter().filter(|d| f.includes(d, &s)).cloned().collect();

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.region, b.region);
            assert_eq!(a.created_at, b.created_at);
        }
    }

    #[test]
    fn policy_parses_from_flag_values() {
        assert_eq!(
            "eligible".parse::<UndatedPolicy>().unwrap(),
            UndatedPolicy::Eligible
        );
        assert_eq!(
            "excluded".parse::<UndatedPolicy>().unwrap(),
            UndatedPolicy::Excluded
        );
        assert!("always".parse::<UndatedPolicy>().is_err());
    }
}
