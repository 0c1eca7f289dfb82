//! Region scope resolution and exclusion validation

use crate::error::NukeError;
use std::collections::BTreeSet;

/// The set of regions eligible for discovery and deletion in a run.
///
/// Resolved once at run start and read-only thereafter, so it can be shared
/// across concurrent discovery and deletion units without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionScope {
    regions: BTreeSet<String>,
}

impl RegionScope {
    /// Validate exclusions against the full known region set and return the
    /// in-scope set (known minus excluded).
    ///
    /// Fails on the first exclusion that is not a known region. This runs
    /// before any resource listing, so a rejected command never pays for
    /// discovery across the whole account.
    pub fn resolve(
        known: impl IntoIterator<Item = String>,
        excluded: &[String],
    ) -> Result<Self, NukeError> {
        let known: BTreeSet<String> = known.into_iter().collect();

        for exclusion in excluded {
            if !known.contains(exclusion) {
                return Err(NukeError::InvalidScope {
                    flag: "exclude-region",
                    value: exclusion.clone(),
                });
            }
        }

        let regions = known
            .into_iter()
            .filter(|r| !excluded.iter().any(|e| e == r))
            .collect();

        Ok(Self { regions })
    }

    pub fn contains(&self, region: &str) -> bool {
        self.regions.contains(region)
    }

    /// In-scope regions in lexicographic order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        ["us-east-1", "us-east-2", "eu-west-1"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn unknown_exclusion_is_rejected() {
        let err = RegionScope::resolve(known(), &["mars-north-1".to_string()]).unwrap_err();
        match err {
            NukeError::InvalidScope { value, .. } => assert_eq!(value, "mars-north-1"),
            other => panic!("expected InvalidScope, got {other:?}"),
        }
    }

    #[test]
    fn scope_is_known_minus_excluded() {
        let scope = RegionScope::resolve(known(), &["us-east-2".to_string()]).unwrap();
        assert_eq!(scope.len(), 2);
        assert!(scope.contains("us-east-1"));
        assert!(scope.contains("eu-west-1"));
        assert!(!scope.contains("us-east-2"));
    }

    #[test]
    fn no_exclusions_keeps_everything() {
        let scope = RegionScope::resolve(known(), &[]).unwrap();
        assert_eq!(scope.len(), 3);
    }

    #[test]
    fn excluding_everything_leaves_empty_scope() {
        let scope = RegionScope::resolve(known(), &known()).unwrap();
        assert!(scope.is_empty());
    }

    #[test]
    fn regions_iterate_in_stable_order() {
        let scope = RegionScope::resolve(known(), &[]).unwrap();
        let order: Vec<&str> = scope.regions().collect();
        assert_eq!(order, vec!["eu-west-1", "us-east-1", "us-east-2"]);
    }
}
