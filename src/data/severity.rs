//! Per-zone severity aggregation.
//!
//! Zone severity is the worst severity among the issues attributed to that
//! zone. Because it is a `max` over the total order `Ok < Warning < Critical`,
//! the result does not depend on issue order and re-running it changes
//! nothing.

use std::collections::BTreeMap;

use greenmind_types::{Issue, Severity};

/// Worst severity for every known zone.
///
/// Every zone passed at construction has an entry, even when no issue
/// references it. Issues naming unknown zones never add entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZoneSeverityMap {
    zones: BTreeMap<String, Severity>,
}

impl ZoneSeverityMap {
    /// Map every zone to `Ok`.
    pub fn all_ok<'a>(zone_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            zones: zone_ids
                .into_iter()
                .map(|id| (id.to_string(), Severity::Ok))
                .collect(),
        }
    }

    /// Compute the worst severity per zone from scratch.
    pub fn aggregate<'a>(zone_ids: impl IntoIterator<Item = &'a str>, issues: &[Issue]) -> Self {
        let mut map = Self::all_ok(zone_ids);
        for issue in issues {
            if let Some(current) = map.zones.get_mut(&issue.zone_id) {
                // Critical beats warning beats ok; an ok issue never lowers a zone.
                *current = (*current).max(issue.severity);
            }
        }
        map
    }

    /// Severity of a zone; unknown zones read as `Ok`.
    pub fn get(&self, zone_id: &str) -> Severity {
        self.zones.get(zone_id).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Severity)> {
        self.zones.iter().map(|(id, s)| (id.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Number of zones at exactly `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.zones.values().filter(|s| **s == severity).count()
    }

    /// Worst severity across the whole plant.
    pub fn worst(&self) -> Severity {
        self.zones.values().copied().max().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(zone: &str, severity: Severity) -> Issue {
        Issue::new(zone, severity, format!("{} issue", severity))
    }

    const ZONES: [&str; 3] = ["A", "B", "C"];

    #[test]
    fn test_zero_issues_all_ok() {
        let map = ZoneSeverityMap::aggregate(ZONES, &[]);
        assert_eq!(map.len(), 3);
        for zone in ZONES {
            assert_eq!(map.get(zone), Severity::Ok);
        }
    }

    #[test]
    fn test_critical_wins_regardless_of_order() {
        let forward = [issue("A", Severity::Warning), issue("A", Severity::Critical)];
        let backward = [issue("A", Severity::Critical), issue("A", Severity::Warning)];

        assert_eq!(ZoneSeverityMap::aggregate(ZONES, &forward).get("A"), Severity::Critical);
        assert_eq!(ZoneSeverityMap::aggregate(ZONES, &backward).get("A"), Severity::Critical);
    }

    #[test]
    fn test_ok_issue_never_lowers() {
        let issues = [issue("B", Severity::Warning), issue("B", Severity::Ok)];
        let map = ZoneSeverityMap::aggregate(ZONES, &issues);
        assert_eq!(map.get("B"), Severity::Warning);
    }

    #[test]
    fn test_order_independent_over_all_rotations() {
        let issues = vec![
            issue("A", Severity::Ok),
            issue("B", Severity::Warning),
            issue("A", Severity::Critical),
            issue("C", Severity::Ok),
            issue("B", Severity::Ok),
            issue("A", Severity::Warning),
        ];
        let expected = ZoneSeverityMap::aggregate(ZONES, &issues);

        for shift in 0..issues.len() {
            let mut rotated = issues.clone();
            rotated.rotate_left(shift);
            assert_eq!(ZoneSeverityMap::aggregate(ZONES, &rotated), expected);
            rotated.reverse();
            assert_eq!(ZoneSeverityMap::aggregate(ZONES, &rotated), expected);
        }
        assert_eq!(expected.get("A"), Severity::Critical);
        assert_eq!(expected.get("B"), Severity::Warning);
        assert_eq!(expected.get("C"), Severity::Ok);
    }

    #[test]
    fn test_idempotent() {
        let issues = [issue("A", Severity::Warning), issue("C", Severity::Critical)];
        let first = ZoneSeverityMap::aggregate(ZONES, &issues);
        let second = ZoneSeverityMap::aggregate(ZONES, &issues);
        assert_eq!(first, second);

        // Feeding the issues twice is the same as feeding them once.
        let doubled: Vec<Issue> = issues.iter().chain(issues.iter()).cloned().collect();
        assert_eq!(ZoneSeverityMap::aggregate(ZONES, &doubled), first);
    }

    #[test]
    fn test_unknown_zone_ignored() {
        let map = ZoneSeverityMap::aggregate(ZONES, &[issue("Z", Severity::Critical)]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.worst(), Severity::Ok);
        assert_eq!(map.get("Z"), Severity::Ok);
    }

    #[test]
    fn test_counts() {
        let issues = [issue("A", Severity::Critical), issue("B", Severity::Warning)];
        let map = ZoneSeverityMap::aggregate(ZONES, &issues);
        assert_eq!(map.count(Severity::Critical), 1);
        assert_eq!(map.count(Severity::Warning), 1);
        assert_eq!(map.count(Severity::Ok), 1);
        assert_eq!(map.worst(), Severity::Critical);
    }
}
