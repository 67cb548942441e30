//! Immutable state container for the factory dashboard.
//!
//! A [`Dashboard`] is never patched in place. Loading the layout builds a new
//! one; a finished analysis builds a new one from the previous, sharing the
//! layout and readings and replacing the analysis and severity map wholesale.

use std::sync::Arc;
use std::time::Instant;

use greenmind_types::{AnalysisResult, Factory, Issue, Readings, Severity};

use super::severity::ZoneSeverityMap;

/// Label shown for an issue whose zone is not in the layout.
pub const UNKNOWN_ZONE: &str = "Unknown Zone";

/// Layout, readings and the latest analysis for one factory.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub factory: Arc<Factory>,
    pub readings: Arc<Readings>,
    pub analysis: Option<Arc<AnalysisResult>>,
    pub severities: ZoneSeverityMap,
    pub loaded_at: Instant,
    pub analyzed_at: Option<Instant>,
}

impl Dashboard {
    /// Build a dashboard from a freshly loaded layout; every zone starts `Ok`.
    pub fn new(factory: Factory, readings: Readings) -> Self {
        let severities = ZoneSeverityMap::all_ok(factory.zone_ids());
        Self {
            factory: Arc::new(factory),
            readings: Arc::new(readings),
            analysis: None,
            severities,
            loaded_at: Instant::now(),
            analyzed_at: None,
        }
    }

    /// A new dashboard carrying `analysis`, with severities recomputed.
    pub fn with_analysis(&self, analysis: AnalysisResult) -> Self {
        let severities = ZoneSeverityMap::aggregate(self.factory.zone_ids(), &analysis.issues);
        Self {
            factory: Arc::clone(&self.factory),
            readings: Arc::clone(&self.readings),
            analysis: Some(Arc::new(analysis)),
            severities,
            loaded_at: self.loaded_at,
            analyzed_at: Some(Instant::now()),
        }
    }

    /// Carry the current analysis over to a freshly loaded dashboard.
    ///
    /// Severities are recomputed against the new layout, so zones that
    /// disappeared drop out and new zones start `Ok`.
    pub fn reloaded(&self, fresh: Dashboard) -> Self {
        match &self.analysis {
            Some(analysis) => Self {
                severities: ZoneSeverityMap::aggregate(fresh.factory.zone_ids(), &analysis.issues),
                analysis: Some(Arc::clone(analysis)),
                analyzed_at: self.analyzed_at,
                ..fresh
            },
            None => fresh,
        }
    }

    /// Issues from the latest analysis, empty before the first one.
    pub fn issues(&self) -> &[Issue] {
        self.analysis.as_deref().map(|a| a.issues.as_slice()).unwrap_or(&[])
    }

    /// Number of issues attributed to a zone.
    pub fn issue_count(&self, zone_id: &str) -> usize {
        self.analysis.as_deref().map_or(0, |a| a.issue_count(zone_id))
    }

    /// Display name of a zone; unknown ids render as "Unknown Zone".
    pub fn zone_name(&self, zone_id: &str) -> &str {
        self.factory
            .zone(zone_id)
            .map(|z| z.label.as_str())
            .unwrap_or(UNKNOWN_ZONE)
    }

    /// Worst severity of a zone.
    pub fn severity(&self, zone_id: &str) -> Severity {
        self.severities.get(zone_id)
    }

    /// Issues sorted worst first, keeping backend order within a severity.
    pub fn issues_by_severity(&self) -> Vec<&Issue> {
        let mut issues: Vec<&Issue> = self.issues().iter().collect();
        issues.sort_by(|a, b| b.severity.cmp(&a.severity));
        issues
    }
}
