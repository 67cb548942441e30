//! Analysis results: backend wire shape and the normalized UI shape.

use std::collections::BTreeMap;

/// Severity of an issue or a zone, ordered `Ok < Warning < Critical`.
///
/// The derived ordering is what severity aggregation relies on: the worst
/// severity of a zone is the `max` over its issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 3] = [Severity::Ok, Severity::Warning, Severity::Critical];

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARN",
            Severity::Critical => "CRIT",
        }
    }

    /// Lower-case name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity as the analysis backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackendSeverity {
    High,
    Medium,
    Low,
    /// Any value the backend may add later, or none at all; treated like `low`.
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// Missing and `null` severities both decode as `Unknown`.
#[cfg(feature = "serde")]
fn severity_or_unknown<'de, D>(deserializer: D) -> Result<BackendSeverity, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Ok(Option::<BackendSeverity>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<BackendSeverity> for Severity {
    fn from(severity: BackendSeverity) -> Self {
        match severity {
            BackendSeverity::High => Severity::Critical,
            BackendSeverity::Medium => Severity::Warning,
            BackendSeverity::Low | BackendSeverity::Unknown => Severity::Ok,
        }
    }
}

/// One issue as reported by the analysis backend.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackendIssue {
    /// Empty when the backend omits it; the issue then has no zone.
    #[cfg_attr(feature = "serde", serde(default))]
    pub zone_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zone_name: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "severity_or_unknown")
    )]
    pub severity: BackendSeverity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metrics: Option<BTreeMap<String, f64>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub estimated_savings_kwh: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub estimated_savings_usd: Option<f64>,
}

/// Plant metrics attached to an analysis.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BackendAnalysisMetrics {
    pub total_power_kw: Option<f64>,
    pub overall_efficiency: Option<f64>,
    pub production_rate_bottles_per_hour: Option<f64>,
    pub avg_energy_per_1000_bottles_kwh: Option<f64>,
    pub active_alerts: Option<u32>,
}

/// Body of a successful `POST /demo/bottle/analyze` call.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BackendAnalysis {
    pub timestamp: Option<String>,
    pub overall_assessment: Option<String>,
    pub issues: Option<Vec<BackendIssue>>,
    pub metrics: Option<BackendAnalysisMetrics>,
}

/// Summary indicators returned alongside an analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kpis {
    pub avg_energy_per_1000_bottles_kwh: f64,
    /// Not provided by the current backend.
    pub avg_scrap_rate_percent: Option<f64>,
    /// Not provided by the current backend.
    pub estimated_co2_tonnes: Option<f64>,
}

/// A detected problem attributed to one zone, in UI shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Issue {
    pub id: String,
    pub zone_id: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub metrics: Option<BTreeMap<String, f64>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub estimated_savings_kwh: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub estimated_savings_usd: Option<f64>,
}

impl Issue {
    /// Create an issue with no metrics or savings.
    pub fn new(zone_id: impl Into<String>, severity: Severity, title: impl Into<String>) -> Self {
        let zone_id = zone_id.into();
        Self {
            id: zone_id.clone(),
            zone_id,
            severity,
            title: title.into(),
            description: String::new(),
            metrics: None,
            estimated_savings_kwh: None,
            estimated_savings_usd: None,
        }
    }
}

/// Normalized analysis, ready for display.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    pub success: bool,
    pub timestamp: Option<String>,
    pub kpis: Option<Kpis>,
    pub issues: Vec<Issue>,
    /// Markdown narrative from the backend's overall assessment.
    pub narrative: String,
}

impl AnalysisResult {
    /// Issues attributed to a zone, in backend order.
    pub fn issues_for_zone<'a>(&'a self, zone_id: &'a str) -> impl Iterator<Item = &'a Issue> {
        self.issues.iter().filter(move |i| i.zone_id == zone_id)
    }

    /// Number of issues attributed to a zone.
    pub fn issue_count(&self, zone_id: &str) -> usize {
        self.issues_for_zone(zone_id).count()
    }
}
