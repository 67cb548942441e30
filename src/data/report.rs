//! JSON export of the current dashboard.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use greenmind_types::{Kpis, ReadingsSummary, Severity};
use serde::Serialize;

use super::dashboard::Dashboard;
use super::metric::{issue_metric_rows, savings_labels};

/// Snapshot of a dashboard as written by `--export` and the `e` key.
#[derive(Debug, Serialize)]
pub struct Report {
    pub factory: String,
    pub location: String,
    pub readings_timestamp: String,
    pub summary: ReadingsSummary,
    pub severity_counts: SeverityCounts,
    pub zones: Vec<ZoneReport>,
    pub analysis_timestamp: Option<String>,
    pub kpis: Option<Kpis>,
    pub narrative: Option<String>,
    pub issues: Vec<IssueReport>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SeverityCounts {
    pub ok: usize,
    pub warning: usize,
    pub critical: usize,
}

#[derive(Debug, Serialize)]
pub struct ZoneReport {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub issue_count: usize,
    pub alerts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct IssueReport {
    pub id: String,
    pub zone_id: String,
    pub zone_name: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// `(label, formatted value)` pairs.
    pub metrics: Vec<(String, String)>,
    pub savings: Vec<String>,
}

impl Report {
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let zones = dashboard
            .factory
            .zones
            .iter()
            .map(|zone| ZoneReport {
                id: zone.id.clone(),
                name: zone.label.clone(),
                severity: dashboard.severity(&zone.id),
                issue_count: dashboard.issue_count(&zone.id),
                alerts: dashboard
                    .readings
                    .zone(&zone.id)
                    .map(|r| r.alerts.clone())
                    .unwrap_or_default(),
            })
            .collect();

        let issues = dashboard
            .issues()
            .iter()
            .map(|issue| IssueReport {
                id: issue.id.clone(),
                zone_id: issue.zone_id.clone(),
                zone_name: dashboard.zone_name(&issue.zone_id).to_string(),
                severity: issue.severity,
                title: issue.title.clone(),
                description: issue.description.clone(),
                metrics: issue_metric_rows(issue),
                savings: savings_labels(issue),
            })
            .collect();

        let analysis = dashboard.analysis.as_deref();

        Self {
            factory: dashboard.factory.name.clone(),
            location: dashboard.factory.location.clone(),
            readings_timestamp: dashboard.readings.timestamp.clone(),
            summary: dashboard.readings.summary.clone(),
            severity_counts: SeverityCounts {
                ok: dashboard.severities.count(Severity::Ok),
                warning: dashboard.severities.count(Severity::Warning),
                critical: dashboard.severities.count(Severity::Critical),
            },
            zones,
            analysis_timestamp: analysis.and_then(|a| a.timestamp.clone()),
            kpis: analysis.and_then(|a| a.kpis.clone()),
            narrative: analysis.map(|a| a.narrative.clone()),
            issues,
        }
    }
}

/// Write the dashboard as pretty JSON to `path`.
pub fn export_report(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let report = Report::from_dashboard(dashboard);
    let json = serde_json::to_string_pretty(&report)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenmind_types::{AnalysisResult, Factory, Issue, Readings, Zone, ZoneReading};
    use std::collections::BTreeMap;

    fn dashboard() -> Dashboard {
        let factory = Factory::builder("f1", "Tashkent Bottling")
            .location("Tashkent")
            .zone(Zone::new("A", "Blow Molding", 0.0, 0.0, 40.0, 50.0))
            .zone(Zone::new("B", "Filling", 50.0, 0.0, 40.0, 50.0))
            .build();
        let readings = Readings {
            zones: vec![ZoneReading::new("A").alert("Motor hot")],
            ..Default::default()
        };
        let mut issue = Issue::new("A", Severity::Critical, "Overheating");
        issue.metrics = Some(BTreeMap::from([("motor_temperature".to_string(), 91.0)]));
        issue.estimated_savings_kwh = Some(120.0);

        Dashboard::new(factory, readings).with_analysis(AnalysisResult {
            success: true,
            narrative: "Zone A runs hot".to_string(),
            issues: vec![issue],
            ..Default::default()
        })
    }

    #[test]
    fn test_report_contents() {
        let report = Report::from_dashboard(&dashboard());
        assert_eq!(report.factory, "Tashkent Bottling");
        assert_eq!(
            report.severity_counts,
            SeverityCounts {
                ok: 1,
                warning: 0,
                critical: 1
            }
        );
        assert_eq!(report.zones[0].issue_count, 1);
        assert_eq!(report.zones[0].alerts, vec!["Motor hot"]);
        assert_eq!(report.zones[1].severity, Severity::Ok);
        assert_eq!(report.issues[0].zone_name, "Blow Molding");
        assert_eq!(
            report.issues[0].metrics,
            vec![("Motor temperature".to_string(), "91.0°C".to_string())]
        );
        assert_eq!(report.issues[0].savings, vec!["120.0 kWh"]);
        assert_eq!(report.narrative.as_deref(), Some("Zone A runs hot"));
    }

    #[test]
    fn test_export_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        export_report(&dashboard(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["zones"][0]["severity"], "critical");
        assert_eq!(value["issues"][0]["id"], "A");
        assert!(value["kpis"].is_null());
    }
}
