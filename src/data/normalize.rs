//! Mapping of the analysis backend's response into UI shape.

use greenmind_types::{AnalysisResponse, AnalysisResult, BackendIssue, Issue, Kpis, Severity};
use thiserror::Error;

/// Errors produced while normalizing an analysis response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The backend answered with `success: false`.
    #[error("Analysis request failed")]
    RequestFailed,
}

/// Convert a backend analysis envelope into an [`AnalysisResult`].
///
/// Missing optional fields are tolerated: no `issues` yields an empty list,
/// no `overall_assessment` an empty narrative. Numeric fields are carried
/// over unchanged.
pub fn normalize_analysis(response: AnalysisResponse) -> Result<AnalysisResult, NormalizeError> {
    if !response.success {
        return Err(NormalizeError::RequestFailed);
    }

    let analysis = response.analysis.unwrap_or_default();

    let kpis = analysis
        .metrics
        .as_ref()
        .and_then(|m| m.avg_energy_per_1000_bottles_kwh)
        .map(|avg| Kpis {
            avg_energy_per_1000_bottles_kwh: avg,
            avg_scrap_rate_percent: None,
            estimated_co2_tonnes: None,
        });

    let issues = analysis
        .issues
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, issue)| normalize_issue(index, issue))
        .collect();

    Ok(AnalysisResult {
        success: true,
        timestamp: analysis.timestamp,
        kpis,
        issues,
        narrative: analysis.overall_assessment.unwrap_or_default(),
    })
}

fn normalize_issue(index: usize, issue: BackendIssue) -> Issue {
    Issue {
        id: format!("{}-{}", issue.zone_id, index),
        severity: Severity::from(issue.severity),
        zone_id: issue.zone_id,
        title: issue.title,
        description: issue.description,
        metrics: issue.metrics,
        estimated_savings_kwh: issue.estimated_savings_kwh,
        estimated_savings_usd: issue.estimated_savings_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenmind_types::{BackendAnalysis, BackendAnalysisMetrics, BackendSeverity};
    use std::collections::BTreeMap;

    fn backend_issue(zone: &str, severity: BackendSeverity) -> BackendIssue {
        BackendIssue {
            zone_id: zone.to_string(),
            zone_name: None,
            severity,
            title: "title".to_string(),
            description: "description".to_string(),
            metrics: None,
            estimated_savings_kwh: None,
            estimated_savings_usd: None,
        }
    }

    fn response(analysis: BackendAnalysis) -> AnalysisResponse {
        AnalysisResponse {
            success: true,
            analysis: Some(analysis),
        }
    }

    #[test]
    fn test_severity_mapping_exhaustive() {
        let result = normalize_analysis(response(BackendAnalysis {
            issues: Some(vec![
                backend_issue("A", BackendSeverity::High),
                backend_issue("B", BackendSeverity::Medium),
                backend_issue("C", BackendSeverity::Low),
            ]),
            ..Default::default()
        }))
        .unwrap();

        let severities: Vec<Severity> = result.issues.iter().map(|i| i.severity).collect();
        assert_eq!(severities, vec![Severity::Critical, Severity::Warning, Severity::Ok]);
    }

    #[test]
    fn test_missing_issues_and_assessment() {
        let result = normalize_analysis(response(BackendAnalysis::default())).unwrap();
        assert!(result.success);
        assert!(result.issues.is_empty());
        assert_eq!(result.narrative, "");
        assert!(result.kpis.is_none());
    }

    #[test]
    fn test_missing_analysis_body() {
        let result = normalize_analysis(AnalysisResponse {
            success: true,
            analysis: None,
        })
        .unwrap();
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_unsuccessful_is_request_failed() {
        let err = normalize_analysis(AnalysisResponse {
            success: false,
            analysis: Some(BackendAnalysis::default()),
        })
        .unwrap_err();
        assert_eq!(err, NormalizeError::RequestFailed);
    }

    #[test]
    fn test_optional_numbers_preserved() {
        let mut issue = backend_issue("A", BackendSeverity::Medium);
        issue.metrics = Some(BTreeMap::from([("vibration".to_string(), 5.1)]));
        issue.estimated_savings_kwh = Some(1234.5);
        issue.estimated_savings_usd = Some(-3.0);

        let result = normalize_analysis(response(BackendAnalysis {
            overall_assessment: Some("## Summary".to_string()),
            issues: Some(vec![issue]),
            ..Default::default()
        }))
        .unwrap();

        let issue = &result.issues[0];
        assert_eq!(issue.metrics.as_ref().unwrap()["vibration"], 5.1);
        assert_eq!(issue.estimated_savings_kwh, Some(1234.5));
        assert_eq!(issue.estimated_savings_usd, Some(-3.0));
        assert_eq!(result.narrative, "## Summary");
    }

    #[test]
    fn test_issue_ids_unique_per_zone() {
        let result = normalize_analysis(response(BackendAnalysis {
            issues: Some(vec![
                backend_issue("A", BackendSeverity::High),
                backend_issue("A", BackendSeverity::Low),
            ]),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(result.issues[0].id, "A-0");
        assert_eq!(result.issues[1].id, "A-1");
        assert_eq!(result.issues[1].zone_id, "A");
    }

    #[test]
    fn test_kpis_only_with_energy_metric() {
        let without = normalize_analysis(response(BackendAnalysis {
            metrics: Some(BackendAnalysisMetrics {
                total_power_kw: Some(200.0),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .unwrap();
        assert!(without.kpis.is_none());

        let with = normalize_analysis(response(BackendAnalysis {
            metrics: Some(BackendAnalysisMetrics {
                avg_energy_per_1000_bottles_kwh: Some(42.5),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .unwrap();
        let kpis = with.kpis.unwrap();
        assert_eq!(kpis.avg_energy_per_1000_bottles_kwh, 42.5);
        assert!(kpis.avg_scrap_rate_percent.is_none());
    }
}
