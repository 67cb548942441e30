//! Backend abstraction for the demo API.
//!
//! The dashboard talks to the backend through the [`DemoApi`] trait, with an
//! HTTP implementation for the live service and a directory-of-JSON
//! implementation for offline runs. Requests are driven from the UI thread
//! by an [`ApiWorker`], which runs them on a tokio runtime and hands results
//! back over a channel.

mod fixture;
mod http;
mod worker;

pub use fixture::FixtureApi;
pub use worker::{ApiEvent, ApiWorker};

use std::fmt::Debug;

use greenmind_client::{ClientError, ErrorKind};
use greenmind_types::{
    AnalysisResponse, AnalysisResult, ChatRequest, ChatResponse, Factory, Language, Readings,
};
use thiserror::Error;

use crate::data::{normalize_analysis, Dashboard, NormalizeError};

/// Errors surfaced by a [`DemoApi`] implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A fixture file could not be read or decoded.
    #[error("Fixture {file}: {message}")]
    Fixture { file: String, message: String },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl BackendError {
    /// Whether the failure happened before the backend answered.
    pub fn is_network(&self) -> bool {
        matches!(self, BackendError::Client(e) if e.kind() == ErrorKind::Network)
    }
}

/// Source of factory data, analysis and chat replies.
///
/// # Example
///
/// ```no_run
/// use greenmind_demo::backend::{DemoApi, FixtureApi};
///
/// # async fn run() -> Result<(), greenmind_demo::backend::BackendError> {
/// let api = FixtureApi::new("fixtures");
/// let (factory, readings) = api.factory_and_readings().await?;
/// println!("{}: {} zones", factory.name, readings.zones.len());
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait DemoApi: Send + Sync + Debug {
    /// Fetch the layout and the readings; the first failure aborts both.
    async fn factory_and_readings(&self) -> Result<(Factory, Readings), BackendError>;

    /// Request an analysis in the given language.
    async fn analyze(&self, language: Language) -> Result<AnalysisResponse, BackendError>;

    /// Suggested chat prompts.
    async fn suggestions(&self) -> Result<Vec<String>, BackendError>;

    /// Send a chat message with its history.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError>;

    /// Returns a human-readable description of the backend.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}

/// Initial load: fetch layout and readings into a fresh dashboard.
pub async fn load_dashboard(api: &dyn DemoApi) -> Result<Dashboard, BackendError> {
    let (factory, readings) = api.factory_and_readings().await?;
    tracing::info!(
        factory = %factory.name,
        zones = factory.zones.len(),
        "Loaded factory layout"
    );
    Ok(Dashboard::new(factory, readings))
}

/// Request and normalize an analysis.
pub async fn run_analysis(
    api: &dyn DemoApi,
    language: Language,
) -> Result<AnalysisResult, BackendError> {
    let response = api.analyze(language).await?;
    let result = normalize_analysis(response)?;
    tracing::info!(
        issues = result.issues.len(),
        language = %language,
        "Analysis complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenmind_types::{BackendAnalysis, BackendIssue, BackendSeverity, Severity, Zone};

    #[derive(Debug)]
    struct StaticApi {
        analysis_success: bool,
    }

    #[async_trait::async_trait]
    impl DemoApi for StaticApi {
        async fn factory_and_readings(&self) -> Result<(Factory, Readings), BackendError> {
            let factory = Factory::builder("f1", "Demo")
                .zone(Zone::new("A", "Blow Molding", 0.0, 0.0, 40.0, 50.0))
                .zone(Zone::new("B", "Filling", 50.0, 0.0, 40.0, 50.0))
                .build();
            Ok((factory, Readings::default()))
        }

        async fn analyze(&self, _language: Language) -> Result<AnalysisResponse, BackendError> {
            Ok(AnalysisResponse {
                success: self.analysis_success,
                analysis: Some(BackendAnalysis {
                    issues: Some(vec![BackendIssue {
                        zone_id: "A".to_string(),
                        zone_name: None,
                        severity: BackendSeverity::High,
                        title: "Overheating".to_string(),
                        description: String::new(),
                        metrics: None,
                        estimated_savings_kwh: None,
                        estimated_savings_usd: None,
                    }]),
                    ..Default::default()
                }),
            })
        }

        async fn suggestions(&self) -> Result<Vec<String>, BackendError> {
            Ok(Vec::new())
        }

        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, BackendError> {
            Ok(ChatResponse::default())
        }

        fn description(&self) -> &str {
            "static"
        }
    }

    #[tokio::test]
    async fn test_load_then_analyze_end_to_end() {
        let api = StaticApi {
            analysis_success: true,
        };
        let dashboard = load_dashboard(&api).await.unwrap();
        assert_eq!(dashboard.severity("A"), Severity::Ok);

        let analysis = run_analysis(&api, Language::En).await.unwrap();
        let dashboard = dashboard.with_analysis(analysis);

        assert_eq!(dashboard.severity("A"), Severity::Critical);
        assert_eq!(dashboard.severity("B"), Severity::Ok);
        assert_eq!(dashboard.issue_count("A"), 1);
        assert_eq!(dashboard.issue_count("B"), 0);
    }

    #[tokio::test]
    async fn test_unsuccessful_analysis_is_error() {
        let api = StaticApi {
            analysis_success: false,
        };
        let err = run_analysis(&api, Language::Ru).await.unwrap_err();
        assert!(matches!(err, BackendError::Normalize(NormalizeError::RequestFailed)));
        assert!(!err.is_network());
    }
}
