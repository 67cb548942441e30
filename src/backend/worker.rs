//! Runs backend requests off the UI thread.
//!
//! Requests are spawned on a tokio runtime and their results are pushed into
//! an unbounded channel. The TUI drains it with [`ApiWorker::poll`] once per
//! frame without blocking.

use std::sync::Arc;

use greenmind_types::{AnalysisResult, ChatRequest, ChatResponse, Language};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::{load_dashboard, run_analysis, BackendError, DemoApi};
use crate::data::Dashboard;

/// A finished backend request.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded(Result<Dashboard, BackendError>),
    Analyzed(Result<AnalysisResult, BackendError>),
    ChatReplied(Result<ChatResponse, BackendError>),
    Suggestions(Result<Vec<String>, BackendError>),
}

/// Spawns requests against a [`DemoApi`] and collects their results.
#[derive(Debug)]
pub struct ApiWorker {
    api: Arc<dyn DemoApi>,
    runtime: Handle,
    sender: mpsc::UnboundedSender<ApiEvent>,
    receiver: mpsc::UnboundedReceiver<ApiEvent>,
}

impl ApiWorker {
    /// Create a worker that spawns onto `runtime`.
    pub fn new(api: Arc<dyn DemoApi>, runtime: Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            api,
            runtime,
            sender,
            receiver,
        }
    }

    /// Returns a description of the backend.
    pub fn description(&self) -> &str {
        self.api.description()
    }

    /// Fetch layout and readings.
    pub fn load(&self) {
        self.spawn(|api| async move { ApiEvent::Loaded(load_dashboard(api.as_ref()).await) });
    }

    /// Run an analysis in `language`.
    pub fn analyze(&self, language: Language) {
        self.spawn(move |api| async move {
            ApiEvent::Analyzed(run_analysis(api.as_ref(), language).await)
        });
    }

    /// Fetch suggested chat prompts.
    pub fn suggestions(&self) {
        self.spawn(|api| async move { ApiEvent::Suggestions(api.suggestions().await) });
    }

    /// Send a chat message.
    pub fn chat(&self, request: ChatRequest) {
        self.spawn(move |api| async move { ApiEvent::ChatReplied(api.chat(request).await) });
    }

    /// Return the next finished request, if any. Never blocks.
    pub fn poll(&mut self) -> Option<ApiEvent> {
        self.receiver.try_recv().ok()
    }

    fn spawn<F, Fut>(&self, request: F)
    where
        F: FnOnce(Arc<dyn DemoApi>) -> Fut,
        Fut: std::future::Future<Output = ApiEvent> + Send + 'static,
    {
        let sender = self.sender.clone();
        let fut = request(Arc::clone(&self.api));
        self.runtime.spawn(async move {
            // The receiver only goes away when the app is shutting down.
            let _ = sender.send(fut.await);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FixtureApi;
    use greenmind_types::Severity;
    use std::time::Duration;

    async fn next_event(worker: &mut ApiWorker) -> ApiEvent {
        for _ in 0..200 {
            if let Some(event) = worker.poll() {
                return event;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no event received");
    }

    fn worker(dir: &std::path::Path) -> ApiWorker {
        ApiWorker::new(Arc::new(FixtureApi::new(dir)), Handle::current())
    }

    #[tokio::test]
    async fn test_poll_is_empty_before_requests() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker(dir.path());
        assert!(worker.poll().is_none());
        assert!(worker.description().starts_with("fixtures: "));
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker(dir.path());

        worker.load();
        match next_event(&mut worker).await {
            ApiEvent::Loaded(Err(BackendError::Fixture { .. })) => {}
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analysis_round_trip_through_channel() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("analysis.json"),
            r#"{"success": true, "analysis": {"issues": [
                {"zone_id": "A", "severity": "medium", "title": "Slow", "description": ""}
            ]}}"#,
        )
        .unwrap();
        let mut worker = worker(dir.path());

        worker.analyze(Language::En);
        match next_event(&mut worker).await {
            ApiEvent::Analyzed(Ok(result)) => {
                assert_eq!(result.issues[0].severity, Severity::Warning);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
