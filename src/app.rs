//! Application state and navigation logic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use greenmind_types::{Issue, Language, Zone};

use crate::backend::{ApiEvent, ApiWorker, BackendError};
use crate::data::{export_report, ChatSession, Dashboard};
use crate::i18n::{t, Message};
use crate::ui::Theme;

/// File written by the in-app export key.
pub const DEFAULT_EXPORT_PATH: &str = "greenmind_export.json";

/// The current view/tab in the TUI.
///
/// Issue detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Factory floor plan with zones colored by severity.
    Map,
    /// Live sensor values and alerts per zone.
    Readings,
    /// KPIs, narrative and the issue list.
    Analysis,
    /// Factory copilot conversation.
    Chat,
}

impl View {
    pub const ALL: [View; 4] = [View::Map, View::Readings, View::Analysis, View::Chat];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Map => View::Readings,
            View::Readings => View::Analysis,
            View::Analysis => View::Chat,
            View::Chat => View::Map,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Map => View::Chat,
            View::Readings => View::Map,
            View::Analysis => View::Readings,
            View::Chat => View::Analysis,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Map => "Map",
            View::Readings => "Readings",
            View::Analysis => "Analysis",
            View::Chat => "Chat",
        }
    }
}

/// Main application state.
///
/// All mutation happens on the UI thread. Backend results arrive as
/// [`ApiEvent`]s and replace the dashboard wholesale; a failed request
/// leaves the last good state on screen.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Backend
    worker: ApiWorker,
    pub dashboard: Option<Dashboard>,
    pub load_error: Option<String>,
    pub analysis_error: Option<String>,
    pub loading: bool,
    pub analyzing: bool,

    // Copilot
    pub chat: ChatSession,
    pub chat_input: String,
    pub composing: bool,
    pub selected_suggestion: Option<usize>,

    // Navigation state
    pub selected_zone_index: usize,
    pub selected_issue_index: usize,

    // UI
    pub language: Language,
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App driving the given worker.
    pub fn new(worker: ApiWorker, language: Language, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Map,
            show_help: false,
            show_detail_overlay: false,
            worker,
            dashboard: None,
            load_error: None,
            analysis_error: None,
            loading: false,
            analyzing: false,
            chat: ChatSession::new(language),
            chat_input: String::new(),
            composing: false,
            selected_suggestion: None,
            selected_zone_index: 0,
            selected_issue_index: 0,
            language,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current backend.
    pub fn source_description(&self) -> &str {
        self.worker.description()
    }

    /// Translate a message into the current language.
    pub fn t(&self, message: Message) -> &'static str {
        t(self.language, message)
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Kick off the initial load and the chat suggestions.
    pub fn start(&mut self) {
        self.reload_data();
        self.worker.suggestions();
    }

    /// Fetch layout and readings again.
    pub fn reload_data(&mut self) {
        if self.loading {
            return;
        }
        tracing::debug!("Requesting factory layout and readings");
        self.loading = true;
        self.worker.load();
    }

    /// Request an analysis in the current language.
    ///
    /// Refused with a status notice while an analysis is already running or
    /// before the layout has loaded.
    pub fn analyze(&mut self) {
        if self.analyzing {
            self.set_status_message(self.t(Message::AnalysisBusy).to_string());
            return;
        }
        if self.dashboard.is_none() {
            self.set_status_message(self.t(Message::AnalysisNeedsData).to_string());
            return;
        }
        tracing::debug!(language = %self.language, "Requesting analysis");
        self.analyzing = true;
        self.analysis_error = None;
        self.worker.analyze(self.language);
    }

    /// Switch to the next UI language; later analyses use it too.
    pub fn cycle_language(&mut self) {
        self.language = self.language.next();
        self.chat.set_language(self.language);
        self.set_status_message(self.t(Message::LanguageChanged).to_string());
    }

    /// Drain finished backend requests. Returns true if anything changed.
    pub fn poll_backend(&mut self) -> bool {
        let mut changed = false;
        while let Some(event) = self.worker.poll() {
            self.handle_event(event);
            changed = true;
        }
        changed
    }

    /// Apply one finished backend request to the state.
    pub fn handle_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded(Ok(fresh)) => {
                self.loading = false;
                self.load_error = None;
                let dashboard = match &self.dashboard {
                    Some(previous) => previous.reloaded(fresh),
                    None => fresh,
                };
                self.dashboard = Some(dashboard);
                self.clamp_selection();
            }
            ApiEvent::Loaded(Err(e)) => {
                self.loading = false;
                tracing::warn!(error = %e, "Failed to load factory data");
                self.load_error = Some(self.describe_error(Message::LoadFailed, &e));
            }
            ApiEvent::Analyzed(Ok(analysis)) => {
                self.analyzing = false;
                if let Some(dashboard) = &self.dashboard {
                    self.dashboard = Some(dashboard.with_analysis(analysis));
                    self.selected_issue_index = 0;
                    self.set_status_message(self.t(Message::AnalysisDone).to_string());
                }
            }
            ApiEvent::Analyzed(Err(e)) => {
                self.analyzing = false;
                tracing::warn!(error = %e, "Analysis failed");
                self.analysis_error = Some(self.describe_error(Message::AnalysisFailed, &e));
            }
            ApiEvent::ChatReplied(Ok(reply)) => {
                self.chat
                    .receive_reply(reply.message.unwrap_or_default(), reply.timestamp);
            }
            ApiEvent::ChatReplied(Err(e)) => {
                tracing::warn!(error = %e, "Chat request failed");
                self.chat.receive_error(self.language);
            }
            ApiEvent::Suggestions(Ok(suggestions)) => {
                tracing::debug!(count = suggestions.len(), "Loaded chat suggestions");
                self.chat.suggestions = suggestions;
                self.selected_suggestion = None;
            }
            ApiEvent::Suggestions(Err(e)) => {
                tracing::warn!(error = %e, "Failed to fetch suggestions");
            }
        }
    }

    fn describe_error(&self, message: Message, error: &BackendError) -> String {
        if error.is_network() {
            format!("{} {}", self.t(message), self.t(Message::NetworkHint))
        } else {
            self.t(message).to_string()
        }
    }

    fn clamp_selection(&mut self) {
        let zones = self.zone_count();
        if self.selected_zone_index >= zones {
            self.selected_zone_index = zones.saturating_sub(1);
        }
        let issues = self.issue_count();
        if self.selected_issue_index >= issues {
            self.selected_issue_index = issues.saturating_sub(1);
        }
    }

    fn zone_count(&self) -> usize {
        self.dashboard.as_ref().map_or(0, |d| d.factory.zones.len())
    }

    fn issue_count(&self) -> usize {
        self.dashboard.as_ref().map_or(0, |d| d.issues().len())
    }

    /// The zone highlighted on the Map and Readings views.
    pub fn selected_zone(&self) -> Option<&Zone> {
        self.dashboard
            .as_ref()?
            .factory
            .zones
            .get(self.selected_zone_index)
    }

    /// Label of a zone, localized "Unknown Zone" when the layout lacks it.
    pub fn zone_name<'a>(&'a self, zone_id: &str) -> &'a str {
        self.dashboard
            .as_ref()
            .and_then(|d| d.factory.zone(zone_id))
            .map_or_else(|| self.t(Message::UnknownZone), |z| z.label.as_str())
    }

    /// The issue highlighted on the Analysis view, worst first.
    pub fn selected_issue(&self) -> Option<&Issue> {
        self.dashboard
            .as_ref()?
            .issues_by_severity()
            .get(self.selected_issue_index)
            .copied()
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.show_detail_overlay = false;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Map | View::Readings => {
                let max = self.zone_count().saturating_sub(1);
                self.selected_zone_index = (self.selected_zone_index + n).min(max);
            }
            View::Analysis => {
                let max = self.issue_count().saturating_sub(1);
                self.selected_issue_index = (self.selected_issue_index + n).min(max);
            }
            View::Chat => {
                let count = self.chat.suggestions.len();
                if count > 0 {
                    self.selected_suggestion = Some(match self.selected_suggestion {
                        Some(i) => (i + n).min(count - 1),
                        None => 0,
                    });
                }
            }
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Map | View::Readings => {
                self.selected_zone_index = self.selected_zone_index.saturating_sub(n);
            }
            View::Analysis => {
                self.selected_issue_index = self.selected_issue_index.saturating_sub(n);
            }
            View::Chat => {
                self.selected_suggestion = match self.selected_suggestion {
                    Some(0) | None => None,
                    Some(i) => Some(i.saturating_sub(n)),
                };
            }
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Map | View::Readings => self.selected_zone_index = 0,
            View::Analysis => self.selected_issue_index = 0,
            View::Chat => {}
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        match self.current_view {
            View::Map | View::Readings => {
                self.selected_zone_index = self.zone_count().saturating_sub(1);
            }
            View::Analysis => {
                self.selected_issue_index = self.issue_count().saturating_sub(1);
            }
            View::Chat => {}
        }
    }

    /// Open the issue detail overlay on the Analysis view, or send the
    /// highlighted suggestion on the Chat view.
    pub fn enter_detail(&mut self) {
        match self.current_view {
            View::Analysis if self.selected_issue().is_some() => {
                self.show_detail_overlay = true;
            }
            View::Chat => self.send_selected_suggestion(),
            _ => {}
        }
    }

    /// Navigate back: close the overlay first, then return to the Map.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else if self.current_view == View::Chat && self.selected_suggestion.is_some() {
            self.selected_suggestion = None;
        } else {
            self.current_view = View::Map;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Enter chat input mode.
    pub fn start_compose(&mut self) {
        self.current_view = View::Chat;
        self.composing = true;
    }

    /// Leave chat input mode, keeping the draft.
    pub fn cancel_compose(&mut self) {
        self.composing = false;
    }

    pub fn input_push(&mut self, c: char) {
        self.chat_input.push(c);
    }

    pub fn input_pop(&mut self) {
        self.chat_input.pop();
    }

    /// Send the draft. Blank drafts and sends while a reply is pending are
    /// refused and leave the draft in place.
    pub fn submit_chat(&mut self) {
        let draft = std::mem::take(&mut self.chat_input);
        if !self.send_chat(&draft) {
            self.chat_input = draft;
        }
    }

    /// Send the highlighted suggestion as a chat message.
    pub fn send_selected_suggestion(&mut self) {
        let Some(text) = self
            .selected_suggestion
            .and_then(|i| self.chat.suggestion(i))
            .map(str::to_string)
        else {
            return;
        };
        if self.send_chat(&text) {
            self.selected_suggestion = None;
        }
    }

    fn send_chat(&mut self, text: &str) -> bool {
        if self.chat.is_pending() {
            self.set_status_message(self.t(Message::ChatBusy).to_string());
            return false;
        }
        match self.chat.begin_send(text) {
            Some(request) => {
                tracing::debug!(history = request.history.len(), "Sending chat message");
                self.worker.chat(request);
                true
            }
            None => false,
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current dashboard to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref dashboard) = self.dashboard else {
            anyhow::bail!("No data to export");
        };
        export_report(dashboard, path)
    }

    /// Export to the default path and report the outcome in the status bar.
    pub fn export_with_status(&mut self) {
        let export_path = PathBuf::from(DEFAULT_EXPORT_PATH);
        match self.export_state(&export_path) {
            Ok(()) => {
                tracing::info!(path = %export_path.display(), "Exported dashboard");
                self.set_status_message(format!(
                    "{} {}",
                    self.t(Message::Exported),
                    export_path.display()
                ));
            }
            Err(e) => {
                self.set_status_message(format!("{}: {}", self.t(Message::ExportFailed), e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FixtureApi;
    use greenmind_client::ClientError;
    use greenmind_types::{AnalysisResult, ChatResponse, Factory, Readings, Severity};
    use std::sync::Arc;
    use tokio::runtime::Runtime;

    fn app(runtime: &Runtime) -> App {
        let api = Arc::new(FixtureApi::new("/nonexistent/fixtures"));
        let worker = ApiWorker::new(api, runtime.handle().clone());
        App::new(worker, Language::En, Theme::dark())
    }

    fn dashboard() -> Dashboard {
        let factory = Factory::builder("f1", "Demo")
            .zone(Zone::new("A", "Blow Molding", 0.0, 0.0, 40.0, 50.0))
            .zone(Zone::new("B", "Filling", 50.0, 0.0, 40.0, 50.0))
            .build();
        Dashboard::new(factory, Readings::default())
    }

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            success: true,
            issues: vec![
                Issue::new("A", Severity::Warning, "Slow"),
                Issue::new("B", Severity::Critical, "Leak"),
            ],
            ..Default::default()
        }
    }

    fn network_error() -> BackendError {
        ClientError::Connection("refused".to_string()).into()
    }

    #[test]
    fn test_view_cycle() {
        let mut view = View::Map;
        for _ in 0..View::ALL.len() {
            assert_eq!(view.next().prev(), view);
            view = view.next();
        }
        assert_eq!(view, View::Map);
    }

    #[test]
    fn test_load_then_analyze() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);

        app.handle_event(ApiEvent::Loaded(Ok(dashboard())));
        assert!(app.load_error.is_none());
        assert_eq!(app.selected_zone().unwrap().id, "A");

        app.analyze();
        assert!(app.analyzing);
        app.handle_event(ApiEvent::Analyzed(Ok(analysis())));
        assert!(!app.analyzing);

        let dashboard = app.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.severity("B"), Severity::Critical);
        // Worst issue is listed first.
        assert_eq!(app.selected_issue().unwrap().title, "Leak");
    }

    #[test]
    fn test_analyze_ignored_while_busy() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.handle_event(ApiEvent::Loaded(Ok(dashboard())));

        app.analyze();
        app.analyze();
        assert!(app.analyzing);
        assert_eq!(app.get_status_message(), Some(t(Language::En, Message::AnalysisBusy)));
    }

    #[test]
    fn test_analyze_requires_layout() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.analyze();
        assert!(!app.analyzing);
        assert_eq!(
            app.get_status_message(),
            Some(t(Language::En, Message::AnalysisNeedsData))
        );

        app.handle_event(ApiEvent::Loaded(Err(network_error())));
        app.analyze();
        assert!(!app.analyzing);
        assert_eq!(
            app.get_status_message(),
            Some(t(Language::En, Message::AnalysisNeedsData))
        );
    }

    #[test]
    fn test_failures_keep_last_good_state() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.handle_event(ApiEvent::Loaded(Ok(dashboard())));
        app.analyzing = true;
        app.handle_event(ApiEvent::Analyzed(Ok(analysis())));

        app.handle_event(ApiEvent::Loaded(Err(network_error())));
        app.analyzing = true;
        app.handle_event(ApiEvent::Analyzed(Err(network_error())));

        let dashboard = app.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.issues().len(), 2);
        assert_eq!(dashboard.severity("A"), Severity::Warning);
        assert!(!app.analyzing);
        assert!(app.load_error.as_deref().unwrap().contains("backend running"));
        assert!(app.analysis_error.is_some());
    }

    #[test]
    fn test_reload_keeps_analysis() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.handle_event(ApiEvent::Loaded(Ok(dashboard())));
        app.handle_event(ApiEvent::Analyzed(Ok(analysis())));
        app.handle_event(ApiEvent::Loaded(Ok(dashboard())));

        assert_eq!(app.dashboard.as_ref().unwrap().severity("B"), Severity::Critical);
    }

    #[test]
    fn test_chat_flow() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);

        app.start_compose();
        for c in "Energy?".chars() {
            app.input_push(c);
        }
        app.submit_chat();
        assert!(app.chat_input.is_empty());
        assert!(app.chat.is_pending());

        // A second send while pending keeps the draft.
        app.chat_input = "again".to_string();
        app.submit_chat();
        assert_eq!(app.chat_input, "again");

        app.handle_event(ApiEvent::ChatReplied(Ok(ChatResponse {
            success: true,
            message: Some("About 40 kWh".to_string()),
            ..Default::default()
        })));
        assert!(!app.chat.is_pending());
        assert_eq!(app.chat.messages().last().unwrap().content, "About 40 kWh");

        app.submit_chat();
        app.handle_event(ApiEvent::ChatReplied(Err(network_error())));
        assert_eq!(
            app.chat.messages().last().unwrap().content,
            t(Language::En, Message::ChatFailed)
        );
    }

    #[test]
    fn test_suggestions() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.set_view(View::Chat);

        app.handle_event(ApiEvent::Suggestions(Err(network_error())));
        assert!(app.chat.suggestions.is_empty());

        app.handle_event(ApiEvent::Suggestions(Ok(vec![
            "CO2?".to_string(),
            "Energy?".to_string(),
        ])));
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_suggestion, Some(1));

        app.enter_detail();
        assert!(app.chat.is_pending());
        assert_eq!(app.chat.messages().last().unwrap().content, "Energy?");
        assert_eq!(app.selected_suggestion, None);
    }

    #[test]
    fn test_language_cycle() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.handle_event(ApiEvent::Loaded(Ok(dashboard())));
        app.cycle_language();
        assert_eq!(app.language, Language::Ru);
        assert_eq!(app.zone_name("A"), "Blow Molding");
        assert_eq!(app.zone_name("Z"), "Неизвестная зона");
        assert_eq!(
            app.chat.messages()[0].content,
            t(Language::Ru, Message::ChatWelcome)
        );
        assert_eq!(app.t(Message::NoIssues), t(Language::Ru, Message::NoIssues));
    }

    #[test]
    fn test_detail_overlay_navigation() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        app.set_view(View::Analysis);
        app.enter_detail();
        assert!(!app.show_detail_overlay);

        app.handle_event(ApiEvent::Loaded(Ok(dashboard())));
        app.handle_event(ApiEvent::Analyzed(Ok(analysis())));
        app.enter_detail();
        assert!(app.show_detail_overlay);

        app.go_back();
        assert!(!app.show_detail_overlay);
        app.go_back();
        assert_eq!(app.current_view, View::Map);
    }

    #[test]
    fn test_export_state() {
        let rt = Runtime::new().unwrap();
        let mut app = app(&rt);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        assert!(app.export_state(&path).is_err());
        app.handle_event(ApiEvent::Loaded(Ok(dashboard())));
        app.export_state(&path).unwrap();
        assert!(path.exists());
    }
}
