//! Chat transcript state for the factory copilot.

use std::time::SystemTime;

use greenmind_types::{ChatRequest, ChatRole, ChatTurn, Language};

use crate::i18n::{t, Message};

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Backend timestamp when the reply carried one.
    pub timestamp: Option<String>,
    pub received_at: SystemTime,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: None,
            received_at: SystemTime::now(),
        }
    }
}

/// Transcript, suggested prompts and the in-flight flag.
///
/// Only one message can be awaiting a reply at a time; sends while a reply is
/// pending are refused rather than queued.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pub suggestions: Vec<String>,
    pending: bool,
}

impl ChatSession {
    /// A session opened with the localized welcome message.
    pub fn new(language: Language) -> Self {
        Self {
            messages: vec![ChatMessage::new(
                ChatRole::Assistant,
                t(language, Message::ChatWelcome),
            )],
            suggestions: Vec::new(),
            pending: false,
        }
    }

    /// Re-translate the welcome message while it is still the only one.
    pub fn set_language(&mut self, language: Language) {
        if let [welcome] = self.messages.as_mut_slice() {
            welcome.content = t(language, Message::ChatWelcome).to_string();
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record a user message and build the request for it.
    ///
    /// Returns `None` for blank input or while a reply is pending. The
    /// request history holds every message before this one, welcome included.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() || self.pending {
            return None;
        }

        let history = self
            .messages
            .iter()
            .map(|m| ChatTurn {
                role: m.role,
                content: m.content.clone(),
            })
            .collect();

        self.messages.push(ChatMessage::new(ChatRole::User, text));
        self.pending = true;

        Some(ChatRequest {
            message: text.to_string(),
            history,
        })
    }

    /// Append the assistant reply and clear the pending flag.
    pub fn receive_reply(&mut self, content: String, timestamp: Option<String>) {
        let mut message = ChatMessage::new(ChatRole::Assistant, content);
        message.timestamp = timestamp;
        self.messages.push(message);
        self.pending = false;
    }

    /// Append the localized apology and clear the pending flag.
    pub fn receive_error(&mut self, language: Language) {
        self.messages.push(ChatMessage::new(
            ChatRole::Assistant,
            t(language, Message::ChatFailed),
        ));
        self.pending = false;
    }

    /// Suggested prompt at `index`, if any.
    pub fn suggestion(&self, index: usize) -> Option<&str> {
        self.suggestions.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_welcome() {
        let session = ChatSession::new(Language::En);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, ChatRole::Assistant);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_send_builds_history_from_prior_messages() {
        let mut session = ChatSession::new(Language::En);
        let request = session.begin_send("  How much CO2?  ").unwrap();

        assert_eq!(request.message, "How much CO2?");
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.history[0].role, ChatRole::Assistant);
        assert_eq!(session.messages().len(), 2);
        assert!(session.is_pending());

        session.receive_reply("About 3 tonnes".to_string(), Some("2025-01-01T00:00:00Z".into()));
        assert!(!session.is_pending());

        let request = session.begin_send("And energy?").unwrap();
        assert_eq!(request.history.len(), 3);
        assert_eq!(request.history[1], ChatTurn::user("How much CO2?"));
        assert_eq!(request.history[2], ChatTurn::assistant("About 3 tonnes"));
    }

    #[test]
    fn test_blank_and_pending_sends_refused() {
        let mut session = ChatSession::new(Language::En);
        assert!(session.begin_send("   ").is_none());
        assert!(session.begin_send("first").is_some());
        assert!(session.begin_send("second").is_none());
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn test_error_appends_localized_apology() {
        let mut session = ChatSession::new(Language::Ru);
        session.begin_send("привет").unwrap();
        session.receive_error(Language::Ru);

        let last = session.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, t(Language::Ru, Message::ChatFailed));
        assert!(!session.is_pending());
    }

    #[test]
    fn test_welcome_follows_language_until_first_send() {
        let mut session = ChatSession::new(Language::En);
        session.set_language(Language::Uz);
        assert_eq!(session.messages()[0].content, t(Language::Uz, Message::ChatWelcome));

        session.begin_send("Salom").unwrap();
        session.set_language(Language::Ru);
        assert_eq!(session.messages()[0].content, t(Language::Uz, Message::ChatWelcome));
    }

    #[test]
    fn test_suggestion_lookup() {
        let mut session = ChatSession::new(Language::En);
        session.suggestions = vec!["Energy?".to_string()];
        assert_eq!(session.suggestion(0), Some("Energy?"));
        assert_eq!(session.suggestion(1), None);
    }
}
