//! Chat copilot request and response types.

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior turn of the conversation, as sent in `history`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /chat`.
///
/// `history` holds the turns before `message`, oldest first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatTurn>,
}

/// Body of the `POST /chat` response.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChatResponse {
    pub success: bool,
    pub message: Option<String>,
    pub timestamp: Option<String>,
    pub error: Option<String>,
}

/// Body of the `GET /suggestions` response.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SuggestionsResponse {
    pub success: bool,
    pub suggestions: Vec<String>,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_shape() {
        let request = ChatRequest {
            message: "How do I cut CO2?".to_string(),
            history: vec![ChatTurn::assistant("Hello!"), ChatTurn::user("Hi")],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["history"][0]["role"], "assistant");
        assert_eq!(value["history"][1]["content"], "Hi");
        assert_eq!(value["message"], "How do I cut CO2?");
    }

    #[test]
    fn test_chat_response_error_shape() {
        let response: ChatResponse =
            serde_json::from_str(r#"{ "success": false, "error": "model offline" }"#).unwrap();
        assert!(!response.success);
        assert!(response.message.is_none());
        assert_eq!(response.error.as_deref(), Some("model offline"));
    }
}
