//! Core types for BodhiPilot: the chat server's wire format and the
//! transcript lines rendered by the chat page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Reply texts produced client-side
// ─────────────────────────────────────────────

/// Shown when the server answers 401 on `/chat`.
pub const UNAUTHORIZED_REPLY: &str = "Unauthorized. Please log in again.";

/// Shown when the server's body cannot be parsed as JSON.
pub const INVALID_RESPONSE_REPLY: &str = "Server returned invalid response.";

/// Shown when the server's JSON carries no string `reply`.
pub const MISSING_REPLY: &str = "Server response did not include a reply.";

/// Alert text raised before redirecting an expired session to login.
pub const SESSION_EXPIRED_ALERT: &str = "Session expired. Please log in again.";

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

/// Body of `POST /chat`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub text: String,
}

impl ChatRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Body returned by `POST /chat`.
///
/// The server always sends `reply`, but the client never trusts that:
/// a missing or non-string field deserializes to `None`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "lenient_string")]
    pub reply: Option<String>,
}

impl ChatReply {
    /// A reply with the given text.
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// The text to render for this reply.
    pub fn display_text(&self) -> &str {
        self.reply.as_deref().unwrap_or(MISSING_REPLY)
    }
}

/// Accept any JSON value, keeping it only when it is a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Body returned by `POST /token`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body returned by `POST /register`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegisterResponse {
    pub msg: String,
}

/// Body returned by `GET /me`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MeResponse {
    pub username: String,
}

/// Error body the server sends with non-2xx statuses (`{"detail": "..."}`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// The detail as display text (validation errors arrive as arrays).
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Transcript
// ─────────────────────────────────────────────

/// Marker carried by every rendered line.
pub const MESSAGE_MARKER: &str = "message";

/// Who a transcript line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
}

impl MessageRole {
    /// Role-specific style marker.
    pub fn marker(&self) -> &'static str {
        match self {
            MessageRole::User => "user-message",
            MessageRole::Bot => "bot-message",
        }
    }
}

/// One line appended to the transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub text: String,
    pub role: MessageRole,
    pub created_at: DateTime<Utc>,
}

impl RenderedMessage {
    pub fn new(text: impl Into<String>, role: MessageRole) -> Self {
        Self {
            text: text.into(),
            role,
            created_at: Utc::now(),
        }
    }

    /// Both style markers: the shared one, then the role-specific one.
    pub fn markers(&self) -> [&'static str; 2] {
        [MESSAGE_MARKER, self.role.marker()]
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serializes_text_only() {
        let json = serde_json::to_value(ChatRequest::new("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hi"}));
    }

    #[test]
    fn test_chat_reply_ignores_extra_fields() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"reply": "hello", "model": "llama3.1:8b"}"#).unwrap();
        assert_eq!(reply.display_text(), "hello");
    }

    #[test]
    fn test_chat_reply_missing_field() {
        let reply: ChatReply = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert!(reply.reply.is_none());
        assert_eq!(reply.display_text(), MISSING_REPLY);
    }

    #[test]
    fn test_chat_reply_non_string_field() {
        let reply: ChatReply = serde_json::from_str(r#"{"reply": 42}"#).unwrap();
        assert!(reply.reply.is_none());

        let reply: ChatReply = serde_json::from_str(r#"{"reply": null}"#).unwrap();
        assert!(reply.reply.is_none());
    }

    #[test]
    fn test_chat_reply_empty_string_kept() {
        let reply: ChatReply = serde_json::from_str(r#"{"reply": ""}"#).unwrap();
        assert_eq!(reply.display_text(), "");
    }

    #[test]
    fn test_token_response_default_type() {
        let resp: TokenResponse = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
        assert_eq!(resp.token_type, "bearer");
    }

    #[test]
    fn test_error_detail_message() {
        let d: ErrorDetail = serde_json::from_str(r#"{"detail": "User already registered"}"#).unwrap();
        assert_eq!(d.message(), "User already registered");

        let d: ErrorDetail = serde_json::from_str(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();
        assert!(d.message().contains("field required"));
    }

    #[test]
    fn test_role_markers() {
        assert_eq!(MessageRole::User.marker(), "user-message");
        assert_eq!(MessageRole::Bot.marker(), "bot-message");
    }

    #[test]
    fn test_rendered_message_markers() {
        let line = RenderedMessage::new("hi", MessageRole::User);
        assert_eq!(line.markers(), ["message", "user-message"]);
        assert!(line.is_user());

        let line = RenderedMessage::new("hello", MessageRole::Bot);
        assert_eq!(line.markers(), ["message", "bot-message"]);
        assert!(!line.is_user());
    }
}
