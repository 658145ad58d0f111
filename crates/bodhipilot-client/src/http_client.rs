//! reqwest client for the BodhiPilot server.
//!
//! One `HttpChatClient` serves every endpoint; it implements [`ChatBackend`]
//! for `/chat` and carries the auth calls in [`crate::auth`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error, warn};

use bodhipilot_core::config::ServerConfig;
use bodhipilot_core::types::{ChatReply, ChatRequest, ErrorDetail};
use bodhipilot_core::utils::{join_url, truncate_string};

use crate::error::ClientError;
use crate::traits::{ChatBackend, ChatOutcome};

// ─────────────────────────────────────────────
// HttpChatClient
// ─────────────────────────────────────────────

pub struct HttpChatClient {
    /// HTTP client (shared, connection-pooled).
    pub(crate) client: reqwest::Client,
    /// Server base URL (e.g. `"http://127.0.0.1:8000"`).
    pub(crate) base_url: String,
}

impl std::fmt::Debug for HttpChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpChatClient {
    /// Build a client for the server described by `config`.
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ClientError::Build)?;

        Ok(HttpChatClient {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint path such as `/chat`.
    pub(crate) fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn send_chat(&self, token: &str, text: &str) -> ChatOutcome {
        let url = self.url("/chat");
        debug!(url = %url, chars = text.chars().count(), "Sending chat message");

        let result = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&ChatRequest::new(text))
            .send()
            .await;

        let response = match result {
            Ok(resp) => resp,
            Err(e) => {
                error!(url = %url, error = %e, "HTTP request failed");
                return ChatOutcome::NetworkError(e.to_string());
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Chat request rejected with 401");
            return ChatOutcome::Unauthorized;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(status = %status, error = %e, "Failed to read response body");
                return ChatOutcome::NetworkError(e.to_string());
            }
        };

        classify_body(status, &body)
    }

    fn display_name(&self) -> &str {
        &self.base_url
    }
}

/// Classify a non-401 `/chat` response body.
fn classify_body(status: StatusCode, body: &str) -> ChatOutcome {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                status = %status,
                error = %e,
                body = %truncate_string(body, 120),
                "Response body is not JSON"
            );
            return ChatOutcome::InvalidResponse;
        }
    };

    // Bodies that aren't objects carry no `reply`.
    let reply: ChatReply = serde_json::from_value(value.clone()).unwrap_or_default();

    if status.is_success() || reply.reply.is_some() {
        debug!(
            status = %status,
            has_reply = reply.reply.is_some(),
            "Chat reply received"
        );
        return ChatOutcome::Reply(reply);
    }

    let detail = serde_json::from_value::<ErrorDetail>(value)
        .ok()
        .map(|d| d.message());
    error!(
        status = %status,
        detail = detail.as_deref().unwrap_or("-"),
        "Chat request failed"
    );
    ChatOutcome::ServerError {
        status: status.as_u16(),
        detail,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> HttpChatClient {
        HttpChatClient::new(&ServerConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    // ── Unit tests ──

    #[test]
    fn test_url_trailing_slash() {
        let client = client_for("http://localhost:8000/");
        assert_eq!(client.url("/chat"), "http://localhost:8000/chat");
    }

    #[test]
    fn test_classify_success() {
        let outcome = classify_body(StatusCode::OK, r#"{"reply": "hello"}"#);
        assert_eq!(outcome, ChatOutcome::Reply(ChatReply::text("hello")));
    }

    #[test]
    fn test_classify_non_object_json() {
        let outcome = classify_body(StatusCode::OK, r#""just a string""#);
        assert_eq!(outcome, ChatOutcome::Reply(ChatReply::default()));
    }

    #[test]
    fn test_classify_not_json() {
        let outcome = classify_body(StatusCode::OK, "<html>oops</html>");
        assert_eq!(outcome, ChatOutcome::InvalidResponse);
    }

    #[test]
    fn test_classify_server_error_detail() {
        let outcome = classify_body(
            StatusCode::BAD_GATEWAY,
            r#"{"detail": "Ollama connection error: refused"}"#,
        );
        assert_eq!(
            outcome,
            ChatOutcome::ServerError {
                status: 502,
                detail: Some("Ollama connection error: refused".to_string()),
            }
        );
    }

    #[test]
    fn test_classify_server_error_with_reply() {
        let outcome = classify_body(StatusCode::INTERNAL_SERVER_ERROR, r#"{"reply": "degraded"}"#);
        assert_eq!(outcome, ChatOutcome::Reply(ChatReply::text("degraded")));
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_send_chat_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("Authorization", "Bearer abc"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({"text": "hi"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"reply": "hello"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let outcome = client.send_chat("abc", "hi").await;

        assert_eq!(outcome, ChatOutcome::Reply(ChatReply::text("hello")));
    }

    #[tokio::test]
    async fn test_send_chat_unauthorized_ignores_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"reply": "should be ignored"})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        assert_eq!(client.send_chat("stale", "hi").await, ChatOutcome::Unauthorized);
    }

    #[tokio::test]
    async fn test_send_chat_invalid_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Internal hiccup"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        assert_eq!(client.send_chat("abc", "hi").await, ChatOutcome::InvalidResponse);
    }

    #[tokio::test]
    async fn test_send_chat_network_error() {
        // Point to a port that's not listening
        let client = client_for("http://127.0.0.1:1");
        let outcome = client.send_chat("abc", "hi").await;
        assert!(matches!(outcome, ChatOutcome::NetworkError(_)));
    }
}
