//! Chat backend trait: the seam between the chat page and the network.

use async_trait::async_trait;
use bodhipilot_core::types::ChatReply;

/// How a single `POST /chat` exchange ended.
///
/// Classification only; turning an outcome into transcript text and
/// session side effects is the chat page's job.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatOutcome {
    /// A JSON body was received (2xx, or non-2xx carrying a `reply`).
    Reply(ChatReply),
    /// HTTP 401, whatever the body said.
    Unauthorized,
    /// The body was not JSON.
    InvalidResponse,
    /// Non-2xx JSON body without a `reply`; `detail` is the server's error text.
    ServerError { status: u16, detail: Option<String> },
    /// The request or the body read failed below HTTP.
    NetworkError(String),
}

/// Anything that can carry a chat message to the server.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send `text` authenticated with `token` and classify the result.
    ///
    /// Never fails: every error path maps to a [`ChatOutcome`] variant.
    async fn send_chat(&self, token: &str, text: &str) -> ChatOutcome;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
