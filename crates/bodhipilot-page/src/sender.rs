//! Message sender: one `POST /chat` per call, always resolving to a reply.
//!
//! Outcome → reply text:
//!
//! | outcome | reply | side effects |
//! |---------|-------|--------------|
//! | JSON with `reply` | the reply | none |
//! | JSON without `reply` | `Server response did not include a reply.` | none |
//! | 401 | `Unauthorized. Please log in again.` | clear session, alert, go to login |
//! | not JSON | `Server returned invalid response.` | none |
//! | other non-2xx | `Server error (<code>): <detail>` | none |
//! | transport failure | `Could not reach the server: <cause>` | none |

use std::sync::Arc;

use tracing::{debug, warn};

use bodhipilot_client::{ChatBackend, ChatOutcome};
use bodhipilot_core::session::SessionStore;
use bodhipilot_core::types::{
    ChatReply, INVALID_RESPONSE_REPLY, SESSION_EXPIRED_ALERT, UNAUTHORIZED_REPLY,
};
use bodhipilot_core::utils::truncate_string;

use crate::driver::{ChatDriver, LOGIN_PATH};

pub struct MessageSender {
    backend: Arc<dyn ChatBackend>,
    store: Arc<dyn SessionStore>,
    driver: Arc<dyn ChatDriver>,
}

impl MessageSender {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        store: Arc<dyn SessionStore>,
        driver: Arc<dyn ChatDriver>,
    ) -> Self {
        Self {
            backend,
            store,
            driver,
        }
    }

    /// Send `text` (already trimmed, non-empty) and return the reply to show.
    pub async fn send(&self, text: &str) -> ChatReply {
        // The session can vanish between load and submit (another 401, logout).
        let Some(token) = self.store.token() else {
            warn!("No stored token at send time");
            return self.expire_session();
        };

        debug!(
            backend = self.backend.display_name(),
            text = %truncate_string(text, 60),
            "Sending message"
        );

        match self.backend.send_chat(&token, text).await {
            ChatOutcome::Reply(reply) => reply,
            ChatOutcome::Unauthorized => self.expire_session(),
            ChatOutcome::InvalidResponse => ChatReply::text(INVALID_RESPONSE_REPLY),
            ChatOutcome::ServerError { status, detail } => {
                ChatReply::text(server_error_text(status, detail.as_deref()))
            }
            ChatOutcome::NetworkError(cause) => ChatReply::text(network_error_text(&cause)),
        }
    }

    /// Wipe the credential pair, tell the user, and leave for login.
    fn expire_session(&self) -> ChatReply {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear expired session: {}", e);
        }
        self.driver.alert(SESSION_EXPIRED_ALERT);
        self.driver.navigate(LOGIN_PATH);
        ChatReply::text(UNAUTHORIZED_REPLY)
    }
}

fn server_error_text(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("Server error ({status}): {detail}"),
        None => format!("Server error ({status})."),
    }
}

fn network_error_text(cause: &str) -> String {
    format!("Could not reach the server: {cause}")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
