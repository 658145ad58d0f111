//! Page wiring: what happens once when the chat page loads, and the two
//! handlers it exposes afterwards.
//!
//! ```text
//! load ──► guard ──(no token)──► navigate /login, no page
//!            │
//!            └─► welcome banner ──► ChatPage { submit, logout }
//! ```
//!
//! `submit` takes `&self`, so a front end may start a second submission
//! before the first reply arrives; replies land in resolution order.

use std::sync::Arc;

use tracing::{debug, info, warn};

use bodhipilot_client::ChatBackend;
use bodhipilot_core::config::UiConfig;
use bodhipilot_core::session::SessionStore;
use bodhipilot_core::types::{MessageRole, RenderedMessage};

use crate::driver::{ChatDriver, LOGIN_PATH};
use crate::guard::ensure_logged_in;
use crate::renderer::add_message;
use crate::sender::MessageSender;

pub struct ChatPage {
    store: Arc<dyn SessionStore>,
    driver: Arc<dyn ChatDriver>,
    sender: MessageSender,
}

impl ChatPage {
    /// Run the load-time wiring.
    ///
    /// Returns `None` when the session guard redirected to login; nothing
    /// else (banner included) happens in that case.
    pub fn load(
        ui: &UiConfig,
        backend: Arc<dyn ChatBackend>,
        store: Arc<dyn SessionStore>,
        driver: Arc<dyn ChatDriver>,
    ) -> Option<Self> {
        if !ensure_logged_in(store.as_ref(), driver.as_ref()) {
            return None;
        }

        if driver.has_welcome_banner() {
            if let Some(username) = store.username() {
                driver.set_welcome(&ui.welcome_text(&username));
            }
        }

        debug!(backend = backend.display_name(), "Chat page loaded");
        let sender = MessageSender::new(backend, store.clone(), driver.clone());
        Some(ChatPage {
            store,
            driver,
            sender,
        })
    }

    /// Handle one submission of the input form.
    ///
    /// Whitespace-only input is ignored: nothing is rendered and nothing is
    /// sent. Otherwise returns the bot line that was appended.
    pub async fn submit(&self, raw: &str) -> Option<RenderedMessage> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        self.driver.clear_input();
        add_message(self.driver.as_ref(), text, MessageRole::User);

        let reply = self.sender.send(text).await;
        Some(add_message(
            self.driver.as_ref(),
            reply.display_text(),
            MessageRole::Bot,
        ))
    }

    /// Handle the logout control: drop the credential pair and go to login.
    ///
    /// Returns `false` (and does nothing) when the front end has no logout
    /// control.
    pub fn logout(&self) -> bool {
        if !self.driver.has_logout_control() {
            return false;
        }
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear session on logout: {}", e);
        }
        info!("Logged out");
        self.driver.navigate(LOGIN_PATH);
        true
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
