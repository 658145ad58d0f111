//! Chat driver trait: everything the page needs from its front end.
//!
//! A driver stands for the transcript view, the input field, the optional
//! welcome banner and logout control, and the browser-style navigation
//! between pages. The terminal REPL implements it; tests use a recorder.

use bodhipilot_core::types::RenderedMessage;

/// Navigation target for missing, expired, or ended sessions.
pub const LOGIN_PATH: &str = "/login";

pub trait ChatDriver: Send + Sync {
    /// Append one line to the bottom of the transcript view.
    fn append_message(&self, message: &RenderedMessage);

    /// Bring the newest transcript line into view.
    fn scroll_to_bottom(&self);

    /// Whether this front end shows a welcome banner.
    fn has_welcome_banner(&self) -> bool {
        true
    }

    fn set_welcome(&self, text: &str);

    /// Empty the input field after a submission is accepted.
    fn clear_input(&self);

    /// Whether this front end offers a logout control.
    fn has_logout_control(&self) -> bool {
        true
    }

    /// Blocking notice the user must see (e.g. session expired).
    fn alert(&self, text: &str);

    /// Leave the chat page for `path`.
    fn navigate(&self, path: &str);
}
