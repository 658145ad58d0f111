//! BodhiPilot chat page: the controller behind the chat screen.
//!
//! This crate contains:
//! - **driver**: the `ChatDriver` trait a front end implements (view, input, navigation)
//! - **guard**: the session check run before anything is wired
//! - **sender**: `POST /chat` plus session-expiry handling, always yielding a reply
//! - **renderer**: appending styled lines to the transcript
//! - **page**: load-time wiring, `submit` and `logout` handlers

pub mod driver;
pub mod guard;
pub mod page;
pub mod renderer;
pub mod sender;

#[cfg(test)]
mod test_support;

pub use driver::{ChatDriver, LOGIN_PATH};
pub use guard::ensure_logged_in;
pub use page::ChatPage;
pub use renderer::add_message;
pub use sender::MessageSender;
