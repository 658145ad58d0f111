//! HTTP layer for the BodhiPilot chat server.
//!
//! # Architecture
//!
//! - [`traits::ChatBackend`]: the one call the chat page makes (`POST /chat`)
//! - [`http_client::HttpChatClient`]: reqwest implementation of the backend
//! - [`auth`]: `/token`, `/register`, `/me` on the same client
//! - [`error::ClientError`]: failures of the auth endpoints

pub mod auth;
pub mod error;
pub mod http_client;
pub mod traits;

pub use error::ClientError;
pub use http_client::HttpChatClient;
pub use traits::{ChatBackend, ChatOutcome};
