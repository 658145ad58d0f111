//! BodhiPilot Core: shared types, configuration, and session storage.
//!
//! This crate contains:
//! - **types**: wire types for the chat server and rendered transcript lines
//! - **config**: `~/.bodhipilot/config.json` schema, loader, env overrides
//! - **session**: the credential-pair store (`token` + `username`)
//! - **utils**: data-directory paths and small string helpers

pub mod config;
pub mod session;
pub mod types;
pub mod utils;

pub use config::Config;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};
pub use types::{ChatReply, ChatRequest, MessageRole, RenderedMessage};
