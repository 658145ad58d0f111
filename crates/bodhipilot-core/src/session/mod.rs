//! Session store: the stored credential pair (`token` + `username`).
//!
//! # Disk format
//!
//! One JSON object at `~/.bodhipilot/session.json`:
//! `{"token": "eyJ...", "username": "alice"}`.
//! Logging out or an expired session deletes the whole file, so the two
//! keys always disappear together.

pub mod store;

pub use store::{
    FileSessionStore, MemorySessionStore, SessionStore, StoreError, TOKEN_KEY, USERNAME_KEY,
};
