//! Configuration schema.
//!
//! Hierarchy: `Config` → `ServerConfig`, `UiConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};

/// Root configuration: loaded from `~/.bodhipilot/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub server: ServerConfig,
    pub ui: UiConfig,
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// Where the chat server lives and how long to wait for it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Base URL; endpoint paths (`/chat`, `/token`, ...) are appended to it.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 120,
        }
    }
}

// ─────────────────────────────────────────────
// UI
// ─────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiConfig {
    /// Name shown in the welcome banner and on bot lines.
    pub assistant_name: String,
    /// Prefix transcript lines with their local time.
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            assistant_name: "BodhiPilot".to_string(),
            show_timestamps: false,
        }
    }
}

impl UiConfig {
    /// Welcome banner text for a logged-in user.
    pub fn welcome_text(&self, username: &str) -> String {
        format!("{} — {}", self.assistant_name, username)
    }
}
