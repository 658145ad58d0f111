//! Config loader: reads `~/.bodhipilot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.bodhipilot/config.json`
//! 3. Environment variables `BODHIPILOT_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `BODHIPILOT_SERVER__BASE_URL` → `server.base_url`
/// - `BODHIPILOT_SERVER__TIMEOUT_SECS` → `server.timeout_secs`
/// - `BODHIPILOT_UI__ASSISTANT_NAME` → `ui.assistant_name`
/// - `BODHIPILOT_UI__SHOW_TIMESTAMPS` → `ui.show_timestamps`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("BODHIPILOT_SERVER__BASE_URL") {
        config.server.base_url = val;
    }
    if let Ok(val) = std::env::var("BODHIPILOT_SERVER__TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(n) => config.server.timeout_secs = n,
            Err(_) => warn!("Ignoring BODHIPILOT_SERVER__TIMEOUT_SECS={val:?}: not a number"),
        }
    }
    if let Ok(val) = std::env::var("BODHIPILOT_UI__ASSISTANT_NAME") {
        config.ui.assistant_name = val;
    }
    if let Ok(val) = std::env::var("BODHIPILOT_UI__SHOW_TIMESTAMPS") {
        config.ui.show_timestamps = val == "true" || val == "1";
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
