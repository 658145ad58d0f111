//! Utility helpers: path resolution, URL joining, string manipulation.

use std::path::PathBuf;

/// Get the BodhiPilot data directory (e.g. `~/.bodhipilot/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".bodhipilot")
}

/// Get the stored-session file (e.g. `~/.bodhipilot/session.json`).
pub fn get_session_path() -> PathBuf {
    get_data_path().join("session.json")
}

/// Get the REPL history file (e.g. `~/.bodhipilot/history/chat_history`).
pub fn get_history_path() -> PathBuf {
    get_data_path().join("history").join("chat_history")
}

/// Join a server base URL and an absolute endpoint path.
///
/// Tolerates a trailing slash on `base` and a missing leading slash on `path`.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_plain() {
        assert_eq!(join_url("http://localhost:8000", "/chat"), "http://localhost:8000/chat");
    }

    #[test]
    fn test_join_url_trailing_slash() {
        assert_eq!(join_url("http://localhost:8000/", "/chat"), "http://localhost:8000/chat");
        assert_eq!(join_url("http://localhost:8000/", "token"), "http://localhost:8000/token");
    }

    #[test]
    fn test_join_url_keeps_prefix() {
        assert_eq!(join_url("https://example.com/bodhi", "/me"), "https://example.com/bodhi/me");
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate_string("hello world, this is a long string", 15);
        assert_eq!(result, "hello world,...");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate_string("こんにちは世界です", 5), "こん...");
    }

    #[test]
    fn test_data_path_ends_with_bodhipilot() {
        assert!(get_data_path().ends_with(".bodhipilot"));
    }

    #[test]
    fn test_session_and_history_paths() {
        let session = get_session_path();
        assert!(session.ends_with("session.json"));
        assert!(session.parent().unwrap().ends_with(".bodhipilot"));

        let history = get_history_path();
        assert!(history.to_string_lossy().contains("history"));
        assert!(history.ends_with("chat_history"));
    }
}
