//! Terminal front end for the chat page.
//!
//! The REPL prompt already shows what the user typed, so user lines are
//! kept in the transcript but not printed again. Navigation can't leave a
//! terminal; it is recorded so the REPL knows to stop.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use colored::Colorize;
use tracing::debug;

use bodhipilot_core::config::UiConfig;
use bodhipilot_core::types::RenderedMessage;
use bodhipilot_page::{ChatDriver, LOGIN_PATH};

use crate::helpers;

pub struct TerminalDriver {
    assistant_name: String,
    show_timestamps: bool,
    transcript: Mutex<Vec<RenderedMessage>>,
    left_for: Mutex<Option<String>>,
    waiting: AtomicBool,
}

impl TerminalDriver {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            assistant_name: ui.assistant_name.clone(),
            show_timestamps: ui.show_timestamps,
            transcript: Mutex::new(Vec::new()),
            left_for: Mutex::new(None),
            waiting: AtomicBool::new(false),
        }
    }

    /// Show the "thinking" placeholder until the next bot line arrives.
    pub fn begin_wait(&self) {
        self.waiting.store(true, Ordering::SeqCst);
        helpers::print_thinking();
    }

    /// Remove the placeholder if it is still showing.
    pub fn end_wait(&self) {
        if self.waiting.swap(false, Ordering::SeqCst) {
            helpers::clear_thinking();
        }
    }

    /// Where the page navigated to, if it did.
    pub fn left_for(&self) -> Option<String> {
        self.left_for.lock().unwrap().clone()
    }

    pub fn transcript_len(&self) -> usize {
        self.transcript.lock().unwrap().len()
    }
}

impl ChatDriver for TerminalDriver {
    fn append_message(&self, message: &RenderedMessage) {
        if !message.is_user() {
            self.end_wait();
            println!();
            println!(
                "{}",
                helpers::format_line(message, &self.assistant_name, self.show_timestamps)
            );
            println!();
        }
        self.transcript.lock().unwrap().push(message.clone());
    }

    fn scroll_to_bottom(&self) {
        let _ = std::io::stdout().flush();
    }

    fn set_welcome(&self, text: &str) {
        helpers::print_banner(text);
    }

    fn clear_input(&self) {
        debug!("input accepted");
    }

    fn alert(&self, text: &str) {
        self.end_wait();
        eprintln!("\n{} {}", "⚠".yellow().bold(), text.yellow());
    }

    fn navigate(&self, path: &str) {
        debug!(path, "navigating away from chat");
        if path == LOGIN_PATH {
            helpers::print_login_hint();
        }
        *self.left_for.lock().unwrap() = Some(path.to_string());
    }
}
