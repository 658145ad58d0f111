//! Recording fakes shared by the controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bodhipilot_client::{ChatBackend, ChatOutcome};
use bodhipilot_core::types::{ChatReply, MessageRole, RenderedMessage};
use tokio::sync::Notify;

use crate::driver::ChatDriver;

#[derive(Default)]
struct DriverState {
    lines: Vec<RenderedMessage>,
    scrolled_at: Option<usize>,
    welcome: Option<String>,
    inputs_cleared: usize,
    alerts: Vec<String>,
    navigations: Vec<String>,
}

/// A `ChatDriver` that records every call.
pub struct RecordingDriver {
    state: Mutex<DriverState>,
    welcome_banner: bool,
    logout_control: bool,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DriverState::default()),
            welcome_banner: true,
            logout_control: true,
        }
    }

    /// A front end with neither a welcome banner nor a logout control.
    pub fn bare() -> Self {
        Self {
            welcome_banner: false,
            logout_control: false,
            ..Self::new()
        }
    }

    pub fn transcript(&self) -> Vec<(String, MessageRole)> {
        let state = self.state.lock().unwrap();
        state.lines.iter().map(|l| (l.text.clone(), l.role)).collect()
    }

    pub fn is_scrolled_to_bottom(&self) -> bool {
        let state = self.state.lock().unwrap();
        !state.lines.is_empty() && state.scrolled_at == Some(state.lines.len())
    }

    pub fn welcome(&self) -> Option<String> {
        self.state.lock().unwrap().welcome.clone()
    }

    pub fn inputs_cleared(&self) -> usize {
        self.state.lock().unwrap().inputs_cleared
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.lock().unwrap().alerts.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }
}

impl ChatDriver for RecordingDriver {
    fn append_message(&self, message: &RenderedMessage) {
        self.state.lock().unwrap().lines.push(message.clone());
    }

    fn scroll_to_bottom(&self) {
        let mut state = self.state.lock().unwrap();
        state.scrolled_at = Some(state.lines.len());
    }

    fn has_welcome_banner(&self) -> bool {
        self.welcome_banner
    }

    fn set_welcome(&self, text: &str) {
        self.state.lock().unwrap().welcome = Some(text.to_string());
    }

    fn clear_input(&self) {
        self.state.lock().unwrap().inputs_cleared += 1;
    }

    fn has_logout_control(&self) -> bool {
        self.logout_control
    }

    fn alert(&self, text: &str) {
        self.state.lock().unwrap().alerts.push(text.to_string());
    }

    fn navigate(&self, path: &str) {
        self.state.lock().unwrap().navigations.push(path.to_string());
    }
}

/// A `ChatBackend` that answers every call with the same outcome.
///
/// When given a driver, it also notes how many transcript lines existed at
/// the moment each request went out.
pub struct ScriptedBackend {
    outcome: ChatOutcome,
    calls: Mutex<Vec<(String, String)>>,
    observed_lines: Mutex<Vec<usize>>,
    observer: Option<Arc<RecordingDriver>>,
}

impl ScriptedBackend {
    pub fn new(outcome: ChatOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
            observed_lines: Mutex::new(Vec::new()),
            observer: None,
        }
    }

    pub fn observing(outcome: ChatOutcome, driver: Arc<RecordingDriver>) -> Self {
        Self {
            observer: Some(driver),
            ..Self::new(outcome)
        }
    }

    /// `(token, text)` of every call, in order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn observed_lines(&self) -> Vec<usize> {
        self.observed_lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send_chat(&self, token: &str, text: &str) -> ChatOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), text.to_string()));
        if let Some(driver) = &self.observer {
            let lines = driver.transcript().len();
            self.observed_lines.lock().unwrap().push(lines);
        }
        self.outcome.clone()
    }

    fn display_name(&self) -> &str {
        "scripted"
    }
}

/// A `ChatBackend` that answers `re: <text>`, holding back the answer for
/// any text passed to `hold` until `release` is called for it.
#[derive(Default)]
pub struct GatedBackend {
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&self, text: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(text.to_string(), Arc::new(Notify::new()));
    }

    /// Lets the held request through. Safe to call before it arrives.
    pub fn release(&self, text: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(text) {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl ChatBackend for GatedBackend {
    async fn send_chat(&self, _token: &str, text: &str) -> ChatOutcome {
        let gate = self.gates.lock().unwrap().get(text).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        ChatOutcome::Reply(ChatReply::text(format!("re: {text}")))
    }

    fn display_name(&self) -> &str {
        "gated"
    }
}
