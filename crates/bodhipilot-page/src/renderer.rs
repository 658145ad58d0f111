//! Message renderer.

use bodhipilot_core::types::{MessageRole, RenderedMessage};

use crate::driver::ChatDriver;

/// Append a new `role` line with `text` and scroll it into view.
///
/// Always adds a line; never merges with or replaces an earlier one.
pub fn add_message(driver: &dyn ChatDriver, text: &str, role: MessageRole) -> RenderedMessage {
    let line = RenderedMessage::new(text, role);
    driver.append_message(&line);
    driver.scroll_to_bottom();
    line
}
