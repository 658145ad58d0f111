//! Shared CLI helpers: transcript line formatting, banners, prompts.

use chrono::Local;
use colored::Colorize;

use bodhipilot_core::types::{MessageRole, RenderedMessage};

/// Format a transcript line for the terminal.
pub fn format_line(line: &RenderedMessage, assistant_name: &str, show_timestamps: bool) -> String {
    let stamp = if show_timestamps {
        format!(
            "{} ",
            line.created_at
                .with_timezone(&Local)
                .format("[%H:%M:%S]")
                .to_string()
                .dimmed()
        )
    } else {
        String::new()
    };

    let speaker = match line.role {
        MessageRole::User => "You".green().bold(),
        MessageRole::Bot => assistant_name.cyan().bold(),
    };

    format!("{stamp}{speaker}: {}", line.text)
}

/// Print the banner shown at REPL start.
pub fn print_banner(welcome: &str) {
    println!();
    println!("{}", format!("🪷 {welcome}").cyan().bold());
    println!(
        "{}",
        "Type a message, \"/logout\" to sign out, or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder while a reply is pending.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

/// Hint printed whenever the chat page sends the user back to login.
pub fn print_login_hint() {
    println!(
        "{}",
        "Not logged in. Run `bodhipilot login` to sign in.".yellow()
    );
}
