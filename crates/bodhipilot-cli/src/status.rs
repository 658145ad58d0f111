//! `bodhipilot status`: show configuration and session state.

use anyhow::Result;
use colored::Colorize;

use bodhipilot_core::config::{get_config_path, load_config};
use bodhipilot_core::session::{FileSessionStore, SessionStore};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "🪷 BodhiPilot Status".cyan().bold());
    println!();

    println!(
        "  {:<14} {} {}",
        "Config:".bold(),
        config_path.display(),
        found_marker(config_path.exists())
    );

    println!("  {:<14} {}", "Server:".bold(), config.server.base_url);
    println!(
        "  {:<14} {}",
        "Timeout:".bold(),
        format!("{}s", config.server.timeout_secs).dimmed()
    );

    let store = FileSessionStore::open(None);
    println!(
        "  {:<14} {} {}",
        "Session:".bold(),
        store.path().display(),
        found_marker(store.path().exists())
    );

    let session = match (store.token(), store.username()) {
        (Some(_), Some(username)) => format!("{} {}", "✓".green(), username),
        (Some(_), None) => format!("{} (token only)", "✓".green()),
        _ => format!("{}", "· not logged in".dimmed()),
    };
    println!("  {:<14} {}", "Logged in:".bold(), session);

    println!();

    Ok(())
}

fn found_marker(exists: bool) -> String {
    if exists {
        "✓".green().to_string()
    } else {
        "(not found)".red().to_string()
    }
}
