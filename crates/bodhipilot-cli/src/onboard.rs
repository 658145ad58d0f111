//! `bodhipilot onboard`: initialize configuration and data directories.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use bodhipilot_core::config::{get_config_path, save_config, Config};
use bodhipilot_core::utils::get_history_path;

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "🪷 BodhiPilot — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    ensure_config(&config_path)?;

    if let Some(history_dir) = get_history_path().parent() {
        std::fs::create_dir_all(history_dir)?;
        println!("  {} history dir at {}", "✓".green(), history_dir.display());
    }

    println!();
    println!(
        "{}",
        "  Setup complete! Run `bodhipilot login` and then `bodhipilot chat`.".green()
    );
    println!();

    Ok(())
}

/// Write a default config at `path` unless one exists. Returns whether it wrote.
fn ensure_config(path: &Path) -> Result<bool> {
    if path.exists() {
        println!("  {} config already exists at {}", "✓".green(), path.display());
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))?;
    println!("  {} created config at {}", "✓".green(), path.display());
    Ok(true)
}
