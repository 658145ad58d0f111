//! BodhiPilot CLI: entry point.
//!
//! # Commands
//!
//! - `bodhipilot chat [-m MESSAGE]`: chat with the server (single-shot or REPL)
//! - `bodhipilot login [-u USER]`: sign in and store the session
//! - `bodhipilot register [-u USER]`: create an account
//! - `bodhipilot logout`: forget the stored session
//! - `bodhipilot whoami`: check the stored session against the server
//! - `bodhipilot status`: show configuration and session state
//! - `bodhipilot onboard`: write a default config

mod account;
mod helpers;
mod onboard;
mod repl;
mod status;
mod terminal;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use bodhipilot_client::HttpChatClient;
use bodhipilot_core::config::{load_config, Config};
use bodhipilot_core::session::FileSessionStore;
use bodhipilot_page::ChatPage;

use crate::terminal::TerminalDriver;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🪷 BodhiPilot: terminal chat client
#[derive(Parser)]
#[command(name = "bodhipilot", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with BodhiPilot (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Create an account on the server
    Register {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show which user the stored session belongs to
    Whoami,

    /// Show configuration and session state
    Status,

    /// Initialize configuration
    Onboard,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    match cli.command {
        Commands::Chat { message } => run_chat(&load_config(None), message).await,
        Commands::Login { username } => account::login(&load_config(None), username).await,
        Commands::Register { username } => account::register(&load_config(None), username).await,
        Commands::Logout => account::logout(),
        Commands::Whoami => account::whoami(&load_config(None)).await,
        Commands::Status => status::run(),
        Commands::Onboard => onboard::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(config: &Config, message: Option<String>) -> Result<()> {
    let backend = Arc::new(
        HttpChatClient::new(&config.server).context("failed to create chat client")?,
    );
    let store = Arc::new(FileSessionStore::open(None));
    let driver = Arc::new(TerminalDriver::new(&config.ui));

    let Some(page) = ChatPage::load(&config.ui, backend, store, driver.clone()) else {
        // The guard already printed the login hint
        return Ok(());
    };

    match message {
        Some(msg) => {
            info!(server = %config.server.base_url, "sending single message");
            driver.begin_wait();
            page.submit(&msg).await;
            driver.end_wait();
        }
        None => {
            repl::run(page, driver).await?;
        }
    }

    Ok(())
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("bodhipilot=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}
