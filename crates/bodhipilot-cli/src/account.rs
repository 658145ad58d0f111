//! `bodhipilot login | register | logout | whoami`.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Input, Password};
use tracing::info;

use bodhipilot_client::HttpChatClient;
use bodhipilot_core::config::Config;
use bodhipilot_core::session::{FileSessionStore, SessionStore};

/// Log in and store the credential pair.
pub async fn login(config: &Config, username: Option<String>) -> Result<()> {
    let username = prompt_username(username)?;
    let password = Password::new().with_prompt("Password").interact()?;

    let client = HttpChatClient::new(&config.server)?;
    let token = client
        .login(&username, &password)
        .await
        .context("login failed")?;

    let store = FileSessionStore::open(None);
    store
        .save_credentials(&token.access_token, &username)
        .with_context(|| format!("failed to save session to {}", store.path().display()))?;

    info!(username = %username, "logged in");
    println!(
        "  {} logged in as {}",
        "✓".green(),
        username.bold()
    );
    Ok(())
}

/// Create an account on the server.
pub async fn register(config: &Config, username: Option<String>) -> Result<()> {
    let username = prompt_username(username)?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords don't match")
        .interact()?;

    let client = HttpChatClient::new(&config.server)?;
    let msg = client
        .register(&username, &password)
        .await
        .context("registration failed")?;

    println!("  {} {}", "✓".green(), msg);
    println!(
        "{}",
        format!("  Run `bodhipilot login -u {username}` to sign in.").dimmed()
    );
    Ok(())
}

/// Forget the stored credential pair.
pub fn logout() -> Result<()> {
    let store = FileSessionStore::open(None);
    let had_session = store.token().is_some();
    store.clear().context("failed to clear session")?;

    if had_session {
        println!("  {} logged out", "✓".green());
    } else {
        println!("  {}", "· no session stored".dimmed());
    }
    Ok(())
}

/// Ask the server who the stored token belongs to.
pub async fn whoami(config: &Config) -> Result<()> {
    let store = FileSessionStore::open(None);
    let Some(token) = store.token() else {
        crate::helpers::print_login_hint();
        return Ok(());
    };

    let client = HttpChatClient::new(&config.server)?;
    match client.me(&token).await {
        Ok(username) => {
            println!("  {} {}", "✓".green(), username.bold());
            Ok(())
        }
        Err(e) if e.is_unauthorized() => {
            store.clear().context("failed to clear expired session")?;
            println!("{}", "Session expired. Please log in again.".yellow());
            crate::helpers::print_login_hint();
            Ok(())
        }
        Err(e) => Err(e).context("could not check session"),
    }
}

fn prompt_username(username: Option<String>) -> Result<String> {
    let username = match username {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()?,
    };
    let username = username.trim().to_string();
    anyhow::ensure!(!username.is_empty(), "username must not be empty");
    Ok(username)
}
