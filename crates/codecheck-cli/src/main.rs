//! codecheck - command-line client for the CodeChecker server.
//!
//! Logs in against the server's form-login endpoint and keeps a local
//! logged-in flag, so scripts and other tooling can check session state
//! without a network round trip.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use codecheck_core::api::{ApiClient, ApiError};
use codecheck_core::auth::{
    CredentialStore, Credentials, FileStore, SessionClient, SessionStore, SESSION_KEY,
};
use codecheck_core::config::Config;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "codecheck.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(fmt::layer().with_ansi(false).with_writer(file_writer))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

fn print_usage() {
    eprintln!("Usage: codecheck <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login [--user NAME]   Log in to the CodeChecker server");
    eprintln!("  logout                Drop the local logged-in flag");
    eprintln!("  status                Show current session state");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let data_dir = Config::data_dir()?;
    let log_dir = data_dir.join("logs");
    let _ = std::fs::create_dir_all(&log_dir);
    let _guard = init_tracing(Some(&log_dir));

    let mut config = Config::load()?;
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::new(data_dir.join("store"))?);
    let api = ApiClient::new(config.server_url())?;
    let client = SessionClient::new(api, store.clone());

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("login") => login(&client, store.as_ref(), &mut config, &args[2..]).await,
        Some("logout") => logout(&client),
        Some("status") => status(&client, &config),
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }
}

async fn login(
    client: &SessionClient,
    store: &dyn SessionStore,
    config: &mut Config,
    args: &[String],
) -> Result<()> {
    let mut preset_user = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--user" => preset_user = iter.next().cloned(),
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    let username = match preset_user {
        Some(name) => name,
        None => prompt_username(config.last_username.as_deref())?,
    };
    if username.is_empty() {
        anyhow::bail!("Username is required");
    }

    let password = if CredentialStore::has_credentials(&username) {
        print!("Use stored password? [Y/n]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if input.trim().eq_ignore_ascii_case("n") {
            prompt_password()?
        } else {
            CredentialStore::get_password(&username)?
        }
    } else {
        prompt_password()?
    };
    if password.is_empty() {
        anyhow::bail!("Password is required");
    }

    println!("Authenticating...");
    let response = client
        .login(&Credentials::new(username.clone(), password.clone()))
        .await?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(ApiError::from_status(status, &body).into());
    }

    // Login itself leaves the flag alone; recording the session is this
    // caller's step.
    store.set(SESSION_KEY, &body)?;

    if let Err(e) = CredentialStore::store(&username, &password) {
        warn!(error = %e, "Failed to store credentials");
    }

    config.last_username = Some(username);
    config.last_login = Some(Utc::now());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    info!("Login successful");
    println!("Login successful.");
    Ok(())
}

fn logout(client: &SessionClient) -> Result<()> {
    client.logout()?;
    println!("Logged out.");
    Ok(())
}

fn status(client: &SessionClient, config: &Config) -> Result<()> {
    if client.is_logged_in()? {
        match (&config.last_username, &config.last_login) {
            (Some(user), Some(at)) => {
                println!(
                    "Logged in as {} (since {})",
                    user,
                    at.format("%Y-%m-%d %H:%M UTC")
                );
            }
            (Some(user), None) => println!("Logged in as {}", user),
            _ => println!("Logged in."),
        }
    } else {
        println!("Logged out.");
    }
    Ok(())
}

fn prompt_username(last_username: Option<&str>) -> Result<String> {
    match last_username {
        Some(last) => print!("Username [{}]: ", last),
        None => print!("Username: "),
    }
    io::stdout().flush()?;

    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    let username = username.trim();

    if username.is_empty() {
        if let Some(last) = last_username {
            return Ok(last.to_string());
        }
    }
    Ok(username.to_string())
}

fn prompt_password() -> Result<String> {
    let password = rpassword::prompt_password("Password: ")?;
    Ok(password)
}
