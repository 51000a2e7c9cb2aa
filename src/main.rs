//! Opsdash - a minimal terminal dashboard for internal ops.
//!
//! A single configured admin account, session-based login with a timeout,
//! and a small command loop standing in for the dashboard pages.

mod app;
mod auth;
mod config;
mod utils;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use config::Config;

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr and to the configured log file. The returned appender
/// guard must stay alive for the file writer to keep flushing.
fn init_tracing(config: &Config) -> tracing_appender::non_blocking::WorkerGuard {
    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(filter)
        .init();

    guard
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands. The hash generator runs before config
    // validation, which cannot pass without a hash to configure.
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--hash-password" {
        return hash_password_prompt();
    }

    let config = Config::load();
    let _guard = init_tracing(&config);

    config.validate()?;
    info!("{} starting", config.app_name);
    if config.debug {
        warn!("Debug mode enabled");
    }

    let mut app = App::new(config);
    run(&mut app)?;

    info!("Shutting down");
    Ok(())
}

/// Prompt for a password and print its PHC hash for pasting into `.env`
fn hash_password_prompt() -> Result<()> {
    let password = rpassword::prompt_password("Password to hash: ")?;
    let hashed = auth::hash_password(&password)?;
    println!("{}", hashed);
    Ok(())
}

fn run(app: &mut App) -> Result<()> {
    let stdin = io::stdin();

    println!("{}", app.config.app_name);

    loop {
        match app.state {
            AppState::Quitting => return Ok(()),
            AppState::LoginScreen => login_screen(app, &stdin)?,
            AppState::Dashboard => dashboard(app, &stdin)?,
        }
    }
}

fn login_screen(app: &mut App, stdin: &io::Stdin) -> Result<()> {
    print!("Username: ");
    io::stdout().flush()?;

    let mut username = String::new();
    if stdin.lock().read_line(&mut username)? == 0 {
        app.quit();
        return Ok(());
    }
    let username = username.trim();

    let password = rpassword::prompt_password("Password: ")?;

    if username.is_empty() || password.is_empty() {
        println!("Enter both a username and a password");
        return Ok(());
    }

    if !app.try_login(username, &password) {
        // Same message for unknown user and wrong password
        println!("Invalid username or password");
    }
    Ok(())
}

fn dashboard(app: &mut App, stdin: &io::Stdin) -> Result<()> {
    if !app.check_session() {
        println!("Session expired, please log in again");
        return Ok(());
    }

    match app.status_line() {
        Some(status) => print!("[{}] > ", status),
        None => print!("> "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
        app.quit();
        return Ok(());
    }

    match line.trim() {
        "info" => {
            if let Some(session_info) = app.session().session_info() {
                println!("{}", serde_json::to_string_pretty(&session_info)?);
            }
        }
        "logout" => {
            app.logout();
            println!("Logged out");
        }
        "quit" | "q" => app.quit(),
        "" => {}
        other => println!("Unknown command: {} (try info, logout, quit)", other),
    }
    Ok(())
}
