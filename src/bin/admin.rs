//! CLI administration tool for sheet-redirect.
//!
//! Reads the same configuration as the server and talks to the same
//! spreadsheet, without starting an HTTP listener.
//!
//! # Usage
//!
//! ```bash
//! # List the redirect table
//! cargo run --bin admin -- entries
//!
//! # Resolve a path the way the server would
//! cargo run --bin admin -- resolve "/abc?utm_source=mail"
//!
//! # Prompt for the path interactively
//! cargo run --bin admin -- resolve
//!
//! # Check credentials and sheet access
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see `sheet_redirect::config`.

use sheet_redirect::config::{self, Config, ConfigOverrides};
use sheet_redirect::domain::resolution::Outcome;
use sheet_redirect::server::build_redirect_service;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;

/// CLI tool for managing sheet-redirect.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// List the entries of the redirect table
    Entries,

    /// Resolve a request path to its redirect target
    Resolve {
        /// Raw request path, query string included (prompted if omitted)
        path: Option<String>,
    },

    /// Check credentials and access to the sheet
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load(&cli.overrides)?;

    match cli.command {
        Commands::Entries => list_entries(&config).await,
        Commands::Resolve { path } => resolve_path(&config, path).await,
        Commands::Check => check_access(&config).await,
    }
}

/// Prints every entry with its row number.
async fn list_entries(config: &Config) -> Result<()> {
    let service = build_redirect_service(config)?;

    let entries = service
        .entries()
        .await
        .with_context(|| format!("Failed to fetch sheet '{}'", config.sheet_name))?;

    if entries.is_empty() {
        println!("{}", "No entries found".yellow());
        return Ok(());
    }

    println!(
        "{} {} in sheet '{}'",
        entries.len().to_string().bold(),
        if entries.len() == 1 { "entry" } else { "entries" },
        service.sheet_name()
    );
    println!();

    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>4}  {}  {} {}",
            (i + 1).to_string().dimmed(),
            entry.source_path.cyan(),
            "→".dimmed(),
            entry.target
        );
    }

    Ok(())
}

/// Resolves one path and prints the outcome.
async fn resolve_path(config: &Config, path: Option<String>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Input::new()
            .with_prompt("Request path")
            .default("/".to_string())
            .interact_text()?,
    };

    let service = build_redirect_service(config)?;
    let resolution = service.resolve(&path).await;

    let outcome = match resolution.outcome {
        Outcome::Matched => "matched".green(),
        Outcome::NoMatch => "no match, default".yellow(),
        Outcome::Unavailable => "table unavailable, default".red(),
    };

    println!("{} {}", "Path:".bold(), path);
    println!("{} {}", "Outcome:".bold(), outcome);
    println!("{} 302 {}", "Redirect:".bold(), resolution.target);

    Ok(())
}

/// Fetches the sheet once and reports success or the failure.
async fn check_access(config: &Config) -> Result<()> {
    println!("{}", "Checking sheet access...".cyan());
    println!("  Document: {}", config.doc_id);
    println!("  Sheet: {}", config.sheet_name);
    println!("  Credentials: {:?}", config.credentials);

    let service = build_redirect_service(config)?;

    match service.entries().await {
        Ok(entries) => {
            println!("{}", "✓ Sheet is readable".green());
            println!("  Entries: {}", entries.len());
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗ Sheet is not readable".red());
            println!("  Error ({}): {}", e.kind(), e);
            anyhow::bail!("access check failed")
        }
    }
}
