//! CLI administration tool for ghlink.
//!
//! Read-only inspection of the link store without going through HTTP. The
//! database must already exist; this tool never creates or migrates it.
//!
//! # Usage
//!
//! ```bash
//! # List the links owned by a GitHub user id
//! cargo run --bin admin -- links list --owner 583231
//!
//! # Show a single link
//! cargo run --bin admin -- links show aB3dE9xZ
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check the database
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DB_PATH` (required): SQLite database file
//! - `DB_MAX_CONNECTIONS` (optional, default 5)

use ghlink::config::Config;
use ghlink::domain::entities::Link;
use ghlink::domain::repositories::LinkRepository;
use ghlink::infrastructure::persistence::{Database, SqliteLinkRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for inspecting ghlink's link store.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List the links of one owner, newest first
    List {
        /// GitHub user id of the owner
        #[arg(short, long)]
        owner: String,
    },

    /// Show the details of one link
    Show {
        /// Short URL (code) of the link
        short_url: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = Database::open_existing(&config.db_path, config.db_max_connections)
        .await
        .with_context(|| format!("Failed to open database '{}'", config.db_path))?;

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config.db_path).await?,
    }

    Ok(())
}

/// Dispatches link inspection commands.
async fn handle_links_action(action: LinksAction, pool: &SqlitePool) -> Result<()> {
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinksAction::List { owner } => list_links(&repo, &owner).await?,
        LinksAction::Show { short_url } => show_link(&repo, &short_url).await?,
    }

    Ok(())
}

/// Lists an owner's links.
///
/// # Output Format
///
/// ```text
/// Links of 583231
///
///   Short URL        Created            Original URL
///   ─────────────────────────────────────────────────────────────────
///   aB3dE9xZ         2024-01-15 10:30   https://example.com/very/long
/// ```
async fn list_links(repo: &SqliteLinkRepository, owner: &str) -> Result<()> {
    println!("{} {}", "Links of".bright_blue().bold(), owner.cyan());
    println!();

    let links = repo
        .list_by_owner(owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<16} {:<18} {}",
        "Short URL".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<16} {:<18} {}",
            link.short_url.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints every stored field of one link.
async fn show_link(repo: &SqliteLinkRepository, short_url: &str) -> Result<()> {
    let link = repo
        .find_by_short_url(short_url)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No link with short URL '{short_url}'"))?;

    print_link(&link);
    Ok(())
}

fn print_link(link: &Link) {
    println!("{}", "Link".bright_blue().bold());
    println!();
    println!("  ID:        {}", link.id.bright_black());
    println!("  Short URL: {}", link.short_url.cyan());
    println!("  Original:  {}", link.original_url);
    println!(
        "  Owner:     {}",
        match &link.user_id {
            Some(owner) => owner.normal(),
            None => "anonymous".yellow(),
        }
    );
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
}

/// Displays the total number of links.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));
    let links_count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool, path: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("  SQLite: {}", version.bright_white());
            println!("  File:   {}", path.bright_white());
            println!();
        }
    }

    Ok(())
}
