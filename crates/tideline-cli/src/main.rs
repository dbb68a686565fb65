//! Tideline timeline driver.
//!
//! Pages through an in-memory feed (synthetic records or a JSON file) with a
//! cursor-paged timeline, for exercising paging behavior by hand.
//!
//! Usage:
//!   # 50 synthetic records, commands from stdin
//!   cargo run -p tideline-cli
//!
//!   # Scripted: each argument is one command
//!   cargo run -p tideline-cli -- --page-size 3 reset next next prev state
//!
//!   # Records from disk, keyed by "hash", page size from a RON file
//!   cargo run -p tideline-cli -- --feed txs.json --key hash --config pager.ron

mod feed;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

use tideline_pager::PagerConfig;

use crate::feed::MemoryFeed;
use crate::session::{Command, Reply, Session};

/// Drive a cursor-paged timeline over a record feed.
#[derive(Parser, Debug)]
#[command(name = "tideline")]
#[command(about = "Page through a keyed record feed with a cursor-paged timeline")]
struct Args {
    /// RON pager config, e.g. `(page_size: 25)`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured page size
    #[arg(long)]
    page_size: Option<usize>,

    /// JSON array of records, newest first
    #[arg(long)]
    feed: Option<PathBuf>,

    /// Number of synthetic records when no feed file is given
    #[arg(long, default_value_t = 50)]
    items: u64,

    /// Record field holding the cursor key
    #[arg(long, default_value = "id")]
    key: String,

    /// Commands to run instead of reading stdin (one per argument)
    commands: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs to stderr; stdout carries the rendered window
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PagerConfig::load(path)
            .with_context(|| format!("loading pager config {}", path.display()))?,
        None => PagerConfig::default(),
    };
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }

    let feed = match &args.feed {
        Some(path) => MemoryFeed::load(path, &args.key)
            .with_context(|| format!("loading feed {}", path.display()))?,
        None => MemoryFeed::synthetic(args.items, &args.key),
    };
    tracing::info!(
        records = feed.len().await,
        page_size = config.page_size,
        key = %args.key,
        "Starting timeline"
    );

    let mut session = Session::new(feed, config).context("building timeline")?;
    println!("{}", run(&mut session, Command::Reset).await);

    if !args.commands.is_empty() {
        for line in &args.commands {
            if !step(&mut session, line).await {
                break;
            }
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if !step(&mut session, &line).await {
            break;
        }
    }

    tracing::debug!(index = session.pager().index(), "Session ended");
    Ok(())
}

/// Parse and run one command line. Returns false on quit.
async fn step(session: &mut Session, line: &str) -> bool {
    match line.parse::<Command>() {
        Ok(Command::Quit) => false,
        Ok(command) => {
            println!("{}", run(session, command).await);
            true
        }
        Err(e) => {
            eprintln!("{e} (try `help`)");
            true
        }
    }
}

async fn run(session: &mut Session, command: Command) -> String {
    match session.execute(command).await {
        Ok(Reply::Text(text)) => text,
        Ok(Reply::Quit) => String::new(),
        Err(e) => {
            tracing::error!("Timeline fetch failed: {}", e);
            format!("fetch failed, window kept: {e}")
        }
    }
}
