//! # Authority Tree CLI
//!
//! Prints the authority hierarchy of a database target as a tree, followed by
//! an optional pairwise diff.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `{TARGET}_DB_USER`, `{TARGET}_DB_HOST`, `{TARGET}_DB_NAME` - connection (required)
//! - `{TARGET}_DB_PASSWORD` - password (default: empty)
//! - `{TARGET}_DB_PORT` - port (default: 5432)
//! - `RUST_LOG` - log filter (default: warn)
//!
//! A `.env` file in the working directory (or a parent) is loaded first;
//! variables already set in the process environment win.
//!
//! Alternatively `--config` points at a TOML file with `[targets.<name>]`
//! tables. `--input` reads rows from a JSON file instead of a database.

use anyhow::{Context, Result};
use clap::Parser;
use cretoai_authority_tree::source::{AuthoritySource, JsonRowsSource};
use cretoai_authority_tree::{report, DiffOrder, Glyphs, ReportOptions, DEFAULT_ROOT_ROLE};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Authority hierarchy viewer
#[derive(Parser)]
#[command(name = "authority-tree")]
#[command(about = "Print the permission hierarchy of authorities as a tree")]
#[command(version)]
struct Cli {
    /// Database target to read from
    #[arg(short, long, default_value = "local", env = "AUTHORITY_TREE_TARGET")]
    target: String,

    /// TOML file with `[targets.<name>]` tables (overrides environment lookup)
    #[arg(short, long, env = "AUTHORITY_TREE_CONFIG")]
    config: Option<PathBuf>,

    /// Read rows from a JSON file instead of a database (takes precedence over targets)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Authority the tree is drawn from
    #[arg(short, long, default_value = DEFAULT_ROOT_ROLE)]
    root: String,

    /// Append the pairwise diff after the tree
    #[arg(long, alias = "showDiff")]
    show_diff: bool,

    /// Order used by the diff report (declaration, cardinality)
    #[arg(long, default_value_t = DiffOrder::Declaration)]
    diff_order: DiffOrder,

    /// Draw the tree with ASCII characters only
    #[arg(long)]
    ascii: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loaded before parsing so clap `env` defaults see `.env` values too
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    // Logs go to stderr, the report to stdout
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},cretoai_authority_tree={}", log_level, log_level).into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!("Starting authority-tree v{}", cretoai_authority_tree::VERSION);
    match &dotenv {
        Ok(path) => debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    let source = open_source(&cli).await?;
    let roles = source.fetch().await.context("Failed to load authorities");
    source.close().await;
    let roles = roles?;
    debug!(authorities = roles.len(), "Loaded role set");

    let glyphs = if cli.ascii { Glyphs::ascii() } else { Glyphs::default() };
    let options = ReportOptions::default()
        .with_root(cli.root)
        .with_diff(cli.show_diff)
        .with_diff_order(cli.diff_order)
        .with_glyphs(glyphs);

    let lines = report(&roles, &options)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}

/// Pick the authority source from the command line
async fn open_source(cli: &Cli) -> Result<Box<dyn AuthoritySource>> {
    if let Some(path) = &cli.input {
        info!("Reading authorities from {:?}", path);
        return Ok(Box::new(JsonRowsSource::new(path)));
    }

    open_database(cli).await
}

#[cfg(feature = "postgres")]
async fn open_database(cli: &Cli) -> Result<Box<dyn AuthoritySource>> {
    use cretoai_authority_tree::config::{DatabaseTarget, TargetsConfig};
    use cretoai_authority_tree::source::PostgresSource;

    let target = match &cli.config {
        Some(path) => {
            let config = TargetsConfig::load(path)
                .with_context(|| format!("Failed to load configuration from {:?}", path))?;
            config.target(&cli.target)?.clone()
        }
        None => DatabaseTarget::from_env(&cli.target)?,
    };
    info!(db_target = %cli.target, url = %target.display_url(), "Using database target");

    let source = PostgresSource::connect(&target).await?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "postgres"))]
async fn open_database(_cli: &Cli) -> Result<Box<dyn AuthoritySource>> {
    anyhow::bail!("Built without the `postgres` feature; use --input to read rows from a file")
}
