//! Haze-Search main entry point
//!
//! This is the command-line interface for crawling into and searching the
//! Haze-Search index.

use anyhow::{bail, Context};
use clap::Parser;
use haze_search::config::{load_config_with_hash, Config};
use haze_search::crawler::{CrawlEngine, Progress};
use haze_search::storage::{index_sink, open_index, IndexStore, SqliteIndex};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Largest result page a search may ask for
const MAX_SEARCH_LIMIT: usize = 50;

/// Haze-Search: a polite crawler feeding a full-text index
///
/// Crawls a bounded neighbourhood of seed URLs into a SQLite full-text index
/// and answers ranked keyword queries against it.
#[derive(Parser, Debug)]
#[command(name = "haze-search")]
#[command(version)]
#[command(about = "A polite crawler feeding a full-text index", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["stats", "search"])]
    dry_run: bool,

    /// Show the number of indexed documents and exit
    #[arg(long, conflicts_with_all = ["dry_run", "search"])]
    stats: bool,

    /// Query the index instead of crawling
    #[arg(long, value_name = "QUERY", conflicts_with_all = ["dry_run", "stats"])]
    search: Option<String>,

    /// Maximum number of search results (1-50)
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if let Some(query) = &cli.search {
        handle_search(&config, query, cli.limit)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("haze_search=info,warn"),
            1 => EnvFilter::new("haze_search=debug,info"),
            2 => EnvFilter::new("haze_search=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_configured_index(config: &Config) -> anyhow::Result<SqliteIndex> {
    let path = Path::new(&config.output.database_path);
    open_index(path).with_context(|| format!("failed to open index at {}", path.display()))
}

/// Handles the --dry-run mode: shows the effective crawl plan
fn handle_dry_run(config: &Config) {
    let options = config.crawl_options();

    println!("=== Haze-Search Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages: {}", options.max_pages);
    println!("  Max depth: {}", options.max_depth);
    println!("  Rate limit: {}ms", options.rate_limit_ms);
    println!("  Concurrency: {}", options.concurrency);
    println!("  User agent: {}", options.user_agent);

    println!("\nAllowed Hosts ({}):", options.allow_hosts.len());
    if options.allow_hosts.is_empty() {
        println!("  (any host)");
    }
    for host in &options.allow_hosts {
        println!("  - {}", host);
    }

    println!("\nSeeds ({}):", options.seed_urls.len());
    for seed in &options.seed_urls {
        println!("  * {}", seed);
    }

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows what the index holds
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let index = open_configured_index(config)?;
    let count = index.count_documents()?;

    println!("Database: {}", config.output.database_path);
    println!("Indexed documents: {}", count);

    Ok(())
}

/// Handles the --search mode: prints ranked results as JSON
fn handle_search(config: &Config, query: &str, limit: usize) -> anyhow::Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("search query must not be empty");
    }
    let limit = limit.clamp(1, MAX_SEARCH_LIMIT);

    let index = open_configured_index(config)?;
    let results = index
        .search(query, limit)
        .with_context(|| format!("search for '{}' failed", query))?;

    let output = serde_json::json!({
        "query": query,
        "results": results,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let index = open_configured_index(config)?;
    let options = config.crawl_options();

    tracing::info!(
        "Seeds: {}, allowed hosts: {}",
        options.seed_urls.len(),
        options.allow_hosts.len()
    );

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current batch");
            on_signal.cancel();
        }
    });

    let mut engine = CrawlEngine::new(options)?.with_cancellation(cancel);
    let progress = engine
        .run(index_sink(&index), |progress: Progress| {
            tracing::debug!(
                "Progress: {} queued, {} fetched, {} indexed, {} errors",
                progress.queued,
                progress.fetched,
                progress.indexed,
                progress.errors
            );
        })
        .await
        .context("crawl failed")?;

    println!("{}", serde_json::to_string(&progress)?);

    Ok(())
}
