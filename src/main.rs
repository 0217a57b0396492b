//! LinkRank main entry point
//!
//! This is the command-line interface for the LinkRank crawl-and-score
//! pipeline.

use clap::Parser;
use linkrank::config::load_config_with_hash;
use linkrank::crawler::{run_crawl, CrawlOutcome};
use linkrank::rank::run_ranking;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// LinkRank: a domain-scoped crawler and PageRank scorer
///
/// LinkRank crawls pages within a single target domain while respecting
/// robots.txt, writes structured page records as JSON batches, and computes
/// a normalized PageRank score map over the crawled link graph.
#[derive(Parser, Debug)]
#[command(name = "linkrank")]
#[command(version = "0.3.0")]
#[command(about = "Domain-scoped crawler and PageRank scorer", long_about = None)]
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

    /// Crawl only, without running the ranking pipeline afterwards
    #[arg(long, conflicts_with = "rank_only")]
    crawl_only: bool,

    /// Rank existing record batches without crawling
    #[arg(long, conflicts_with = "crawl_only")]
    rank_only: bool,

    /// Extra record directories to merge when ranking (repeatable)
    #[arg(long = "records-dir", value_name = "DIR")]
    extra_record_dirs: Vec<PathBuf>,

    /// Validate config and show what would run without crawling
    #[arg(long, conflicts_with_all = ["crawl_only", "rank_only"])]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if !cli.rank_only {
        handle_crawl(&config).await?;
    }

    if !cli.crawl_only {
        handle_rank(&config, &cli.extra_record_dirs)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkrank=info,warn"),
            1 => EnvFilter::new("linkrank=debug,info"),
            2 => EnvFilter::new("linkrank=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &linkrank::config::Config) {
    println!("=== LinkRank Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Start URL: {}", config.crawler.start_url);
    println!("  Page budget: {}", config.crawler.page_budget);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!(
        "  Request timeout: {}ms",
        config.crawler.request_timeout_ms
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nPageRank:");
    println!("  Damping: {}", config.pagerank.damping);
    println!("  Tolerance: {}", config.pagerank.tolerance);
    println!("  Max iterations: {}", config.pagerank.max_iterations);
    println!("  Scaling factor: {}", config.pagerank.scaling_factor);

    println!("\nOutput:");
    println!("  Records directory: {}", config.output.records_dir);
    println!("  Scores file: {}", config.output.scores_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the crawl phase
async fn handle_crawl(config: &linkrank::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl of {} (budget {} pages)",
        config.crawler.start_url,
        config.crawler.page_budget
    );

    match run_crawl(config.clone()).await {
        Ok(summary) => {
            let reason = match summary.outcome {
                CrawlOutcome::Exhausted => "frontier exhausted",
                CrawlOutcome::BudgetReached => "page budget reached",
                CrawlOutcome::Stopped => "stop requested",
            };
            tracing::info!(
                "Crawl finished ({}): {} pages in {} batch file(s)",
                reason,
                summary.pages,
                summary.batch_files.len()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the ranking phase
fn handle_rank(
    config: &linkrank::config::Config,
    extra_dirs: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dirs = vec![PathBuf::from(&config.output.records_dir)];
    dirs.extend(extra_dirs.iter().cloned());

    match run_ranking(
        &dirs,
        &config.pagerank,
        Path::new(&config.output.scores_path),
    ) {
        Ok(report) => {
            tracing::info!(
                "Ranked {} pages over {} links in {} iteration(s)",
                report.pages,
                report.links,
                report.iterations
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Ranking failed: {}", e);
            Err(e.into())
        }
    }
}
