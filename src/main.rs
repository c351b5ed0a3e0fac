//! Sumi-Harvest main entry point
//!
//! This is the command-line interface for the Sumi-Harvest profile extractor
//! and partner page harvester.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use sumi_harvest::config::{load_config, resolve, CrawlConfig, CrawlSettings};
use sumi_harvest::crawler::{crawl, generate_requests};
use sumi_harvest::{parse_profile, parse_results};
use tracing_subscriber::EnvFilter;

/// Sumi-Harvest: extract profile records and harvest partner pages
///
/// Profile and search result pages can be parsed offline into JSON, or a
/// paginated search endpoint can be crawled to download every partner page
/// it lists.
#[derive(Parser, Debug)]
#[command(name = "sumi-harvest")]
#[command(version)]
#[command(about = "Extract profile records and harvest partner pages", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a saved profile page and print it as JSON
    ParseProfile {
        /// Path to the HTML file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a saved search results page and print its rows as JSON
    ParseResults {
        /// Path to the HTML file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Walk a paginated search endpoint and download every partner page
    Crawl {
        /// Search endpoint the page parameter is appended to
        #[arg(long)]
        codebase: Option<String>,

        /// Name of the page number query parameter [default: PageNum]
        #[arg(long)]
        key: Option<String>,

        /// Output directory for downloaded pages [default: target]
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Number of result pages to fetch [default: 1]
        #[arg(long)]
        pages: Option<u32>,

        /// Optional TOML file supplying defaults for the flags above
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Validate the configuration and list the pages without fetching
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::ParseProfile { file } => handle_parse_profile(&file),
        Command::ParseResults { file } => handle_parse_results(&file),
        Command::Crawl {
            codebase,
            key,
            dir,
            pages,
            config,
            dry_run,
        } => {
            let flags = CrawlSettings {
                codebase,
                key,
                dir,
                pages,
                channel_capacity: None,
            };
            let config = load_crawl_config(config.as_deref(), flags)?;

            if dry_run {
                handle_dry_run(&config);
                Ok(())
            } else {
                handle_crawl(config).await
            }
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so that JSON printed on stdout stays machine-readable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_harvest=info,warn"),
            1 => EnvFilter::new("sumi_harvest=debug,info"),
            2 => EnvFilter::new("sumi_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `parse-profile`: prints the extracted profile as indented JSON
fn handle_parse_profile(file: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let profile =
        parse_profile(&raw).with_context(|| format!("parsing profile {}", file.display()))?;

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// Handles `parse-results`: prints the extracted rows as indented JSON
fn handle_parse_results(file: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let results =
        parse_results(&raw).with_context(|| format!("parsing results {}", file.display()))?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Merges the optional config file with the command-line flags
fn load_crawl_config(path: Option<&Path>, flags: CrawlSettings) -> anyhow::Result<CrawlConfig> {
    let file = match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let file = load_config(path)
                .with_context(|| format!("loading configuration {}", path.display()))?;
            Some(file)
        }
        None => None,
    };

    resolve(file, flags).context("invalid configuration")
}

/// Handles `crawl --dry-run`: shows what would be fetched
fn handle_dry_run(config: &CrawlConfig) {
    println!("=== Sumi-Harvest Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Codebase: {}", config.base_url);
    println!("  Page key: {}", config.pagination_key);
    println!("  Pages: {}", config.page_count);
    println!("  Output directory: {}", config.output_dir.display());
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nResult pages:");
    for request in generate_requests(config) {
        println!("  {:>4}  {}", request.sequence_id, request.url);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: CrawlConfig) -> anyhow::Result<()> {
    let report = crawl(config).await.context("crawl failed")?;
    tracing::info!(
        "Harvest finished: {} page(s), {} partner(s)",
        report.pages_fetched,
        report.partners_downloaded
    );
    Ok(())
}
