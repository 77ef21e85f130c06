//! hop-crawler main entry point
//!
//! This is the command-line interface for the three-hop link crawler.

use anyhow::Context;
use clap::Parser;
use hop_crawler::config::{self, Config, PhaseCaps};
use hop_crawler::{Coordinator, CrawlError, CrawlOutcome, Reporter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code when the seed page cannot be fetched
const EXIT_SEED_FAILED: u8 = 1;

/// Exit code for configuration and startup errors
const EXIT_ERROR: u8 = 2;

/// Exit code after Ctrl-C
const EXIT_INTERRUPTED: u8 = 130;

/// hop-crawler: collect links three hops out from a seed page
///
/// Fetches the seed page, then every page it links to, then every page those
/// link to, and prints all kept links in a stable order.
#[derive(Parser, Debug)]
#[command(name = "hop-crawler")]
#[command(version)]
#[command(about = "Collect links three hops out from a seed page", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed URL to start from
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Prefix for hrefs that do not start with "http"
    #[arg(long, value_name = "PREFIX")]
    origin: Option<String>,

    /// Maximum number of pages fetched at once
    #[arg(long, value_name = "N")]
    pool: Option<usize>,

    /// Per-phase link caps, 0 meaning unbounded (e.g. 50,10,0)
    #[arg(long, value_name = "P1,P2,P3")]
    caps: Option<PhaseCaps>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(seed) = &self.seed {
            config.crawl.seed_url = seed.clone();
        }
        if let Some(origin) = &self.origin {
            config.crawl.origin_prefix = origin.clone();
        }
        if let Some(pool) = self.pool {
            config.crawl.worker_pool_size = pool;
        }
        if let Some(caps) = self.caps {
            config.crawl.caps = caps;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the crawl report. `RUST_LOG`
/// takes precedence when set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            // Only show errors
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("hop_crawler=info,warn"),
                1 => EnvFilter::new("hop_crawler=debug,info"),
                2 => EnvFilter::new("hop_crawler=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads configuration, runs the crawl and maps the result to an exit code
async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            config::parse_config_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    config::validate(&config).context("invalid configuration")?;

    tracing::info!(
        "Seed: {}, origin: {}, pool width: {}, caps: {}/{}/{}",
        config.crawl.seed_url,
        config.crawl.origin_prefix,
        config.crawl.worker_pool_size,
        config.crawl.caps.first,
        config.crawl.caps.second,
        config.crawl.caps.third
    );

    let mut coordinator =
        Coordinator::new(config).context("failed to initialise the crawler")?;
    let mut reporter = Reporter::stdout();

    let result = tokio::select! {
        result = coordinator.run(&mut reporter) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    if result.is_none() {
        tracing::warn!("Interrupted");
        coordinator.abort();
    }

    exit_code(result).map(ExitCode::from)
}

/// Maps the end of a crawl to a process exit code
///
/// `None` means the crawl was interrupted. Errors other than a failed seed
/// fetch are returned so `main` reports them with `EXIT_ERROR`.
fn exit_code(result: Option<Result<CrawlOutcome, CrawlError>>) -> anyhow::Result<u8> {
    match result {
        Some(Ok(_)) => Ok(0),
        Some(Err(e @ CrawlError::SeedFetch { .. })) => {
            tracing::error!("{}", e);
            Ok(EXIT_SEED_FAILED)
        }
        Some(Err(e)) => Err(e).context("crawl failed"),
        None => Ok(EXIT_INTERRUPTED),
    }
}
