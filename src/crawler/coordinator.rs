//! Crawler coordinator - three-phase crawl orchestration
//!
//! This module runs the crawl as a fixed sequence of phases:
//! 1. Extract the seed page (capped, synchronous; failure aborts the crawl)
//! 2. Fan out over the seed's links through the worker pool
//! 3. Fan out over every second-phase link through the same pool
//! 4. Report, then release the pool
//!
//! Each phase is a barrier: the next one is scheduled only after every unit of
//! the current one has finished. Workers return their results; the coordinator
//! is the only writer of the accumulator and appends them in source order.

use crate::config::Config;
use crate::crawler::extractor::PhaseExtractor;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::parser::PageQuery;
use crate::crawler::pool::WorkerPool;
use crate::output::{log_statistics, CrawlStatistics, PhaseStatistics, Reporter};
use crate::state::{CrawlAccumulator, Link, Phase, PhaseResult};
use crate::url::LinkFilter;
use crate::{CrawlError, Result};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Title of the seed page
    pub title: Option<String>,

    /// All phase results in report order
    pub accumulator: CrawlAccumulator,

    /// Per-phase counters
    pub statistics: CrawlStatistics,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    extractor: Arc<PhaseExtractor>,
    pool: WorkerPool<Option<PhaseResult>>,
}

impl Coordinator {
    /// Creates a coordinator that fetches pages over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - A validated crawl configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - The selector or pool width is invalid, or the
    ///   HTTP client failed to build
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new()?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a coordinator around any page fetcher
    ///
    /// Fails with `CrawlError::Config` when the selector does not parse or the
    /// worker pool width is zero.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let query = PageQuery::new(&config.extract.selector)?;
        let filter = LinkFilter::from_config(&config.extract);
        let extractor = PhaseExtractor::new(
            fetcher,
            query,
            filter,
            config.crawl.origin_prefix.clone(),
        );
        let pool = WorkerPool::new(config.crawl.worker_pool_size)?;

        Ok(Self {
            config: Arc::new(config),
            extractor: Arc::new(extractor),
            pool,
        })
    }

    /// Runs the crawl, writing progress and the final listing to `reporter`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - All three phases ran; individual page failures
    ///   were logged and dropped
    /// * `Err(CrawlError::SeedFetch)` - The seed page failed; nothing was
    ///   written to `reporter` and no further work was scheduled
    /// * `Err(CrawlError::Io)` - Writing the report failed
    pub async fn run<W: Write>(&mut self, reporter: &mut Reporter<W>) -> Result<CrawlOutcome> {
        let start_time = Instant::now();
        let mut accumulator = CrawlAccumulator::new();
        let mut statistics = CrawlStatistics::default();

        // Phase 1: the seed
        let seed_url = self.config.crawl.seed_url.clone();
        let cap = self.config.crawl.caps.for_phase(Phase::First);
        tracing::info!("Starting {} on seed {} (cap {})", Phase::First, seed_url, cap);

        let seed = self
            .extractor
            .extract(&seed_url, cap)
            .await
            .map_err(|source| CrawlError::SeedFetch {
                url: seed_url.clone(),
                source,
            })?;

        reporter.page_title(seed.title.as_deref())?;

        let seed_result = PhaseResult::new(Phase::First, seed_url, seed.links);
        statistics.record(
            Phase::First,
            PhaseStatistics {
                submitted: 1,
                fetched: 1,
                failed: 0,
                links: seed_result.len(),
            },
        );
        reporter.phase_completed(Phase::First, seed_result.len())?;
        let mut sources = seed_result.links.clone();
        accumulator.push(seed_result);

        // Phases 2 and 3: fan out over the previous phase's links
        for phase in [Phase::Second, Phase::Third] {
            let (results, stats) = self.fan_out(phase, sources).await;
            statistics.record(phase, stats);
            reporter.phase_completed(phase, stats.links)?;

            sources = results
                .iter()
                .flat_map(|r| r.links.iter().cloned())
                .collect();
            accumulator.extend(results);
        }
        statistics.elapsed = start_time.elapsed();

        // Done
        reporter.scraped_links(&accumulator)?;
        log_statistics(&statistics);
        self.shutdown().await;

        Ok(CrawlOutcome {
            title: seed.title,
            accumulator,
            statistics,
        })
    }

    /// Runs one work unit per source link and waits for all of them
    ///
    /// Results come back in source order; failed units are left out.
    async fn fan_out(
        &mut self,
        phase: Phase,
        sources: Vec<Link>,
    ) -> (Vec<PhaseResult>, PhaseStatistics) {
        let cap = self.config.crawl.caps.for_phase(phase);
        let submitted = sources.len();
        tracing::info!(
            "Starting {} with {} work units (cap {})",
            phase,
            submitted,
            cap
        );

        let extractor = Arc::clone(&self.extractor);
        let slots = self
            .pool
            .scatter(sources, move |link| {
                let extractor = Arc::clone(&extractor);
                async move { extractor.extract_link(phase, &link, cap).await }
            })
            .await;

        let results: Vec<PhaseResult> = slots.into_iter().flatten().flatten().collect();

        let stats = PhaseStatistics {
            submitted,
            fetched: results.len(),
            failed: submitted - results.len(),
            links: results.iter().map(PhaseResult::len).sum(),
        };
        tracing::info!(
            "Finished {}: {} of {} pages fetched, {} links kept",
            phase,
            stats.fetched,
            stats.submitted,
            stats.links
        );

        (results, stats)
    }

    /// Releases the worker pool, waiting up to the configured grace period
    pub async fn shutdown(&mut self) {
        let grace = self.config.crawl.shutdown_grace();
        let aborted = self.pool.shutdown(grace).await;
        if aborted > 0 {
            tracing::warn!("Discarded {} unfinished work units", aborted);
        }
    }

    /// Cancels all outstanding work immediately
    pub fn abort(&mut self) {
        tracing::warn!(
            "Aborting crawl with {} outstanding work units",
            self.pool.outstanding()
        );
        self.pool.abort();
    }
}
