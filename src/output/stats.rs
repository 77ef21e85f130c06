//! Per-phase crawl statistics
//!
//! Collected by the coordinator while phases run and logged when the crawl
//! finishes. Nothing here is printed to stdout.

use crate::state::Phase;
use std::time::Duration;

/// Counters for one phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseStatistics {
    /// Work units scheduled
    pub submitted: usize,

    /// Units whose page was fetched and parsed
    pub fetched: usize,

    /// Units dropped because the fetch failed
    pub failed: usize,

    /// Links kept across all of the phase's results
    pub links: usize,
}

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    pub first: PhaseStatistics,
    pub second: PhaseStatistics,
    pub third: PhaseStatistics,

    /// Wall time from the seed fetch to the end of the third phase
    pub elapsed: Duration,
}

impl CrawlStatistics {
    pub fn phase(&self, phase: Phase) -> &PhaseStatistics {
        match phase {
            Phase::First => &self.first,
            Phase::Second => &self.second,
            Phase::Third => &self.third,
        }
    }

    pub fn record(&mut self, phase: Phase, stats: PhaseStatistics) {
        match phase {
            Phase::First => self.first = stats,
            Phase::Second => self.second = stats,
            Phase::Third => self.third = stats,
        }
    }

    pub fn total_links(&self) -> usize {
        Phase::ALL.iter().map(|p| self.phase(*p).links).sum()
    }

    pub fn total_fetches(&self) -> usize {
        Phase::ALL.iter().map(|p| self.phase(*p).submitted).sum()
    }

    pub fn total_failures(&self) -> usize {
        Phase::ALL.iter().map(|p| self.phase(*p).failed).sum()
    }
}

/// Logs statistics through `tracing`
pub fn log_statistics(stats: &CrawlStatistics) {
    for phase in Phase::ALL {
        let s = stats.phase(phase);
        tracing::info!(
            "{}: {} fetched, {} failed of {} submitted; {} links kept",
            phase,
            s.fetched,
            s.failed,
            s.submitted,
            s.links
        );
    }

    let rate = if stats.elapsed.as_secs_f64() > 0.0 {
        stats.total_fetches() as f64 / stats.elapsed.as_secs_f64()
    } else {
        0.0
    };

    tracing::info!(
        "Crawl finished in {:.2?}: {} pages requested ({:.2} pages/sec), {} failures, {} links",
        stats.elapsed,
        stats.total_fetches(),
        rate,
        stats.total_failures(),
        stats.total_links()
    );
}
