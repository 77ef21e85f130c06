//! Append-only record of every phase result produced by a crawl

use crate::state::{Link, Phase, PhaseResult};

/// Ordered, append-only sequence of phase results
///
/// The coordinator is the only writer. Results are appended phase by phase, and
/// within a phase in the order of the links they were sourced from.
#[derive(Debug, Clone, Default)]
pub struct CrawlAccumulator {
    results: Vec<PhaseResult>,
}

impl CrawlAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `result` belongs to an earlier phase than the
    /// last appended result.
    pub fn push(&mut self, result: PhaseResult) {
        debug_assert!(
            self.results
                .last()
                .map_or(true, |last| last.phase <= result.phase),
            "phase results must be appended in phase order"
        );
        self.results.push(result);
    }

    /// Appends every result from one phase, keeping their order
    pub fn extend(&mut self, results: impl IntoIterator<Item = PhaseResult>) {
        for result in results {
            self.push(result);
        }
    }

    pub fn results(&self) -> &[PhaseResult] {
        &self.results
    }

    /// Results produced in `phase`, in append order
    pub fn phase_results(&self, phase: Phase) -> impl Iterator<Item = &PhaseResult> {
        self.results.iter().filter(move |r| r.phase == phase)
    }

    /// Every link in the accumulator, flattened in append order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.results.iter().flat_map(|r| r.links.iter())
    }

    /// Sum of all phase result sizes
    pub fn total_links(&self) -> usize {
        self.results.iter().map(PhaseResult::len).sum()
    }

    /// Number of phase results (not links)
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
