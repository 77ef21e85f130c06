//! Output module for crawl reports and statistics
//!
//! This module handles:
//! - The stdout report (progress lines, indexed link list, total)
//! - Per-phase statistics logged at the end of a crawl

mod report;
pub mod stats;

pub use report::Reporter;
pub use stats::{log_statistics, CrawlStatistics, PhaseStatistics};
