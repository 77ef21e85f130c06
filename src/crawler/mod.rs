//! Crawler module for page fetching and phase orchestration
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - HTML parsing and anchor selection
//! - Per-phase extraction (filter + cap)
//! - The bounded worker pool
//! - Overall three-phase coordination

mod coordinator;
mod extractor;
mod fetcher;
mod parser;
mod pool;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use extractor::{ExtractedPage, PhaseExtractor};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use parser::{FetchedPage, PageQuery};
pub use pool::WorkerPool;
