//! hop-crawler: a three-hop link crawler
//!
//! This crate fetches a seed page, then fans out over the links it finds for
//! two more hops using a bounded worker pool, and reports every kept link in a
//! deterministic order.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed page {url} could not be fetched: {source}")]
    SeedFetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Invalid phase caps '{0}': expected three comma-separated counts, 0 meaning unbounded")]
    InvalidCaps(String),
}

/// A single page could not be turned into a parsed document
///
/// Downstream code does not distinguish between the variants; they exist so
/// the logged cause is readable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not a text document (content type {content_type})")]
    ContentType { url: String, content_type: String },

    #[error("failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("failed to parse {url}: {message}")]
    Parse { url: String, message: String },
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlOutcome, HttpFetcher, PageFetcher};
pub use output::Reporter;
pub use state::{CrawlAccumulator, Link, Phase, PhaseResult};
pub use crate::url::{normalize_href, LinkFilter};
