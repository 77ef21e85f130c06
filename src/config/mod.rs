//! Configuration module
//!
//! Configuration comes from three layers, later ones winning: compiled-in
//! defaults, an optional TOML file, and command-line overrides. Validation runs
//! once, after all layers are applied.
//!
//! # Example
//!
//! ```no_run
//! use hop_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Seed: {}", config.crawl.seed_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, ExtractConfig, PhaseCaps};

// Re-export parser functions
pub use parser::{load_config, parse_config_file, parse_config_str};
pub use validation::validate;
