use crate::config::types::{Config, CrawlConfig, ExtractConfig};
use crate::crawler::PageQuery;
use crate::ConfigError;
use url::Url;

/// Upper bound on the worker pool width
const MAX_WORKER_POOL_SIZE: usize = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_extract_config(&config.extract)?;
    Ok(())
}

/// Validates seed, origin and pool settings
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.worker_pool_size < 1 || config.worker_pool_size > MAX_WORKER_POOL_SIZE {
        return Err(ConfigError::Validation(format!(
            "worker_pool_size must be between 1 and {}, got {}",
            MAX_WORKER_POOL_SIZE, config.worker_pool_size
        )));
    }

    let seed = Url::parse(&config.seed_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed_url, e))
    })?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use http or https",
            config.seed_url
        )));
    }

    // The prefix is concatenated, not parsed, so only emptiness is checked
    if config.origin_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "origin_prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates selector and filter settings
fn validate_extract_config(config: &ExtractConfig) -> Result<(), ConfigError> {
    PageQuery::new(&config.selector)?;

    if let Some(ext) = config
        .image_extensions
        .iter()
        .find(|ext| ext.trim().is_empty())
    {
        return Err(ConfigError::Validation(format!(
            "image_extensions cannot contain blank entries, got '{}'",
            ext
        )));
    }

    Ok(())
}
