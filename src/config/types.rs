use crate::state::{Cap, Phase};
use crate::ConfigError;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
///
/// Every key is optional in a config file; missing keys fall back to the
/// compiled-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub extract: ExtractConfig,
}

/// Where the crawl starts and how wide it fans out
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CrawlConfig {
    /// First page fetched
    pub seed_url: String,

    /// Prepended to hrefs that do not start with `http`
    pub origin_prefix: String,

    /// Maximum number of pages fetched concurrently
    pub worker_pool_size: usize,

    /// Per-phase link caps
    pub caps: PhaseCaps,

    /// How long the worker pool may take to drain at shutdown (seconds)
    pub shutdown_grace_secs: u64,
}

impl CrawlConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: "https://pl.wikipedia.org/wiki/Java".to_string(),
            origin_prefix: "https://pl.wikipedia.org".to_string(),
            worker_pool_size: 50,
            caps: PhaseCaps::default(),
            shutdown_grace_secs: 60,
        }
    }
}

/// Which anchors are selected from a page and which of them are kept
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ExtractConfig {
    /// CSS selector applied inside the document body
    pub selector: String,

    /// Substring an href must contain to be kept
    pub keep_substring: String,

    /// Extensions (without the dot) that mark an href as an image
    pub image_extensions: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            selector: "div.mw-body-content a[href]".to_string(),
            keep_substring: "wiki".to_string(),
            image_extensions: ["jpg", "png", "svg", "jpeg", "webp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Link caps for the three phases
///
/// Deserialized from a three-element array (`[50, 10, 0]`) and parsed from
/// the command line as `50,10,0`. `0` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<usize>")]
pub struct PhaseCaps {
    pub first: Cap,
    pub second: Cap,
    pub third: Cap,
}

impl PhaseCaps {
    pub fn for_phase(&self, phase: Phase) -> Cap {
        match phase {
            Phase::First => self.first,
            Phase::Second => self.second,
            Phase::Third => self.third,
        }
    }
}

impl Default for PhaseCaps {
    fn default() -> Self {
        Self {
            first: Cap::Limited(50),
            second: Cap::Limited(10),
            third: Cap::Unbounded,
        }
    }
}

impl TryFrom<Vec<usize>> for PhaseCaps {
    type Error = ConfigError;

    fn try_from(raw: Vec<usize>) -> Result<Self, Self::Error> {
        match raw.as_slice() {
            [first, second, third] => Ok(Self {
                first: Cap::from(*first),
                second: Cap::from(*second),
                third: Cap::from(*third),
            }),
            _ => Err(ConfigError::InvalidCaps(format!("{:?}", raw))),
        }
    }
}

impl FromStr for PhaseCaps {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::InvalidCaps(s.to_string()))?;

        Self::try_from(raw).map_err(|_| ConfigError::InvalidCaps(s.to_string()))
    }
}
