//! Phase extraction: fetch one page, filter its anchors, apply the phase cap

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::PageQuery;
use crate::state::{Cap, Link, Phase, PhaseResult};
use crate::url::{normalize_href, LinkFilter};
use crate::FetchError;
use std::sync::Arc;

/// The outcome of a successful extraction
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub title: Option<String>,
    pub links: Vec<Link>,
}

/// Composes the fetcher, the link filter and a per-phase cap
///
/// Extraction has no shared mutable state, so one extractor is shared by every
/// work unit behind an `Arc`.
pub struct PhaseExtractor {
    fetcher: Arc<dyn PageFetcher>,
    query: PageQuery,
    filter: LinkFilter,
    origin_prefix: String,
}

impl PhaseExtractor {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        query: PageQuery,
        filter: LinkFilter,
        origin_prefix: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            query,
            filter,
            origin_prefix: origin_prefix.into(),
        }
    }

    /// Fetches `url` and keeps the first `cap` anchors that pass the filter
    ///
    /// # Returns
    ///
    /// * `Ok(ExtractedPage)` - The page title and kept links in document order
    /// * `Err(FetchError)` - The page could not be fetched or parsed
    pub async fn extract(&self, url: &str, cap: Cap) -> Result<ExtractedPage, FetchError> {
        let page = self.fetcher.fetch_and_select(url, &self.query).await?;

        let links = page
            .anchors
            .into_iter()
            .filter(|link| self.filter.keeps(link))
            .take(cap.limit())
            .collect();

        Ok(ExtractedPage {
            title: page.title,
            links,
        })
    }

    /// Runs one fan-out work unit for a link found in the previous phase
    ///
    /// The href is normalized against the origin prefix before fetching. A
    /// failed fetch is logged and yields `None`; it never produces an empty
    /// result.
    pub async fn extract_link(&self, phase: Phase, source: &Link, cap: Cap) -> Option<PhaseResult> {
        let url = normalize_href(&self.origin_prefix, &source.href);

        match self.extract(&url, cap).await {
            Ok(page) => Some(PhaseResult::new(phase, url, page.links)),
            Err(e) => {
                tracing::warn!("Error in {} for URL {}: {}", phase, source.href, e);
                None
            }
        }
    }
}
