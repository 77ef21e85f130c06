//! HTTP fetcher implementation
//!
//! This module handles all page fetches for the crawler:
//! - The `PageFetcher` trait the rest of the crawler depends on
//! - Building the shared HTTP client
//! - GET requests with the client's default redirect policy and timeouts
//! - Rejecting responses that are not text or markup
//! - Mapping transport and status failures to `FetchError`

use crate::crawler::parser::{FetchedPage, PageQuery};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Source of parsed pages
///
/// Implementations fetch `url`, parse it as HTML and return the title plus
/// the anchors selected by `query`. Every failure is reported as a
/// `FetchError`; callers do not retry.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_and_select(&self, url: &str, query: &PageQuery)
        -> Result<FetchedPage, FetchError>;
}

/// Builds the HTTP client shared by every work unit
///
/// Redirects follow reqwest's default policy and no request timeout is set
/// beyond the transport defaults.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a real HTTP client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_and_select(
        &self,
        url: &str,
        query: &PageQuery,
    ) -> Result<FetchedPage, FetchError> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing header is treated as HTML
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap_or_default().to_string());

        if let Some(content_type) = content_type {
            if !is_parseable_content_type(&content_type) {
                return Err(FetchError::ContentType {
                    url: url.to_string(),
                    content_type,
                });
            }
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        let page = query.select(url, &body)?;
        tracing::trace!("{} yielded {} anchors", url, page.anchors.len());
        Ok(page)
    }
}

/// Whether a `Content-Type` value names a document the HTML parser accepts
///
/// Any `text/*` type passes, as do XML and XHTML. Binary types such as PDFs
/// and images do not.
fn is_parseable_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.split_once('/') {
        Some(("text", _)) => true,
        Some(("application", subtype)) => subtype == "xml" || subtype.ends_with("+xml"),
        _ => false,
    }
}
