//! HTML parser for extracting the title and selected anchors
//!
//! Anchors are selected only inside `<body>`, in document order. Hrefs are
//! kept exactly as written; resolving them is the normalizer's job.

use crate::state::Link;
use crate::{ConfigError, FetchError};
use scraper::{ElementRef, Html, Selector};

/// A fetched page reduced to what the crawler needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// The page title (from the `<title>` tag)
    pub title: Option<String>,

    /// Anchors matching the configured selector, in document order
    pub anchors: Vec<Link>,
}

/// Pre-parsed selectors used to query every fetched document
#[derive(Debug, Clone)]
pub struct PageQuery {
    body: Selector,
    title: Selector,
    anchors: Selector,
}

impl PageQuery {
    /// Builds a query for the given anchor selector
    ///
    /// # Returns
    ///
    /// * `Ok(PageQuery)` - The selector parsed
    /// * `Err(ConfigError::InvalidSelector)` - The selector is not valid CSS
    pub fn new(anchor_selector: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            body: parse_selector("body")?,
            title: parse_selector("title")?,
            anchors: parse_selector(anchor_selector)?,
        })
    }

    /// Parses `html` and extracts the title and body anchors
    ///
    /// # Arguments
    ///
    /// * `url` - The URL the document came from, used in error messages
    /// * `html` - The document text
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - The title and matching anchors
    /// * `Err(FetchError::Parse)` - The document has no body to select from
    ///
    /// # Example
    ///
    /// ```
    /// use hop_crawler::crawler::PageQuery;
    ///
    /// let query = PageQuery::new("div.content a[href]").unwrap();
    /// let html = r#"<html><head><title>Test</title></head><body>
    ///     <div class="content"><a href="/wiki/A">A</a></div>
    ///     <a href="/wiki/Outside">Outside</a>
    /// </body></html>"#;
    /// let page = query.select("https://example.com/", html).unwrap();
    /// assert_eq!(page.title.as_deref(), Some("Test"));
    /// assert_eq!(page.anchors.len(), 1);
    /// ```
    pub fn select(&self, url: &str, html: &str) -> Result<FetchedPage, FetchError> {
        let document = Html::parse_document(html);

        let title = document
            .select(&self.title)
            .next()
            .map(element_text)
            .filter(|s| !s.is_empty());

        let body = document
            .select(&self.body)
            .next()
            .ok_or_else(|| FetchError::Parse {
                url: url.to_string(),
                message: "document has no body".to_string(),
            })?;

        let anchors = body
            .select(&self.anchors)
            .map(|element| {
                Link::new(
                    element.value().attr("href").unwrap_or_default(),
                    element_text(element),
                )
            })
            .collect();

        Ok(FetchedPage { title, anchors })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Visible text of an element with runs of whitespace collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
