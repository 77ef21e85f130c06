use crate::state::Phase;

/// An anchor kept by the crawler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The raw `href` attribute as it appeared in the source HTML
    pub href: String,

    /// The anchor's visible text, whitespace-collapsed
    pub text: String,
}

impl Link {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }
}

/// The filtered, capped links extracted from one fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseResult {
    /// Hop level the page was fetched in
    pub phase: Phase,

    /// Absolute URL that was fetched
    pub source_url: String,

    /// Kept links in document order
    pub links: Vec<Link>,
}

impl PhaseResult {
    pub fn new(phase: Phase, source_url: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            phase,
            source_url: source_url.into(),
            links,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
