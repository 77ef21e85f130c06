use crate::config::ExtractConfig;
use crate::state::Link;

/// Decides which extracted anchors are kept
///
/// A link is kept when its raw href contains the keep substring
/// (case-sensitive) and its lower-cased href does not end with any image
/// extension. Query strings, fragments and self-links are not touched.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    keep_substring: String,
    image_extensions: Vec<String>,
}

impl LinkFilter {
    pub fn new(keep_substring: impl Into<String>, image_extensions: &[String]) -> Self {
        Self {
            keep_substring: keep_substring.into(),
            image_extensions: image_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::new(config.keep_substring.clone(), &config.image_extensions)
    }

    pub fn keeps(&self, link: &Link) -> bool {
        self.keeps_href(&link.href)
    }

    pub fn keeps_href(&self, href: &str) -> bool {
        href.contains(&self.keep_substring) && !self.is_image(href)
    }

    fn is_image(&self, href: &str) -> bool {
        let lowered = href.to_lowercase();
        self.image_extensions
            .iter()
            .any(|ext| lowered.ends_with(ext.as_str()))
    }
}
