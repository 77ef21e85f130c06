//! URL handling module
//!
//! Provides the href normalizer and the link filter. Both work on raw href
//! strings exactly as they appear in the source HTML; no URL parsing happens
//! here.

mod filter;
mod normalize;

pub use filter::LinkFilter;
pub use normalize::normalize_href;
