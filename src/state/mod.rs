//! Crawl state: links, phase results and the accumulator they are merged into

mod accumulator;
mod link;
mod phase;

pub use accumulator::CrawlAccumulator;
pub use link::{Link, PhaseResult};
pub use phase::{Cap, Phase};
