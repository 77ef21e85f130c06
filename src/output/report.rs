//! Line-oriented crawl report written to stdout
//!
//! The format is stable and test-anchored:
//!
//! ```text
//! Page title: {title}
//! First phase completed. Found {n} links
//! Second phase completed. Found {m} links
//! Third phase completed. Found {k} links
//!
//! All scraped links:
//! 1: {href} - {text}
//! ...
//!
//! Total number of links scraped: {N}
//! ```

use crate::state::{CrawlAccumulator, Phase};
use std::io::{self, Write};

/// Writes progress lines and the final link listing
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reporter, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Reports the seed page title; a missing title prints as empty
    pub fn page_title(&mut self, title: Option<&str>) -> io::Result<()> {
        writeln!(self.out, "Page title: {}", title.unwrap_or_default())?;
        self.out.flush()
    }

    /// Reports that `phase` finished with `links` links kept in total
    pub fn phase_completed(&mut self, phase: Phase, links: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "{} phase completed. Found {} links",
            phase.label(),
            links
        )?;
        self.out.flush()
    }

    /// Lists every link in accumulator order with a 1-based index, then the total
    ///
    /// Returns the number of links written.
    pub fn scraped_links(&mut self, accumulator: &CrawlAccumulator) -> io::Result<usize> {
        writeln!(self.out)?;
        writeln!(self.out, "All scraped links:")?;

        let mut count = 0;
        for (index, link) in accumulator.links().enumerate() {
            writeln!(self.out, "{}: {} - {}", index + 1, link.href, link.text)?;
            count = index + 1;
        }

        writeln!(self.out)?;
        writeln!(self.out, "Total number of links scraped: {}", count)?;
        self.out.flush()?;
        Ok(count)
    }
}
