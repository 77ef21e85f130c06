//! Shared helpers: a scripted in-memory fetcher and test configuration

use async_trait::async_trait;
use hop_crawler::config::{Config, PhaseCaps};
use hop_crawler::crawler::{FetchedPage, PageQuery};
use hop_crawler::{Coordinator, CrawlError, CrawlOutcome, FetchError, PageFetcher, Reporter};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ORIGIN: &str = "https://wiki.test";
pub const SEED: &str = "https://wiki.test/wiki/Seed";

/// What the scripted fetcher does for one URL
pub enum Script {
    Page(String),
    Fail,
}

/// A fetcher event, recorded in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start(String),
    End(String),
}

type Generator = Box<dyn Fn(&str) -> Script + Send + Sync>;

/// In-memory `PageFetcher` driven by a URL -> page function
///
/// Pages go through the real `PageQuery`, so selector and body handling are
/// the same as for HTTP fetches.
pub struct ScriptedFetcher {
    generator: Generator,
    jitter: bool,
    events: Mutex<Vec<Event>>,
}

impl ScriptedFetcher {
    pub fn new(generator: impl Fn(&str) -> Script + Send + Sync + 'static) -> Self {
        Self {
            generator: Box::new(generator),
            jitter: false,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Serves `pages` by exact URL; every other URL fails
    pub fn from_pages(pages: Vec<(String, String)>) -> Self {
        let pages: HashMap<String, String> = pages.into_iter().collect();

        Self::new(move |url| match pages.get(url) {
            Some(html) => Script::Page(html.clone()),
            None => Script::Fail,
        })
    }

    /// Delays each fetch by a few milliseconds derived from its URL, so
    /// completion order differs from submission order
    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// URLs in the order their fetches started
    pub fn started(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Start(url) => Some(url),
                Event::End(_) => None,
            })
            .collect()
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.started().iter().filter(|u| u.as_str() == url).count()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_and_select(
        &self,
        url: &str,
        query: &PageQuery,
    ) -> Result<FetchedPage, FetchError> {
        self.record(Event::Start(url.to_string()));

        if self.jitter {
            let millis = url.bytes().map(u64::from).sum::<u64>() % 5;
            tokio::time::sleep(Duration::from_millis(millis)).await;
        } else {
            tokio::task::yield_now().await;
        }

        let result = match (self.generator)(url) {
            Script::Page(html) => query.select(url, &html),
            Script::Fail => Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            }),
        };

        self.record(Event::End(url.to_string()));
        result
    }
}

/// A MediaWiki-like page whose content div holds one anchor per href
///
/// The anchor text is the href without its `/wiki/` prefix.
pub fn wiki_page(title: &str, hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<a href="{}">{}</a> "#,
                href,
                href.trim_start_matches("/wiki/")
            )
        })
        .collect();

    format!(
        r#"<html><head><title>{}</title></head><body>
<div id="mw-navigation"><a href="/wiki/Nav">Navigation</a></div>
<div class="mw-body-content">{}</div>
</body></html>"#,
        title, anchors
    )
}

pub fn url_of(href: &str) -> String {
    format!("{}{}", ORIGIN, href)
}

pub fn test_config(worker_pool_size: usize) -> Config {
    let mut config = Config::default();
    config.crawl.seed_url = SEED.to_string();
    config.crawl.origin_prefix = ORIGIN.to_string();
    config.crawl.worker_pool_size = worker_pool_size;
    config.crawl.caps = PhaseCaps::default();
    config.crawl.shutdown_grace_secs = 5;
    config
}

/// Runs a full crawl and returns its result together with the stdout text
pub async fn run_crawl(
    config: Config,
    fetcher: Arc<ScriptedFetcher>,
) -> (Result<CrawlOutcome, CrawlError>, String) {
    let mut coordinator =
        Coordinator::with_fetcher(config, fetcher).expect("Failed to create coordinator");
    let mut reporter = Reporter::new(Vec::new());
    let result = coordinator.run(&mut reporter).await;
    let output = String::from_utf8(reporter.into_inner()).expect("Report is not UTF-8");
    (result, output)
}
