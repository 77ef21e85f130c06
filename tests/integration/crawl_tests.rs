//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end through the HTTP fetcher.

use crate::support::wiki_page;
use hop_crawler::config::Config;
use hop_crawler::{
    ConfigError, Coordinator, CrawlError, CrawlOutcome, FetchError, Phase, Reporter,
};
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted at the mock server
fn create_test_config(server: &MockServer, worker_pool_size: usize) -> Config {
    let mut config = Config::default();
    config.crawl.seed_url = format!("{}/wiki/Seed", server.uri());
    config.crawl.origin_prefix = server.uri();
    config.crawl.worker_pool_size = worker_pool_size;
    config.crawl.shutdown_grace_secs = 5;
    config
}

/// Mounts an HTML page at `page_path`
async fn mount_page(server: &MockServer, page_path: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

async fn crawl(config: Config) -> (Result<CrawlOutcome, CrawlError>, String) {
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let mut reporter = Reporter::new(Vec::new());
    let result = coordinator.run(&mut reporter).await;
    let output = String::from_utf8(reporter.into_inner()).expect("Report is not UTF-8");
    (result, output)
}

#[tokio::test]
async fn test_crawl_over_http() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/wiki/Seed",
        wiki_page("Seed – Wiki", &["/wiki/A", "/wiki/B", "/static/logo.png"]),
    )
    .await;
    mount_page(&server, "/wiki/A", wiki_page("A", &["/wiki/C"])).await;
    mount_page(
        &server,
        "/wiki/B",
        wiki_page("B", &["/wiki/C", "/wiki/Diagram.PNG"]),
    )
    .await;
    mount_page(&server, "/wiki/C", wiki_page("C", &["/wiki/D"])).await;

    let (result, output) = crawl(create_test_config(&server, 4)).await;
    let outcome = result.expect("Crawl failed");

    assert_eq!(
        output,
        "Page title: Seed – Wiki\n\
         First phase completed. Found 2 links\n\
         Second phase completed. Found 2 links\n\
         Third phase completed. Found 2 links\n\
         \n\
         All scraped links:\n\
         1: /wiki/A - A\n\
         2: /wiki/B - B\n\
         3: /wiki/C - C\n\
         4: /wiki/C - C\n\
         5: /wiki/D - D\n\
         6: /wiki/D - D\n\
         \n\
         Total number of links scraped: 6\n"
    );

    let sources: Vec<&str> = outcome
        .accumulator
        .phase_results(Phase::Second)
        .map(|r| r.source_url.as_str())
        .collect();
    assert_eq!(
        sources,
        vec![
            format!("{}/wiki/A", server.uri()),
            format!("{}/wiki/B", server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_anchors_outside_content_are_ignored() {
    let server = MockServer::start().await;

    mount_page(&server, "/wiki/Seed", wiki_page("Seed", &["/wiki/A"])).await;
    mount_page(&server, "/wiki/A", wiki_page("A", &[])).await;

    // wiki_page puts /wiki/Nav in a navigation div outside the selector
    Mock::given(method("GET"))
        .and(path("/wiki/Nav"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (result, _) = crawl(create_test_config(&server, 2)).await;
    let outcome = result.expect("Crawl failed");

    assert!(outcome
        .accumulator
        .links()
        .all(|link| link.href != "/wiki/Nav"));
}

#[tokio::test]
async fn test_http_error_page_is_dropped() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/wiki/Seed",
        wiki_page("Seed", &["/wiki/Missing", "/wiki/Present"]),
    )
    .await;
    mount_page(&server, "/wiki/Present", wiki_page("Present", &["/wiki/Leaf"])).await;
    mount_page(&server, "/wiki/Leaf", wiki_page("Leaf", &[])).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;

    let (result, output) = crawl(create_test_config(&server, 2)).await;
    let outcome = result.expect("A failed page must not fail the crawl");

    assert_eq!(outcome.statistics.second.submitted, 2);
    assert_eq!(outcome.statistics.second.failed, 1);
    assert_eq!(outcome.statistics.third.submitted, 1);
    assert!(output.contains("Second phase completed. Found 1 links\n"));
    assert!(output.ends_with("Total number of links scraped: 3\n"));
}

#[tokio::test]
async fn test_seed_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Seed"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (result, output) = crawl(create_test_config(&server, 2)).await;

    match result {
        Err(CrawlError::SeedFetch { url, .. }) => {
            assert_eq!(url, format!("{}/wiki/Seed", server.uri()));
        }
        other => panic!("Expected a seed fetch failure, got {:?}", other),
    }
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_requests_identify_the_crawler() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Seed"))
        .and(header_regex("user-agent", "^hop-crawler/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(wiki_page("Seed", &[]), "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (result, _) = crawl(create_test_config(&server, 1)).await;
    result.expect("Seed request did not carry the crawler user agent");
}

#[tokio::test]
async fn test_capped_seed_over_http() {
    let server = MockServer::start().await;

    let hrefs: Vec<String> = (0..5).map(|i| format!("/wiki/P{}", i)).collect();
    let refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
    mount_page(&server, "/wiki/Seed", wiki_page("Seed", &refs)).await;
    for href in &hrefs[..2] {
        mount_page(&server, href, wiki_page("P", &[])).await;
    }

    Mock::given(method("GET"))
        .and(path("/wiki/P2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&server, 3);
    config.crawl.caps = "2,10,0".parse().expect("Valid caps");

    let (result, _) = crawl(config).await;
    let outcome = result.expect("Crawl failed");

    assert_eq!(outcome.statistics.first.links, 2);
    assert_eq!(outcome.statistics.second.fetched, 2);
}

#[tokio::test]
async fn test_non_html_page_is_a_failed_fetch() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/wiki/Seed",
        wiki_page("Seed", &["/wiki/Doc.pdf", "/wiki/Page"]),
    )
    .await;
    mount_page(&server, "/wiki/Page", wiki_page("Page", &[])).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Doc.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"%PDF-1.4 <a href=\"/wiki/Hidden\">x</a>".to_vec(),
            "application/pdf",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let (result, _) = crawl(create_test_config(&server, 2)).await;
    let outcome = result.expect("A non-HTML page must not fail the crawl");

    let second = outcome.statistics.second;
    assert_eq!(second.submitted, 2);
    assert_eq!(second.fetched, 1);
    assert_eq!(second.failed, 1);

    let sources: Vec<String> = outcome
        .accumulator
        .phase_results(Phase::Second)
        .map(|r| r.source_url.clone())
        .collect();
    assert_eq!(sources, vec![format!("{}/wiki/Page", server.uri())]);
}

#[tokio::test]
async fn test_non_html_seed_fails_the_crawl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Seed"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 16], "image/png"))
        .mount(&server)
        .await;

    let (result, output) = crawl(create_test_config(&server, 2)).await;

    assert!(matches!(
        result,
        Err(CrawlError::SeedFetch {
            source: FetchError::ContentType { .. },
            ..
        })
    ));
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_zero_width_pool_is_a_config_error() {
    let server = MockServer::start().await;

    match Coordinator::new(create_test_config(&server, 0)) {
        Err(CrawlError::Config(ConfigError::Validation(message))) => {
            assert!(message.contains("at least 1"));
        }
        Err(other) => panic!("Expected a validation error, got {}", other),
        Ok(_) => panic!("A zero-width pool was accepted"),
    }
}
