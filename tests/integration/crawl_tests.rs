//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! HTTP fetcher through crawl and collection end-to-end.

use async_trait::async_trait;
use recipe_crawler::config::Config;
use recipe_crawler::crawler::{
    run_from_files, Document, FetchPool, HttpFetcher, PageFetcher, RecipeCollector,
    RecipeCrawler, StaticFetcher,
};
use recipe_crawler::output::format_recipes;
use recipe_crawler::{FetchError, FetchResult, RecipeCrawlerError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECIPE_BODY: &str = "<h1>Recipe</h1><h2>Ingredients</h2><h2>Instructions</h2>";

fn html(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

/// Mounts a small recipe site:
///
/// ```text
/// /            -> /recipes/pancakes, /recipes/waffles, /about, /recipes/broken
/// /recipes/pancakes -> /recipes/syrup
/// /recipes/waffles  -> /recipes/pancakes
/// /recipes/syrup    -> (nothing)
/// /recipes/broken   -> HTTP 500
/// ```
async fn mount_site(server: &MockServer) {
    mount_html(
        server,
        "/",
        html(
            "Home",
            r#"<a href="/recipes/pancakes">Pancakes</a>
               <a href="recipes/waffles">Waffles</a>
               <a href="/about">About</a>
               <a href="/recipes/broken">Broken</a>"#,
        ),
    )
    .await;

    mount_html(
        server,
        "/recipes/pancakes",
        html(
            "Pancakes",
            &format!(
                r#"{}
                <ul><li>Prep: 5 min</li><li>Total Time: 20 min</li><li>Yield: 4 servings</li></ul>
                <p class="ingredient-item">1 cup flour</p>
                <p class="ingredient-item">Deselect All</p>
                <p class="ingredient-item">2 eggs</p>
                <p class="ingredient-item">1 cup milk</p>
                <a href="/recipes/syrup">Syrup</a>"#,
                RECIPE_BODY
            ),
        ),
    )
    .await;

    mount_html(
        server,
        "/recipes/waffles",
        html(
            "Waffles",
            &format!(
                r#"{}<a href="/recipes/pancakes">Pancakes</a>"#,
                RECIPE_BODY
            ),
        ),
    )
    .await;

    mount_html(server, "/recipes/syrup", html("Syrup", RECIPE_BODY)).await;

    mount_html(server, "/about", html("About", RECIPE_BODY)).await;

    Mock::given(method("GET"))
        .and(path("/recipes/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

fn http_fetcher() -> Arc<HttpFetcher> {
    Arc::new(HttpFetcher::new(&Config::default()).expect("Failed to build HTTP client"))
}

#[tokio::test]
async fn test_http_fetcher_parses_page() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let doc = http_fetcher()
        .fetch(&format!("{}/", base_url))
        .await
        .expect("Fetch failed");

    assert_eq!(doc.title, "Home");
    assert!(doc
        .links
        .contains(&format!("{}/recipes/waffles", base_url)));
    assert!(doc.links.contains(&format!("{}/about", base_url)));
}

#[tokio::test]
async fn test_http_fetcher_reports_errors() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&mock_server)
        .await;

    let fetcher = http_fetcher();
    let base_url = mock_server.uri();

    let missing = fetcher.fetch(&format!("{}/nope", base_url)).await;
    assert!(matches!(missing, Err(FetchError::HttpStatus { status: 404, .. })));

    let broken = fetcher.fetch(&format!("{}/recipes/broken", base_url)).await;
    assert!(matches!(broken, Err(FetchError::HttpStatus { status: 500, .. })));

    let json = fetcher.fetch(&format!("{}/data.json", base_url)).await;
    assert!(matches!(json, Err(FetchError::ContentMismatch { .. })));
}

#[tokio::test]
async fn test_http_fetcher_unreachable_host() {
    let fetcher = http_fetcher();
    // Port 9 (discard) is closed on test machines
    let result = fetcher.fetch("http://127.0.0.1:9/recipes/x").await;

    match result {
        Err(e) => assert_eq!(e.url(), "http://127.0.0.1:9/recipes/x"),
        Ok(_) => panic!("fetch of a closed port should fail"),
    }
}

#[tokio::test]
async fn test_crawl_depth_one_over_http() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let crawler = RecipeCrawler::new(http_fetcher(), &Config::default().crawler);
    let found = crawler.crawl(&format!("{}/", base_url), 1).await;

    // /about classifies as a recipe but its URL lacks the marker;
    // /recipes/broken fails to fetch; the seed is never included
    let expected: HashSet<String> = [
        format!("{}/recipes/pancakes", base_url),
        format!("{}/recipes/waffles", base_url),
    ]
    .into_iter()
    .collect();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_crawl_depth_two_over_http() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let crawler = RecipeCrawler::new(http_fetcher(), &Config::default().crawler);
    let found = crawler.crawl(&format!("{}/", base_url), 2).await;

    let expected: HashSet<String> = [
        format!("{}/recipes/pancakes", base_url),
        format!("{}/recipes/waffles", base_url),
        format!("{}/recipes/syrup", base_url),
    ]
    .into_iter()
    .collect();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_collect_over_http() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let collector = RecipeCollector::new(http_fetcher(), &Config::default().crawler);
    let recipes = collector
        .collect([
            format!("{}/recipes/pancakes", base_url),
            format!("{}/recipes/broken", base_url),
        ])
        .await;

    assert_eq!(recipes.len(), 1);
    let pancakes = &recipes[0];
    assert_eq!(pancakes.url, format!("{}/recipes/pancakes", base_url));
    assert_eq!(pancakes.name, "Pancakes");
    assert_eq!(pancakes.time, "Total Time: 20 min");
    assert_eq!(pancakes.yields, "Yield: 4 servings");
    assert_eq!(
        pancakes.ingredients,
        vec!["1 cup flour", "2 eggs", "1 cup milk"]
    );
}

#[tokio::test]
async fn test_run_from_files_writes_recipes() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let seeds_path = dir.path().join("seeds.txt");
    let output_path = dir.path().join("recipes.txt");
    std::fs::write(&seeds_path, format!("  {}/  \n\n", base_url)).expect("Failed to write seeds");

    let output = run_from_files(
        &Config::default(),
        &seeds_path,
        &output_path,
        CancellationToken::new(),
    )
    .await
    .expect("Run failed");

    assert!(!output.interrupted);
    assert_eq!(output.recipes.len(), 2);

    let written = std::fs::read_to_string(&output_path).expect("Failed to read output");
    assert_eq!(written, format_recipes(&output.recipes));
    assert!(written.starts_with(&format!(
        "{}/recipes/pancakes\nPancakes\nTotal Time: 20 min\nYield: 4 servings\n1 cup flour\n2 eggs\n1 cup milk\n\n",
        base_url
    )));
}

#[tokio::test]
async fn test_run_from_files_missing_seed_file() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output_path = dir.path().join("recipes.txt");

    let result = run_from_files(
        &Config::default(),
        &dir.path().join("missing.txt"),
        &output_path,
        CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(RecipeCrawlerError::Input(_))));
    assert!(!output_path.exists());
}

/// Tracks how many fetches are running at once
struct GaugedFetcher {
    inner: StaticFetcher,
    active: AtomicUsize,
    peak: AtomicUsize,
}

#[async_trait]
impl PageFetcher for GaugedFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Document> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let result = self.inner.fetch(url).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[tokio::test]
async fn test_concurrent_fetches_are_capped() {
    let seed = "https://example.com/";
    let mut inner = StaticFetcher::new();
    let mut anchors = String::new();
    for i in 0..20 {
        let url = format!("https://example.com/recipes/{}", i);
        anchors.push_str(&format!(r#"<a href="{}">r</a>"#, url));
        inner = inner.with_page(url, html("R", RECIPE_BODY));
    }
    inner = inner.with_page(seed, html("Home", &anchors));

    let fetcher = Arc::new(GaugedFetcher {
        inner,
        active: AtomicUsize::new(0),
        peak: AtomicUsize::new(0),
    });
    let crawler = RecipeCrawler::with_pool(FetchPool::new(fetcher.clone(), 3));

    let found = crawler.crawl(seed, 1).await;

    assert_eq!(found.len(), 20);
    let peak = fetcher.peak.load(Ordering::SeqCst);
    assert!(peak <= 3, "Expected at most 3 concurrent fetches, saw {}", peak);
    assert!(peak > 1, "Expected fetches to overlap, saw {}", peak);
}

/// Never answers for one URL
struct HangingFetcher {
    inner: StaticFetcher,
    hang_on: &'static str,
}

#[async_trait]
impl PageFetcher for HangingFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Document> {
        if url == self.hang_on {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.inner.fetch(url).await
    }
}

#[tokio::test]
async fn test_cancellation_mid_crawl_keeps_partial_results() {
    let seed = "https://example.com/";
    let fast = "https://example.com/recipes/fast";
    let hub = "https://example.com/recipes/hub";
    let deep = "https://example.com/recipes/deep";

    let fetcher = Arc::new(HangingFetcher {
        inner: StaticFetcher::new()
            .with_page(
                seed,
                html(
                    "Home",
                    &format!(r#"<a href="{}">a</a><a href="{}">b</a>"#, fast, hub),
                ),
            )
            .with_page(fast, html("Fast", RECIPE_BODY))
            .with_page(
                hub,
                html("Hub", &format!(r#"{}<a href="{}">deep</a>"#, RECIPE_BODY, deep)),
            )
            .with_page(deep, html("Deep", RECIPE_BODY)),
        hang_on: deep,
    });

    let token = CancellationToken::new();
    let crawler = RecipeCrawler::new(fetcher, &Config::default().crawler)
        .with_cancellation(token.clone());

    let crawl = tokio::spawn(async move { crawler.crawl(seed, 3).await });
    tokio::time::sleep(Duration::from_millis(200)).await;
    token.cancel();

    let found = tokio::time::timeout(Duration::from_secs(5), crawl)
        .await
        .expect("Cancelled crawl did not return")
        .expect("Crawl task panicked");

    let expected: HashSet<String> = [fast.to_string(), hub.to_string()].into_iter().collect();
    assert_eq!(found, expected);
}
