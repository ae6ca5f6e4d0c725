//! End-to-end fetches through both paths against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zen_toolbox::config::ToolboxConfig;
use zen_toolbox::format::HtmlFormatter;
use zen_toolbox::net::select_fetcher;
use zen_toolbox::storage::MemoryStore;
use zen_toolbox::tool::{FetchStats, HtmlFetcher};

#[derive(Debug)]
struct Observed {
    content: Option<String>,
    stats: Option<FetchStats>,
    error: Option<String>,
    show_formatted: bool,
}

/// Run one blocking fetch off the async runtime.
async fn fetch(config: ToolboxConfig, input: &str) -> Observed {
    let input = input.to_string();
    tokio::task::spawn_blocking(move || {
        let fetcher = select_fetcher(&config).expect("fetcher");
        let mut tool = HtmlFetcher::new(
            fetcher,
            Arc::new(MemoryStore::new()),
            HtmlFormatter::new(config.print_width),
        );
        tool.fetch_blocking(&input);
        Observed {
            content: tool.content().map(String::from),
            stats: tool.stats().cloned(),
            error: tool.error().map(String::from),
            show_formatted: tool.show_formatted(),
        }
    })
    .await
    .expect("fetch task")
}

fn proxy_config(server: &MockServer) -> ToolboxConfig {
    ToolboxConfig {
        use_bridge: false,
        proxy_endpoint: format!("{}/get", server.uri()),
        ..ToolboxConfig::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn proxy_scenario_example_com() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("url", "https://example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": "<html></html>"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let seen = fetch(proxy_config(&server), "example.com").await;

    assert_eq!(seen.content.as_deref(), Some("<html></html>"));
    assert_eq!(seen.stats.as_ref().map(|s| s.status.as_str()), Some("200"));
    assert_eq!(seen.error, None);
    assert!(seen.show_formatted);
}

#[tokio::test(flavor = "multi_thread")]
async fn proxy_http_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let seen = fetch(proxy_config(&server), "example.com").await;

    assert_eq!(seen.error.as_deref(), Some("HTTP error! status: 500"));
    assert_eq!(seen.content, None);
    assert!(seen.stats.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn proxy_without_contents_is_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": null,
            "status": { "http_code": 403 }
        })))
        .mount(&server)
        .await;

    let seen = fetch(proxy_config(&server), "blocked.example").await;

    assert_eq!(seen.error.as_deref(), Some("No content returned or URL blocked."));
    assert_eq!(seen.content, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn bridge_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string("<p>hello</p>"),
        )
        .mount(&server)
        .await;

    let seen = fetch(ToolboxConfig::default(), &format!("{}/page", server.uri())).await;

    assert_eq!(seen.content.as_deref(), Some("<p>hello</p>"));
    let stats = seen.stats.expect("stats");
    assert_eq!(stats.status, "200");
    assert_eq!(stats.size, "0.01 KB");
}

#[tokio::test(flavor = "multi_thread")]
async fn bridge_follows_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>moved</h1>"))
        .mount(&server)
        .await;

    let seen = fetch(ToolboxConfig::default(), &format!("{}/old", server.uri())).await;

    assert_eq!(seen.content.as_deref(), Some("<h1>moved</h1>"));
    assert_eq!(seen.stats.expect("stats").status, "200 (redirected)");
}

#[tokio::test(flavor = "multi_thread")]
async fn bridge_keeps_error_status_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>not here</p>"))
        .mount(&server)
        .await;

    let seen = fetch(ToolboxConfig::default(), &format!("{}/missing", server.uri())).await;

    assert_eq!(seen.content.as_deref(), Some("<p>not here</p>"));
    assert_eq!(seen.stats.expect("stats").status, "404");
}

#[tokio::test(flavor = "multi_thread")]
async fn bridge_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>late</p>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ToolboxConfig {
        fetch_timeout_secs: 1,
        ..ToolboxConfig::default()
    };
    let seen = fetch(config, &format!("{}/slow", server.uri())).await;

    assert_eq!(seen.error.as_deref(), Some("Request timed out after 1s"));
    assert_eq!(seen.content, None);
}
