//! HTTP routes of the scrape service.

#![cfg(feature = "server")]

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::{fast_options, rich_page, FakeFetcher, PageScript, ScriptedBrowser};
use serde_json::Value;
use tower::ServiceExt;
use universal_scraper::server::{router, ServerConfig};
use universal_scraper::Scraper;

fn app(fetcher: FakeFetcher, browser: ScriptedBrowser) -> axum::Router {
    router(Arc::new(Scraper::with_parts(fetcher, browser, fast_options())), None)
}

fn scrape_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/scrape")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_reports_ok() {
    let response = app(FakeFetcher::ok(""), ScriptedBrowser::new(PageScript::default()))
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn non_http_scheme_is_rejected_before_fetching() {
    let fetcher = FakeFetcher::ok(rich_page());
    let scraper = Arc::new(Scraper::with_parts(
        fetcher,
        ScriptedBrowser::new(PageScript::default()),
        fast_options(),
    ));

    for url in ["ftp://example.com", "example.com", "javascript:alert(1)"] {
        let response = router(Arc::clone(&scraper), None)
            .oneshot(scrape_request(&format!(r#"{{"url":"{url}"}}"#)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{url}");
        assert_eq!(json_body(response).await["detail"], "Invalid URL scheme");
    }
}

#[tokio::test]
async fn scrape_returns_wrapped_result() {
    let response = app(
        FakeFetcher::ok(rich_page()),
        ScriptedBrowser::new(PageScript::default()),
    )
    .oneshot(scrape_request(r#"{"url":"https://example.com/"}"#))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let result = &body["result"];
    assert_eq!(result["url"], "https://example.com/");
    assert_eq!(result["meta"]["title"], "Rich page");
    assert_eq!(result["sections"][0]["id"], "sec-0");
    assert_eq!(result["sections"][0]["type"], "section");
    assert_eq!(result["errors"], Value::Array(vec![]));
}

#[tokio::test]
async fn failed_scrape_is_still_ok_status() {
    let response = app(FakeFetcher::status(500), ScriptedBrowser::failing_launch())
        .oneshot(scrape_request(r#"{"url":"https://down.example/"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["result"]["meta"]["title"], "Error");
    assert_eq!(body["result"]["errors"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn missing_static_dir_is_not_served() {
    let scraper = Arc::new(Scraper::with_parts(
        FakeFetcher::ok(""),
        ScriptedBrowser::new(PageScript::default()),
        fast_options(),
    ));
    let missing = std::path::Path::new("does/not/exist");

    let response = router(scraper, Some(missing))
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn config_reads_port_from_lookup() {
    let config = ServerConfig::from_lookup(|key| (key == "SCRAPER_PORT").then(|| "9100".to_string())).unwrap();

    assert_eq!(config.port, 9100);
    assert_eq!(config.bind_addr(), "0.0.0.0:9100");
}
