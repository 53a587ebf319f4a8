//! HTTP boundary tests: status mapping and response shapes of the router.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use meli_scraper::api::{build_app, AppState};
use meli_scraper::utils::http::create_client;
use meli_scraper::{Config, MercadoLibreScraper};

fn app() -> Router {
    let config = Arc::new(Config {
        marketplace_domain: "127.0.0.1".to_string(),
        request_timeout_seconds: 5,
        ..Config::default()
    });
    let client = create_client(&config).expect("client");
    let scraper = Arc::new(MercadoLibreScraper::new(config));
    build_app(AppState { client, scraper })
}

async fn post_extract(body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/mercado-libre")
                .header("content-type", "application/json")
                .body(body.into())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: Value = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn blank_or_missing_url_is_bad_request() {
    for body in [
        json!({"url": "   "}).to_string(),
        json!({}).to_string(),
        json!({"url": 42}).to_string(),
        "not json".to_string(),
    ] {
        let (status, json) = post_extract(body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json, json!({"error": "Missing Mercado Libre URL"}));
    }
}

#[tokio::test]
async fn foreign_host_is_bad_request() {
    let (status, json) = post_extract(json!({"url": "https://www.amazon.com/dp/B0"}).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("not a Mercado Libre product page"));
}

#[tokio::test]
async fn upstream_failure_is_server_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (status, json) =
        post_extract(json!({"url": format!("{}/MLA-9", server.uri())}).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn success_returns_product_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<meta property="og:title" content="Widget">
               <meta property="og:image" content="a.jpg">"#,
        ))
        .mount(&server)
        .await;

    let url = format!("{}/MLA-10", server.uri());
    let (status, json) = post_extract(json!({ "url": url.clone() }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "product": {
                "name": "Widget",
                "images": ["a.jpg"],
                "url": url
            }
        })
    );
}

#[tokio::test]
async fn nameless_page_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let (status, json) =
        post_extract(json!({"url": format!("{}/MLA-11", server.uri())}).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({"error": "Unable to extract product information from Mercado Libre page"})
    );
}
