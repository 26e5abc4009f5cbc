//! Router integration tests with a mock summarization service.
use std::collections::HashMap;
use std::io::Write;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::Query;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum::routing::get;
use khulasa_server::{AppState, ErrorResponse, ServerConfig, app};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_upstream() -> String {
    let upstream = Router::new()
        .route(
            "/summarize",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                match (params.get("url").map(String::as_str), params.get("lang").map(String::as_str)) {
                    (Some("https://example.com/limited"), _) => (
                        StatusCode::TOO_MANY_REQUESTS,
                        axum::Json(json!({ "message": "Too many requests" })),
                    ),
                    (_, Some("ur")) => (StatusCode::OK, axum::Json(json!({ "summary": "یہ ایک خلاصہ ہے۔" }))),
                    _ => (StatusCode::OK, axum::Json(json!({ "summary": "This is the summary." }))),
                }
            }),
        )
        .route(
            "/page",
            get(|| async { axum::response::Html("<html><head><title>Page</title></head><body><p>Body text</p></body></html>") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });
    format!("http://{}", addr)
}

fn router(vars: &[(&str, &str)]) -> Router {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    let config = ServerConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    app(AppState::from_config(&config).unwrap())
}

fn post_json(body: &str) -> Request<Body> {
    Request::post("/api/scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn error_body(response: Response) -> ErrorResponse {
    serde_json::from_value(json_body(response).await).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = router(&[]).oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_index_page() {
    let response = router(&[]).oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Article Summarizer"));
    assert!(html.contains("/api/scrape"));
}

#[tokio::test]
async fn test_summary_upstream_mode() {
    let base = spawn_upstream().await;
    let app = router(&[("RAPIDAPI_KEY", "key"), ("KHULASA_API_BASE", &base)]);

    let response = app.oneshot(post_json(r#"{"url":"https://example.com/a"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["summary"], "یہ ایک خلاصہ ہے۔");
    assert_eq!(body["translatedSummary"], "یہ ایک خلاصہ ہے۔");
    assert_eq!(body["translation"], "upstream");
}

#[tokio::test]
async fn test_summary_local_mode_from_config() {
    let base = spawn_upstream().await;
    let app = router(&[("RAPIDAPI_KEY", "key"), ("KHULASA_API_BASE", &base), ("KHULASA_TRANSLATION", "local")]);

    let response = app.oneshot(post_json(r#"{"url":"https://example.com/a"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["summary"], "This is the summary.");
    assert_eq!(body["translatedSummary"], "یہ ہے دی خلاصہ.");
}

#[tokio::test]
async fn test_summary_with_extension_dictionary() {
    let base = spawn_upstream().await;
    let mut file = tempfile_json(r#"{"this": "یہی"}"#);
    file.flush().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let app = router(&[("RAPIDAPI_KEY", "key"), ("KHULASA_API_BASE", &base), ("KHULASA_DICTIONARY", &path)]);
    let response = app
        .oneshot(post_json(r#"{"url":"https://example.com/a","translation":"local"}"#))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["translatedSummary"], "یہی ہے دی خلاصہ.");
}

#[tokio::test]
async fn test_scrape_requested() {
    let base = spawn_upstream().await;
    let app = router(&[("RAPIDAPI_KEY", "key"), ("KHULASA_API_BASE", &base)]);

    let payload = json!({ "url": format!("{}/page", base), "scrape": true }).to_string();
    let response = app.oneshot(post_json(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["title"], "Page");
    assert_eq!(body["scrapedText"], "Body text");
}

#[tokio::test]
async fn test_invalid_url() {
    let app = router(&[("RAPIDAPI_KEY", "key")]);
    let response = app.oneshot(post_json(r#"{"url":"ftp://example.com"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await.error, "Please provide a valid URL");
}

#[tokio::test]
async fn test_missing_url_field() {
    let app = router(&[("RAPIDAPI_KEY", "key")]);
    let response = app.oneshot(post_json("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(response).await.error, "Please provide a valid URL");
}

#[tokio::test]
async fn test_non_string_url() {
    let app = router(&[("RAPIDAPI_KEY", "key")]);
    let response = app.oneshot(post_json(r#"{"url": 42}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(error_body(response).await.error.starts_with("Invalid request"));
}

#[tokio::test]
async fn test_malformed_json() {
    let app = router(&[("RAPIDAPI_KEY", "key")]);
    let response = app.oneshot(post_json("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_api_key() {
    let app = router(&[]);
    let response = app.oneshot(post_json(r#"{"url":"https://example.com/a"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        error_body(response).await.error,
        "Server configuration error: RapidAPI key is missing."
    );
}

#[tokio::test]
async fn test_upstream_status_forwarded() {
    let base = spawn_upstream().await;
    let app = router(&[("RAPIDAPI_KEY", "key"), ("KHULASA_API_BASE", &base)]);

    let response = app.oneshot(post_json(r#"{"url":"https://example.com/limited"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        error_body(response).await.error,
        "Failed to summarize from RapidAPI: Too many requests"
    );
}

#[tokio::test]
async fn test_page_fetch_failure_is_bad_gateway() {
    let base = spawn_upstream().await;
    let app = router(&[("RAPIDAPI_KEY", "key"), ("KHULASA_API_BASE", &base)]);

    let payload = json!({ "url": format!("{}/nope", base), "scrape": true }).to_string();
    let response = app.oneshot(post_json(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        error_body(response).await.error,
        "Failed to fetch the article page: page returned 404 Not Found"
    );
}

#[tokio::test]
async fn test_oversized_page_rejected() {
    let base = spawn_upstream().await;
    let app = router(&[("RAPIDAPI_KEY", "key"), ("KHULASA_API_BASE", &base), ("KHULASA_MAX_PAGE_BYTES", "32")]);

    let payload = json!({ "url": format!("{}/page", base), "scrape": true }).to_string();
    let response = app.oneshot(post_json(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(error_body(response).await.error.contains("larger than 32 bytes"));
}

#[test]
fn test_state_carries_extension_dictionary() {
    let file = tempfile_json(r#"{"cat": "بلی"}"#);
    let config = ServerConfig { dictionary_path: Some(file.path().to_path_buf()), ..Default::default() };
    let state = AppState::from_config(&config).unwrap();

    let dictionary = state.summarizer.dictionary();
    assert_eq!(dictionary.lookup("cat"), Some("بلی"));
    assert_eq!(dictionary.lookup("the"), Some("دی"));
}

fn tempfile_json(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}
