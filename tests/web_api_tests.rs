//! Integration tests for the Tradeforge Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use tradeforge::analysis::capture::{CapturedPage, PageCapture};
use tradeforge::analysis::llm::{ChatModel, ChatRequest, LlmError};
use tradeforge::analysis::{AnalysisError, Analyzer};
use tradeforge::web::{create_router, AppState};

mod fixtures;
use fixtures::{pool_cleaner_analysis, temp_config, write_json};

/// Capture backend returning a canned page or a canned failure.
struct StubCapture(Option<String>);

#[async_trait]
impl PageCapture for StubCapture {
    async fn capture(&self, url: &str) -> Result<CapturedPage, AnalysisError> {
        match &self.0 {
            None => Ok(CapturedPage {
                url: url.to_string(),
                html: "<html><h1>Crystal Pools</h1></html>".to_string(),
                styles: json!({"body": null, "headings": [], "buttons": []}),
                screenshot_base64: None,
            }),
            Some(message) => Err(AnalysisError::Capture(message.clone())),
        }
    }
}

/// Chat model returning a fixed reply.
struct StubModel(String);

#[async_trait]
impl ChatModel for StubModel {
    async fn complete(&self, _request: ChatRequest) -> Result<String, LlmError> {
        Ok(self.0.clone())
    }

    fn model(&self) -> &str {
        "stub"
    }
}

fn stub_analyzer(capture_failure: Option<&str>, reply: &str) -> Analyzer {
    Analyzer::new(
        Arc::new(StubCapture(capture_failure.map(str::to_string))),
        Arc::new(StubModel(reply.to_string())),
        10_000,
    )
}

/// Creates a test AppState with a temporary data directory.
fn create_test_state() -> (AppState, TempDir) {
    let reply = pool_cleaner_analysis().to_string();
    create_test_state_with(stub_analyzer(None, &reply))
}

fn create_test_state_with(analyzer: Analyzer) -> (AppState, TempDir) {
    let (config, temp_dir) = temp_config();
    let state = AppState::with_analyzer(config, analyzer).expect("Failed to create app state");
    (state, temp_dir)
}

/// Helper to make a GET request and get the response body as JSON.
async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a GET request and get the raw response.
async fn get_raw(app: &axum::Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, content_type, body.to_vec())
}

/// Helper to make a POST request with JSON body.
async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, serde_json::to_vec(&body).unwrap()).await
}

/// Helper to POST raw bytes labelled as JSON.
async fn post_raw(app: &axum::Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

// ============================================================================
// Trade Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_list_trades_seeded() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/trades").await;

    assert_eq!(status, StatusCode::OK);
    let trades = json.as_array().unwrap();
    assert_eq!(trades.len(), 16);
    assert!(trades.iter().any(|t| t["slug"] == "window-cleaner"));
    assert!(trades[0]["icon"].is_string());
}

#[tokio::test]
async fn test_get_trade_success() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/trades/plumber").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["slug"], "plumber");
    assert!(!json["content"]["hero"]["headline"]
        .as_str()
        .unwrap()
        .is_empty());
    assert!(json["blueprints"]["clean"].is_object());
    assert!(json["blueprints"]["luxury"].is_object());
    assert!(json.get("tradeIdentity").is_none());
}

#[tokio::test]
async fn test_get_trade_not_found() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/trades/astronaut").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["message"].as_str().unwrap().contains("astronaut"));
}

#[tokio::test]
async fn test_get_trade_uses_identity_file() {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);

    // Generate once to produce an identity file, then check it is served
    let (status, _) = post_json(&app, "/api/trades/generate", pool_cleaner_analysis()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(temp_dir.path().join("trades/pool-cleaner.json").exists());

    let (status, json) = get_json(&app, "/api/trades/pool-cleaner").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tradeIdentity"]["slug"], "pool-cleaner");
    assert_eq!(json["content"]["pain_points"][0], "Green water");
}

#[tokio::test]
async fn test_create_trade_then_conflict() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let body = json!({
        "name": "Chimney Sweep",
        "slug": "chimney-sweep",
        "description": "Flue cleaning and inspections",
        "icon": "flame"
    });

    let (status, json) = post_json(&app, "/api/trades", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["slug"], "chimney-sweep");

    let (status, json) = post_json(&app, "/api/trades", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["message"].is_string());

    let (_, trades) = get_json(&app, "/api/trades").await;
    assert_eq!(trades.as_array().unwrap().len(), 17);

    let (status, detail) = get_json(&app, "/api/trades/chimney-sweep").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        detail["content"]["contact"]["email"],
        "contact@chimney-sweeppros.com"
    );
    assert!(!detail["content"]["faqs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_trade_validation_errors() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/api/trades",
        json!({"name": "", "slug": "Bad Slug!", "description": "x", "icon": "x"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"slug"));
    assert!(fields.contains(&"name"));
}

#[tokio::test]
async fn test_create_trade_wrong_field_type() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/api/trades",
        json!({"name": 5, "slug": "x-y", "description": "Test", "icon": "star"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].is_string());
    assert_eq!(json["errors"][0]["field"], "name");

    let (_, trades) = get_json(&app, "/api/trades").await;
    assert_eq!(trades.as_array().unwrap().len(), 16);
}

#[tokio::test]
async fn test_malformed_json_bodies_are_rejected_as_json() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    for uri in ["/api/trades", "/api/trades/analyze", "/api/trades/generate"] {
        let (status, json) = post_raw(&app, uri, "{broken").await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(json["message"].is_string(), "{uri}");
        assert_eq!(json["errors"][0]["field"], "body", "{uri}");
    }
}

#[tokio::test]
async fn test_analyze_non_string_url() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(&app, "/api/trades/analyze", json!({"url": 5})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].is_string());
}

// ============================================================================
// Analysis and Generation Tests
// ============================================================================

#[tokio::test]
async fn test_analyze_returns_flattened_analysis() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/api/trades/analyze",
        json!({"url": "https://crystal-pools.example"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["trade"], "Pool Cleaner");
    assert_eq!(json["hero_style"], "split");
    assert!(json["color_palette"].is_array());
}

#[tokio::test]
async fn test_analyze_missing_url() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(&app, "/api/trades/analyze", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "URL is required");
}

#[tokio::test]
async fn test_analyze_blocked_site() {
    let (state, _temp_dir) =
        create_test_state_with(stub_analyzer(Some("Navigation failed with status 403"), "{}"));
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/api/trades/analyze",
        json!({"url": "https://fortress.example"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "This website blocks automated analysis.");
}

#[tokio::test]
async fn test_analyze_unparseable_reply() {
    let (state, _temp_dir) = create_test_state_with(stub_analyzer(None, "I cannot help"));
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/api/trades/analyze",
        json!({"url": "https://crystal-pools.example"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Brand analysis failed");
}

#[tokio::test]
async fn test_generate_creates_then_is_idempotent() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(&app, "/api/trades/generate", pool_cleaner_analysis()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["slug"], "pool-cleaner");
    assert_eq!(json["trade"], "Pool Cleaner");
    assert!(json["blueprints"]["bold"].is_object());

    let (status, again) = post_json(&app, "/api/trades/generate", pool_cleaner_analysis()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["slug"], "pool-cleaner");

    let (_, trades) = get_json(&app, "/api/trades").await;
    assert_eq!(trades.as_array().unwrap().len(), 17);
}

#[tokio::test]
async fn test_generate_publishes_style() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (_, before) = get_json(&app, "/api/brands/pool-cleaner/style").await;
    assert_eq!(before["matched"], false);

    post_json(&app, "/api/trades/generate", pool_cleaner_analysis()).await;

    let (status, after) = get_json(&app, "/api/brands/pool-cleaner/style").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["matched"], true);
    assert_eq!(after["style"]["color_palette"]["primary"], "#0EA5E9");
}

#[tokio::test]
async fn test_generate_conflict_with_seeded_trade() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let mut analysis = pool_cleaner_analysis();
    analysis["trade"] = json!("Plumber");

    let (status, json) = post_json(&app, "/api/trades/generate", analysis).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["message"].as_str().unwrap().contains("plumber"));
}

#[tokio::test]
async fn test_generate_invalid_profile() {
    let (state, temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = post_json(
        &app,
        "/api/trades/generate",
        json!({"trade": "", "color_palette": ["not-a-color"]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!json["errors"].as_array().unwrap().is_empty());
    assert_eq!(
        std::fs::read_dir(temp_dir.path().join("trades")).unwrap().count(),
        0
    );

    let (_, trades) = get_json(&app, "/api/trades").await;
    assert_eq!(trades.as_array().unwrap().len(), 16);
}

// ============================================================================
// Theme, Style, Preview and Export Tests
// ============================================================================

#[tokio::test]
async fn test_list_themes() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/themes").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["clean", "bold", "luxury"]);
    assert_eq!(json[1]["letter"], "B");
}

#[tokio::test]
async fn test_brand_style_unknown_slug_falls_back() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/brands/astronaut/style").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["matched"], false);
    assert_eq!(json["style"]["slug"], "plumber");
    assert!(json["css_variables"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v["name"] == "--brand-primary"));
}

#[tokio::test]
async fn test_server_starts_with_corrupt_style_file() {
    let (config, temp_dir) = temp_config();
    let styles = temp_dir.path().join("styles");
    std::fs::create_dir_all(&styles).unwrap();
    std::fs::write(styles.join("oops.json"), "{ not json").unwrap();

    let state = AppState::with_analyzer(config, stub_analyzer(None, "{}")).unwrap();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/brands/oops/style").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["matched"], false);
}

#[tokio::test]
async fn test_brand_style_from_data_dir() {
    let (config, temp_dir) = temp_config();
    write_json(
        &temp_dir.path().join("styles"),
        "chimney-sweep.json",
        &json!({
            "extends": "roofer",
            "slug": "chimney-sweep",
            "name": "Chimney Sweep",
            "color_palette": {"primary": "#1F2937"}
        }),
    );
    let state = AppState::with_analyzer(config, stub_analyzer(None, "{}")).unwrap();
    let app = create_router(state);

    let (_, json) = get_json(&app, "/api/brands/chimney-sweep/style").await;

    assert_eq!(json["matched"], true);
    assert_eq!(json["style"]["name"], "Chimney Sweep");
    assert_eq!(json["style"]["color_palette"]["primary"], "#1F2937");
}

#[tokio::test]
async fn test_preview_html() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, content_type, body) =
        get_raw(&app, "/api/trades/electrician/preview/bold?viewport=mobile").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("--brand-primary"));
}

#[tokio::test]
async fn test_preview_json() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) =
        get_json(&app, "/api/trades/painter/preview/C?viewport=tablet&format=json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["theme"], "luxury");
    assert_eq!(json["viewport"], "tablet");
    assert_eq!(json["slug"], "painter");
    assert!(!json["sections"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_preview_not_found() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, _) = get_json(&app, "/api/trades/astronaut/preview/clean").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = get_json(&app, "/api/trades/plumber/preview/neon").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["message"].as_str().unwrap().contains("neon"));
}

#[tokio::test]
async fn test_preview_bad_viewport() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, _) = get_json(&app, "/api/trades/plumber/preview/clean?viewport=watch").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_zip() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, content_type, body) = get_raw(&app, "/api/trades/roofer/export").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/zip"));

    let archive = zip::ZipArchive::new(Cursor::new(body)).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    for expected in ["clean.html", "bold.html", "luxury.html", "style.json", "content.json", "manifest.json"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[tokio::test]
async fn test_export_not_found() {
    let (state, _temp_dir) = create_test_state();
    let app = create_router(state);

    let (status, json) = get_json(&app, "/api/trades/astronaut/export").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["message"].is_string());
}
