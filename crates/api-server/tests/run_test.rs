//! Integration tests for the campaign run and catalog endpoints.

mod common;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_returns_200_with_status_healthy() {
    let (status, json) = common::get_json(common::build_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["node_id"], "test-node");
}

#[tokio::test]
async fn test_directories_lists_default_catalog() {
    let (status, json) = common::get_json(common::build_test_app(), "/v1/directories").await;

    assert_eq!(status, StatusCode::OK);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), outreach_core::directories::default_directories().len());
    assert!(entries.iter().all(|d| d["id"].is_string() && d["submissionUrl"].is_string()));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, json) =
        common::get_json(common::build_test_app(), "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/v1/run"].is_object());
}

#[tokio::test]
async fn test_missing_target_url_returns_400() {
    let (status, json) = common::post_json(
        common::build_test_app(),
        "/v1/run",
        &json!({"keywords": ["widgets"], "dryRun": true}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_campaign_request");
    assert_eq!(json["message"], "targetUrl is required");
}

#[tokio::test]
async fn test_unknown_tone_returns_400() {
    let (status, json) = common::post_json(
        common::build_test_app(),
        "/v1/run",
        &json!({"targetUrl": "https://acme.io", "tone": "grumpy", "dryRun": true}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("grumpy"));
}

#[tokio::test]
async fn test_dry_run_scenario() {
    let body = json!({
        "targetUrl": "https://acme.io",
        "keywords": ["widgets"],
        "tone": "playful",
        "dryRun": true,
        "directories": [{
            "id": "d1",
            "submissionUrl": "https://d1.test/submit",
            "method": "POST",
            "payloadTemplate": {"url": "{{targetUrl}}", "title": "{{headline}}"},
            "tier": "foundational"
        }]
    });

    let (status, json) = common::post_json(common::build_test_app(), "/v1/run", &body).await;

    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["directoryId"], "d1");
    assert_eq!(results[0]["directoryName"], "d1");
    assert_eq!(results[0]["status"], "success");
    assert_eq!(results[0]["payloadPreview"]["url"], "https://acme.io");
    assert_eq!(results[0]["payloadPreview"]["title"], json["assets"]["headline"]);
    assert!(!json["assets"]["headline"].as_str().unwrap().is_empty());
    assert!(results[0].get("responseSample").is_none());
    assert!(results[0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_dry_run_with_default_catalog_keeps_order() {
    let (status, json) = common::post_json(
        common::build_test_app(),
        "/v1/run",
        &json!({"targetUrl": "https://acme.io", "keywords": "seo, growth", "dryRun": true}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["directoryId"].as_str().unwrap())
        .collect();
    let expected: Vec<String> = outreach_core::directories::default_directories()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, expected);
    assert!(json["results"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["status"] == "success"));
    assert!(json["assets"]["article"].as_str().unwrap().contains("growth"));
}

#[tokio::test]
async fn test_live_run_reports_per_directory_failures_as_data() {
    let echo = Router::new()
        .route("/submit", post(|Json(body): Json<Value>| async move { Json(json!({"ok": true, "got": body})) }));
    let addr = common::spawn(echo).await;

    let body = json!({
        "targetUrl": "https://acme.io",
        "companyName": "Acme",
        "directories": [
            {"id": "live", "submissionUrl": format!("http://{addr}/submit"),
             "payloadTemplate": {"brand": "{{companyName}}"}},
            {"id": "missing", "submissionUrl": format!("http://{addr}/nope"),
             "payloadTemplate": {"brand": "{{companyName}}"}}
        ]
    });

    let (status, json) = common::post_json(common::build_test_app(), "/v1/run", &body).await;

    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["status"], "success");
    assert_eq!(results[0]["responseSample"]["got"]["brand"], "Acme");
    assert_eq!(results[1]["status"], "error");
    assert!(results[1]["message"].as_str().unwrap().contains("HTTP 404"));
}
