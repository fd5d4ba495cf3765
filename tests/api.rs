//! HTTP API tests against a server bound to an ephemeral port.

#![cfg(unix)]

mod helpers;

use helpers::{echo_engine, sh_engine, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_analyze_returns_server_computed_verdict() {
    let server = TestServer::start(echo_engine(2)).await;
    let response = reqwest::Client::new()
        .post(server.url("/api/analyze"))
        .json(&json!({ "url": "https://a.test" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["url"], "https://a.test");
    assert_eq!(body["score"], 2);
    assert_eq!(body["verdict"], "LOW RISK");
    assert_eq!(body["color"], "green");
    assert_eq!(body["color_hex"], "#19A00F");
    assert_eq!(body["url_reasons"], json!([]));
}

#[tokio::test]
async fn test_analyze_does_not_write_history() {
    let server = TestServer::start(echo_engine(5)).await;
    let response = reqwest::Client::new()
        .post(server.url("/api/analyze"))
        .json(&json!({ "url": "https://b.test" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["verdict"], "RISKY");
    assert!(server.reports.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_without_url_is_bad_request() {
    let server = TestServer::start(echo_engine(0)).await;
    let client = reqwest::Client::new();

    for body in [json!({}), json!({ "url": "" }), json!({ "url": "   " })] {
        let response = client
            .post(server.url("/api/analyze"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "URL is required");
        assert_eq!(body["kind"], "client_input");
    }
}

#[tokio::test]
async fn test_analyze_with_invalid_json_is_bad_request() {
    let server = TestServer::start(echo_engine(0)).await;
    let response = reqwest::Client::new()
        .post(server.url("/api/analyze"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_engine_failures_are_distinguishable() {
    let cases = [
        ("cat >/dev/null; echo boom >&2", "engine_error", "boom\n"),
        ("cat >/dev/null", "empty_output", ""),
        ("cat >/dev/null; echo nope", "malformed_output", "nope\n"),
    ];
    for (script, kind, detail) in cases {
        let server = TestServer::start(sh_engine(script)).await;
        let response = reqwest::Client::new()
            .post(server.url("/api/analyze"))
            .json(&json!({ "url": "https://a.test" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["kind"], kind);
        assert_eq!(body["detail"], detail, "detail for {}", kind);
        assert!(server.reports.list_all().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_report_lifecycle() {
    let server = TestServer::start(echo_engine(0)).await;
    let client = reqwest::Client::new();

    let created = client
        .post(server.url("/api/reports"))
        .json(&json!({ "url": " https://a.test ", "score": 5, "verdict": "RISKY" }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["url"], "https://a.test");
    assert!(created.get("createdAt").is_some());
    let id = created["id"].as_i64().unwrap();

    let listed: Value = client
        .get(server.url("/api/reports"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let fetched = client
        .get(server.url(&format!("/api/reports/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Value = fetched.json().await.unwrap();
    assert_eq!(fetched["score"], 5);
    assert_eq!(fetched["verdict"], "RISKY");

    let deleted = client
        .delete(server.url(&format!("/api/reports/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    let deleted: Value = deleted.json().await.unwrap();
    assert_eq!(deleted["message"], "Report deleted");

    let gone = client
        .get(server.url(&format!("/api/reports/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let gone: Value = gone.json().await.unwrap();
    assert_eq!(gone["message"], "Report not found");
}

#[tokio::test]
async fn test_create_report_missing_fields() {
    let server = TestServer::start(echo_engine(0)).await;
    let client = reqwest::Client::new();

    for body in [
        json!({ "score": 1, "verdict": "LOW RISK" }),
        json!({ "url": "u", "verdict": "LOW RISK" }),
        json!({ "url": "u", "score": 1 }),
    ] {
        let response = client
            .post(server.url("/api/reports"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Missing required fields");
    }
    assert!(server.reports.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_report_ids_are_not_found() {
    let server = TestServer::start(echo_engine(0)).await;
    let client = reqwest::Client::new();
    for path in ["/api/reports/999", "/api/reports/not-an-id"] {
        let get = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(get.status(), StatusCode::NOT_FOUND);
        let delete = client.delete(server.url(path)).send().await.unwrap();
        assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_analyze_then_remember_via_api() {
    let server = TestServer::start(echo_engine(3)).await;
    let client = reqwest::Client::new();

    let analysis: Value = client
        .post(server.url("/api/analyze"))
        .json(&json!({ "url": "https://e.test" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(analysis["verdict"], "MINIMAL RISK");

    let created = client
        .post(server.url("/api/reports"))
        .json(&json!({
            "url": analysis["url"],
            "score": analysis["score"].to_string(),
            "verdict": analysis["verdict"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["score"], 3);
}
