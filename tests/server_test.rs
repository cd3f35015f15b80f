// ABOUTME: Integration tests for the assembled router and its tower layers
// ABOUTME: Health and readiness probes, JSON 404 fallback, request ids and the body size limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::create_test_app;
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app().await.unwrap();

    let body: Value = AxumTestRequest::get("/health")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "pierre-tracker");
}

#[tokio::test]
async fn test_ready_endpoint_reports_database_and_faq() {
    let app = create_test_app().await.unwrap();

    let body: Value = AxumTestRequest::get("/ready")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "ok");
    assert_eq!(
        body["faq_entries"],
        app.resources.faq_matcher.entries().len()
    );
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = create_test_app().await.unwrap();

    let body: Value = AxumTestRequest::get("/no/such/page")
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let app = create_test_app().await.unwrap();

    let response = AxumTestRequest::get("/health").send(app.app()).await;
    let generated = response.header("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "trace-me-123")
        .send(app.app())
        .await;
    assert_eq!(response.header("x-request-id"), Some("trace-me-123"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = create_test_app().await.unwrap();
    let limit = app.resources.config.http.max_request_body_bytes;
    let query = "a".repeat(limit + 1);
    let body = serde_json::json!({ "query": query }).to_string();

    AxumTestRequest::post("/chat")
        .header("content-length", &body.len().to_string())
        .raw_body("application/json", &body)
        .send(app.app())
        .await
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}
