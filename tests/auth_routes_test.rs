// ABOUTME: Integration tests for registration, login, logout and session resolution
// ABOUTME: Covers duplicate accounts, bad credentials, cookie attributes and bearer fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{create_test_app, login_user, register_user, TEST_PASSWORD};
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_register_redirects_to_login() {
    let app = create_test_app().await.unwrap();

    let response = AxumTestRequest::post("/register")
        .form(&[
            ("username", "alice"),
            ("email", "alice@example.com"),
            ("password", TEST_PASSWORD),
        ])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));

    let user = app
        .resources
        .database
        .get_user_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_ne!(user.password_hash, TEST_PASSWORD);
}

#[tokio::test]
async fn test_register_duplicate_username_and_email_conflict() {
    let app = create_test_app().await.unwrap();
    register_user(&app, "alice").await;

    for (username, email) in [
        ("alice", "other@example.com"),
        ("alice2", "alice@example.com"),
    ] {
        let body: Value = AxumTestRequest::post("/register")
            .form(&[
                ("username", username),
                ("email", email),
                ("password", TEST_PASSWORD),
            ])
            .send(app.app())
            .await
            .assert_status(StatusCode::CONFLICT)
            .json();
        assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
    }
    assert_eq!(app.resources.database.get_user_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_validates_fields() {
    let app = create_test_app().await.unwrap();

    for (username, email, password) in [
        ("al", "al@example.com", TEST_PASSWORD),
        ("alice", "not-an-email", TEST_PASSWORD),
        ("alice", "alice@example.com", "short"),
        ("", "alice@example.com", TEST_PASSWORD),
    ] {
        AxumTestRequest::post("/register")
            .form(&[
                ("username", username),
                ("email", email),
                ("password", password),
            ])
            .send(app.app())
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
    assert_eq!(app.resources.database.get_user_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_login_sets_http_only_session_cookie() {
    let app = create_test_app().await.unwrap();
    register_user(&app, "alice").await;

    let response = AxumTestRequest::post("/login")
        .form(&[("username", "alice"), ("password", TEST_PASSWORD)])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);

    assert_eq!(response.location(), Some("/dashboard"));
    let cookie = response.header("set-cookie").unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=86400"));
}

#[tokio::test]
async fn test_login_accepts_email_identifier() {
    let app = create_test_app().await.unwrap();
    register_user(&app, "alice").await;

    let response = AxumTestRequest::post("/login")
        .form(&[("username", "ALICE@example.com"), ("password", TEST_PASSWORD)])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert!(response.cookie_pair().is_some());
}

#[tokio::test]
async fn test_login_with_bad_credentials_is_unauthorized() {
    let app = create_test_app().await.unwrap();
    register_user(&app, "alice").await;

    for (username, password) in [("alice", "wrong-password"), ("nobody", TEST_PASSWORD)] {
        let response = AxumTestRequest::post("/login")
            .form(&[("username", username), ("password", password)])
            .send(app.app())
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.header("set-cookie").is_none());
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "AUTH_INVALID");
        assert_eq!(body["error"]["message"], "Invalid username or password");
    }
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = create_test_app().await.unwrap();
    let cookie = login_user(&app, "alice").await;

    let response = AxumTestRequest::post("/logout")
        .cookie(Some(&cookie))
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
    let cleared = response.header("set-cookie").unwrap();
    assert!(cleared.starts_with("auth_token=;"));
    assert!(cleared.contains("Max-Age=0"));

    AxumTestRequest::get("/logout")
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = create_test_app().await.unwrap();
    register_user(&app, "alice").await;
    let user = app
        .resources
        .database
        .get_user_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    let token = app.resources.auth_manager.generate_token(&user).unwrap();

    let body: Value = AxumTestRequest::get("/dashboard")
        .header("authorization", &format!("Bearer {token}"))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["user"]["username"], "alice");
}

#[tokio::test]
async fn test_stale_cookie_falls_back_to_bearer_token() {
    let app = create_test_app().await.unwrap();
    register_user(&app, "alice").await;
    let user = app
        .resources
        .database
        .get_user_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    let token = app.resources.auth_manager.generate_token(&user).unwrap();

    let body: Value = AxumTestRequest::get("/dashboard")
        .cookie(Some("auth_token=not.a.jwt"))
        .header("authorization", &format!("Bearer {token}"))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["user"]["username"], "alice");

    AxumTestRequest::get("/dashboard")
        .cookie(Some("auth_token=not.a.jwt"))
        .header("authorization", "Bearer also.not.valid")
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_and_expired_sessions_are_rejected() {
    let app = create_test_app().await.unwrap();
    register_user(&app, "alice").await;
    let user = app
        .resources
        .database
        .get_user_by_username("alice")
        .await
        .unwrap()
        .unwrap();

    let body: Value = AxumTestRequest::get("/dashboard")
        .cookie(Some("auth_token=not.a.jwt"))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["error"]["code"], "AUTH_INVALID");

    let expired = app
        .resources
        .auth_manager
        .generate_token_at(&user, Utc::now() - Duration::hours(48))
        .unwrap();
    let body: Value = AxumTestRequest::get("/dashboard")
        .cookie(Some(&format!("auth_token={expired}")))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["error"]["code"], "AUTH_EXPIRED");
}
