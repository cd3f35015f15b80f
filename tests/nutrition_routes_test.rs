// ABOUTME: Integration tests for the daily calorie log routes
// ABOUTME: Covers adding, listing, deleting and validating food entries per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_app, login_user, TestApp};
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;
use tracker_core::models::DailyIntake;

async fn add_food(app: &TestApp, cookie: &str, name: &str, calories: &str) {
    let response = AxumTestRequest::post("/food_entries")
        .cookie(Some(cookie))
        .form(&[("name", name), ("calories", calories)])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/food_entries"));
}

async fn today(app: &TestApp, cookie: &str) -> DailyIntake {
    AxumTestRequest::get("/food_entries")
        .cookie(Some(cookie))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json()
}

#[tokio::test]
async fn test_food_entries_total_for_today() {
    let app = create_test_app().await.unwrap();
    let cookie = login_user(&app, "alice").await;
    add_food(&app, &cookie, "Oatmeal", "350").await;
    add_food(&app, &cookie, "Chicken salad", "520").await;

    let intake = today(&app, &cookie).await;
    assert_eq!(intake.entries.len(), 2);
    assert_eq!(intake.total_calories, 870);
    assert_eq!(intake.entries[0].name, "Oatmeal");
}

#[tokio::test]
async fn test_delete_food_entry_is_scoped_to_owner() {
    let app = create_test_app().await.unwrap();
    let alice = login_user(&app, "alice").await;
    let bob = login_user(&app, "bob").await;
    add_food(&app, &alice, "Banana", "105").await;
    let id = today(&app, &alice).await.entries[0].id.to_string();

    AxumTestRequest::post("/food_entries/delete")
        .cookie(Some(&bob))
        .form(&[("id", id.as_str())])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert_eq!(today(&app, &alice).await.entries.len(), 1);

    AxumTestRequest::post("/food_entries/delete")
        .cookie(Some(&alice))
        .form(&[("id", id.as_str())])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert!(today(&app, &alice).await.entries.is_empty());
}

#[tokio::test]
async fn test_food_entry_validation() {
    let app = create_test_app().await.unwrap();
    let cookie = login_user(&app, "alice").await;
    let long_name = "x".repeat(201);

    for (name, calories, field) in [
        ("", "100", "name"),
        ("Toast", "lots", "calories"),
        ("Toast", "10001", "calories"),
        (long_name.as_str(), "100", "name"),
    ] {
        let body: Value = AxumTestRequest::post("/food_entries")
            .cookie(Some(&cookie))
            .form(&[("name", name), ("calories", calories)])
            .send(app.app())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_eq!(body["error"]["details"]["field"], field);
    }
    assert!(today(&app, &cookie).await.entries.is_empty());
}

#[tokio::test]
async fn test_food_entries_require_session() {
    let app = create_test_app().await.unwrap();

    AxumTestRequest::get("/food_entries")
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
