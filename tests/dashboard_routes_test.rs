// ABOUTME: Integration tests for the dashboard aggregate
// ABOUTME: Checks entry positions, weight changes, statistics, today's calories and recent workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{add_weight, create_test_app, login_user};
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_empty_dashboard() {
    let app = create_test_app().await.unwrap();
    let cookie = login_user(&app, "alice").await;

    let body: Value = AxumTestRequest::get("/dashboard")
        .cookie(Some(&cookie))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["weight_entries"].as_array().unwrap().is_empty());
    assert_eq!(body["statistics"]["count"], 0);
    assert_eq!(body["calories_today"]["total_calories"], 0);
    assert!(body["recent_workouts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_aggregates_logs() {
    let app = create_test_app().await.unwrap();
    let cookie = login_user(&app, "alice").await;
    add_weight(&app, &cookie, "2024-01-01", "80").await;
    add_weight(&app, &cookie, "2024-01-08", "79").await;
    add_weight(&app, &cookie, "2024-01-15", "78.5").await;

    AxumTestRequest::post("/food_entries")
        .cookie(Some(&cookie))
        .form(&[("name", "Porridge"), ("calories", "400")])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);

    for day in 1..=6 {
        let date = format!("2024-03-0{day}");
        AxumTestRequest::post("/workouts")
            .cookie(Some(&cookie))
            .form(&[
                ("date", date.as_str()),
                ("workoutType", "cardio"),
                ("duration", "30"),
                ("calories", "250"),
            ])
            .send(app.app())
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    let body: Value = AxumTestRequest::get("/dashboard")
        .cookie(Some(&cookie))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    let entries = body["weight_entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2]["index"], 2);
    assert_eq!(entries[0]["change"], 0.0);
    assert!((entries[1]["change"].as_f64().unwrap() + 1.0).abs() < 1e-9);

    assert_eq!(body["statistics"]["count"], 3);
    assert_eq!(body["statistics"]["latest_weight"], 78.5);
    assert!((body["statistics"]["total_change"].as_f64().unwrap() + 1.5).abs() < 1e-9);

    assert_eq!(body["calories_today"]["entry_count"], 1);
    assert_eq!(body["calories_today"]["total_calories"], 400);

    let workouts = body["recent_workouts"].as_array().unwrap();
    assert_eq!(workouts.len(), 5);
    assert_eq!(workouts[0]["date"], "2024-03-06");
}

#[tokio::test]
async fn test_dashboard_requires_session() {
    let app = create_test_app().await.unwrap();

    let body: Value = AxumTestRequest::get("/dashboard")
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}
