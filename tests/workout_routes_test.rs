// ABOUTME: Integration tests for the workout log and exercise suggestion routes
// ABOUTME: Covers ordering, totals, deletion, validation and per-type suggestions
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
use pierre_tracker::routes::workouts::WorkoutListResponse;
use serde_json::Value;
use tracker_core::models::WorkoutType;

async fn add_workout(app: &TestApp, cookie: &str, date: &str, kind: &str, minutes: &str) {
    let response = AxumTestRequest::post("/workouts")
        .cookie(Some(cookie))
        .form(&[
            ("date", date),
            ("workoutType", kind),
            ("duration", minutes),
            ("calories", "300"),
            ("notes", "felt good"),
        ])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/workouts"));
}

async fn list(app: &TestApp, cookie: &str) -> WorkoutListResponse {
    AxumTestRequest::get("/workouts")
        .cookie(Some(cookie))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json()
}

#[tokio::test]
async fn test_workouts_listed_newest_first_with_totals() {
    let app = create_test_app().await.unwrap();
    let cookie = login_user(&app, "alice").await;
    add_workout(&app, &cookie, "2024-02-01", "cardio", "30").await;
    add_workout(&app, &cookie, "2024-02-03", "strength", "45").await;
    add_workout(&app, &cookie, "2024-02-02", "hiit", "20").await;

    let response = list(&app, &cookie).await;
    let types: Vec<WorkoutType> = response.workouts.iter().map(|w| w.workout_type).collect();
    assert_eq!(
        types,
        vec![WorkoutType::Strength, WorkoutType::Hiit, WorkoutType::Cardio]
    );
    assert_eq!(response.total_minutes, 95);
    assert_eq!(response.total_calories_burned, 900);
    assert_eq!(response.workouts[0].notes.as_deref(), Some("felt good"));
}

#[tokio::test]
async fn test_delete_workout() {
    let app = create_test_app().await.unwrap();
    let cookie = login_user(&app, "alice").await;
    add_workout(&app, &cookie, "2024-02-01", "flexibility", "15").await;
    let id = list(&app, &cookie).await.workouts[0].id.to_string();

    AxumTestRequest::post("/workouts/delete")
        .cookie(Some(&cookie))
        .form(&[("id", id.as_str())])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    assert!(list(&app, &cookie).await.workouts.is_empty());
}

#[tokio::test]
async fn test_workout_validation() {
    let app = create_test_app().await.unwrap();
    let cookie = login_user(&app, "alice").await;

    for (kind, minutes, field) in [
        ("swimming", "30", "workoutType"),
        ("cardio", "0", "duration"),
        ("cardio", "1441", "duration"),
    ] {
        let body: Value = AxumTestRequest::post("/workouts")
            .cookie(Some(&cookie))
            .form(&[
                ("date", "2024-02-01"),
                ("workoutType", kind),
                ("duration", minutes),
                ("calories", "100"),
            ])
            .send(app.app())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_eq!(body["error"]["details"]["field"], field);
    }
}

#[tokio::test]
async fn test_suggestions_by_type() {
    let app = create_test_app().await.unwrap();

    let body: Value = AxumTestRequest::get("/workouts/suggestions/strength")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["workout_type"], "strength");
    assert!(!body["suggestions"].as_array().unwrap().is_empty());
    assert!(body["suggestions"][0]["name"].is_string());

    AxumTestRequest::get("/workouts/suggestions/juggling")
        .send(app.app())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
