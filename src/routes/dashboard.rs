// ABOUTME: Dashboard route aggregating the user's logs
// ABOUTME: Weight entries with positions and changes, weight statistics, today's calories, recent workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use crate::resources::ServerResources;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracker_core::models::{WeightEntry, WorkoutEntry};
use tracker_intelligence::{entry_changes, summarize, WeightStatistics};
use uuid::Uuid;

/// Workouts shown on the dashboard
const RECENT_WORKOUTS: u32 = 5;

/// The signed-in user
#[derive(Debug, Serialize)]
pub struct DashboardUser {
    /// User id
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
}

/// A weight entry as listed on the dashboard
#[derive(Debug, Serialize)]
pub struct DashboardWeightEntry {
    /// Position used by POST /delete_entry
    pub index: usize,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Kilograms
    pub weight: f64,
    /// Change versus the previous entry by date
    pub change: f64,
}

/// Today's calorie summary
#[derive(Debug, Serialize)]
pub struct DashboardCalories {
    /// Day summarized
    pub date: NaiveDate,
    /// Entries logged today
    pub entry_count: usize,
    /// Sum of calories today
    pub total_calories: u64,
}

/// Body of GET /dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// The signed-in user
    pub user: DashboardUser,
    /// Weight log in insertion order
    pub weight_entries: Vec<DashboardWeightEntry>,
    /// Weight statistics
    pub statistics: WeightStatistics,
    /// Today's calories
    pub calories_today: DashboardCalories,
    /// Most recent workouts
    pub recent_workouts: Vec<WorkoutEntry>,
}

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create the dashboard route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/dashboard", get(Self::handle_dashboard))
            .with_state(resources)
    }

    /// Handle GET /dashboard
    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<DashboardResponse>> {
        let auth = resources.authenticate(&headers).await?;
        let database = &resources.database;
        let today = Utc::now().date_naive();

        let entries = database.list_weight_entries(auth.user_id).await?;
        let food = database
            .list_food_entries_for_day(auth.user_id, today)
            .await?;
        let recent_workouts = database
            .list_workouts(auth.user_id, Some(RECENT_WORKOUTS))
            .await?;

        let samples: Vec<_> = entries.iter().map(WeightEntry::sample).collect();
        let changes = entry_changes(&samples);
        let weight_entries = entries
            .iter()
            .zip(changes)
            .enumerate()
            .map(|(index, (entry, change))| DashboardWeightEntry {
                index,
                date: entry.date,
                weight: entry.weight,
                change,
            })
            .collect();

        Ok(Json(DashboardResponse {
            user: DashboardUser {
                id: auth.user_id,
                username: auth.username,
                email: auth.email,
            },
            weight_entries,
            statistics: summarize(&samples),
            calories_today: DashboardCalories {
                date: today,
                entry_count: food.len(),
                total_calories: food.iter().map(|f| u64::from(f.calories)).sum(),
            },
            recent_workouts,
        }))
    }
}
