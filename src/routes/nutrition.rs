// ABOUTME: Calorie log routes
// ABOUTME: List today's food entries with their total, add an entry, and delete one by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits::MAX_ENTRY_CALORIES;
use crate::constants::redirects;
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::routes::forms;
use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracker_core::models::DailyIntake;

/// Longest accepted food name
const MAX_FOOD_NAME_LENGTH: usize = 200;

/// Form for POST /food_entries
#[derive(Debug, Default, Deserialize)]
pub struct FoodEntryForm {
    /// Food name
    pub name: Option<String>,
    /// Calories consumed
    pub calories: Option<String>,
}

/// Form for POST /food_entries/delete
#[derive(Debug, Default, Deserialize)]
pub struct DeleteFoodForm {
    /// Entry id
    pub id: Option<String>,
}

/// Calorie log routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all calorie log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/food_entries",
                get(Self::handle_list_today).post(Self::handle_add),
            )
            .route("/food_entries/delete", post(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /food_entries
    async fn handle_list_today(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<DailyIntake>> {
        let auth = resources.authenticate(&headers).await?;
        let today = Utc::now().date_naive();
        let entries = resources
            .database
            .list_food_entries_for_day(auth.user_id, today)
            .await?;
        Ok(Json(DailyIntake::new(today, entries)))
    }

    /// Handle POST /food_entries
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Form(form): Form<FoodEntryForm>,
    ) -> AppResult<Response> {
        let auth = resources.authenticate(&headers).await?;
        let name = forms::required(form.name.as_deref(), "name")?;
        if name.chars().count() > MAX_FOOD_NAME_LENGTH {
            return Err(crate::errors::AppError::out_of_range(
                "name",
                format!("name must be at most {MAX_FOOD_NAME_LENGTH} characters"),
            ));
        }
        let calories =
            forms::bounded_u32(form.calories.as_deref(), "calories", 0, MAX_ENTRY_CALORIES)?;

        resources
            .database
            .add_food_entry(auth.user_id, name, calories)
            .await?;
        AppLogger::log_entry_change(auth.user_id, "food", "add");
        Ok(Redirect::to(redirects::FOOD_ENTRIES).into_response())
    }

    /// Handle POST /food_entries/delete; unknown ids change nothing
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Form(form): Form<DeleteFoodForm>,
    ) -> AppResult<Response> {
        let auth = resources.authenticate(&headers).await?;
        let id: i64 = forms::parse_required(form.id.as_deref(), "id")?;
        if resources.database.delete_food_entry(auth.user_id, id).await? {
            AppLogger::log_entry_change(auth.user_id, "food", "delete");
        }
        Ok(Redirect::to(redirects::FOOD_ENTRIES).into_response())
    }
}
