// ABOUTME: Workout log routes and exercise suggestions
// ABOUTME: List workouts newest first, add and delete them, and suggest exercises per workout type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits::{MAX_ENTRY_CALORIES, MAX_WORKOUT_MINUTES};
use crate::constants::redirects;
use crate::database::NewWorkout;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::routes::forms;
use axum::extract::{Form, Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracker_core::models::{WorkoutEntry, WorkoutType};
use tracker_intelligence::exercise_catalog::{suggestions, ExerciseSuggestion};

/// Form for POST /workouts
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutForm {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// cardio, strength, flexibility, or hiit
    pub workout_type: Option<String>,
    /// Minutes
    pub duration: Option<String>,
    /// Calories burned
    pub calories: Option<String>,
    /// Free text
    pub notes: Option<String>,
}

impl WorkoutForm {
    /// Validate into a storable workout
    pub fn to_new_workout(&self) -> AppResult<NewWorkout> {
        let workout_type = forms::required(self.workout_type.as_deref(), "workoutType")?
            .parse::<WorkoutType>()
            .map_err(|e| AppError::invalid_format("workoutType", e.to_string()))?;
        Ok(NewWorkout {
            date: forms::date(self.date.as_deref(), "date")?,
            workout_type,
            duration_minutes: forms::bounded_u32(
                self.duration.as_deref(),
                "duration",
                1,
                MAX_WORKOUT_MINUTES,
            )?,
            calories_burned: forms::bounded_u32(
                self.calories.as_deref(),
                "calories",
                0,
                MAX_ENTRY_CALORIES,
            )?,
            notes: forms::optional(self.notes.as_deref()),
        })
    }
}

/// Form for POST /workouts/delete
#[derive(Debug, Default, Deserialize)]
pub struct DeleteWorkoutForm {
    /// Workout id
    pub id: Option<String>,
}

/// Body of GET /workouts
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutListResponse {
    /// Workouts, newest first
    pub workouts: Vec<WorkoutEntry>,
    /// Sum of minutes over `workouts`
    pub total_minutes: u64,
    /// Sum of calories over `workouts`
    pub total_calories_burned: u64,
}

/// Body of GET /workouts/suggestions/{type}
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    /// Workout type the suggestions are for
    pub workout_type: WorkoutType,
    /// Exercises
    pub suggestions: &'static [ExerciseSuggestion],
}

/// Workout log routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workouts", get(Self::handle_list).post(Self::handle_add))
            .route("/workouts/delete", post(Self::handle_delete))
            .route(
                "/workouts/suggestions/:workout_type",
                get(Self::handle_suggestions),
            )
            .with_state(resources)
    }

    /// Handle GET /workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<WorkoutListResponse>> {
        let auth = resources.authenticate(&headers).await?;
        let workouts = resources.database.list_workouts(auth.user_id, None).await?;
        Ok(Json(WorkoutListResponse {
            total_minutes: workouts.iter().map(|w| u64::from(w.duration_minutes)).sum(),
            total_calories_burned: workouts.iter().map(|w| u64::from(w.calories_burned)).sum(),
            workouts,
        }))
    }

    /// Handle POST /workouts
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Form(form): Form<WorkoutForm>,
    ) -> AppResult<Response> {
        let auth = resources.authenticate(&headers).await?;
        let workout = form.to_new_workout()?;
        resources.database.add_workout(auth.user_id, workout).await?;
        AppLogger::log_entry_change(auth.user_id, "workout", "add");
        Ok(Redirect::to(redirects::WORKOUTS).into_response())
    }

    /// Handle POST /workouts/delete; unknown ids change nothing
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Form(form): Form<DeleteWorkoutForm>,
    ) -> AppResult<Response> {
        let auth = resources.authenticate(&headers).await?;
        let id: i64 = forms::parse_required(form.id.as_deref(), "id")?;
        if resources.database.delete_workout(auth.user_id, id).await? {
            AppLogger::log_entry_change(auth.user_id, "workout", "delete");
        }
        Ok(Redirect::to(redirects::WORKOUTS).into_response())
    }

    /// Handle GET /workouts/suggestions/{type}
    async fn handle_suggestions(
        Path(workout_type): Path<String>,
    ) -> AppResult<Json<SuggestionsResponse>> {
        let workout_type: WorkoutType = workout_type
            .parse()
            .map_err(|e: tracker_core::models::UnknownWorkoutType| {
                AppError::invalid_format("workoutType", e.to_string())
            })?;
        Ok(Json(SuggestionsResponse {
            workout_type,
            suggestions: suggestions(workout_type),
        }))
    }
}
