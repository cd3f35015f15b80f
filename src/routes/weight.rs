// ABOUTME: Weight log routes plus the chart and prediction endpoints built on it
// ABOUTME: Add and delete entries, render the trend chart, and forecast future weight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Weight Routes
//!
//! Every handler is scoped to the authenticated user's log. The trend model is refitted from
//! that log on each prediction or chart request, on a blocking thread. With fewer than two
//! entries the prediction endpoints answer `200` with an explanatory message instead of failing.

use crate::charts::render_weight_chart;
use crate::constants::forecast::DEFAULT_FORECAST_DAYS;
use crate::constants::limits::MAX_WEIGHT_KG;
use crate::constants::redirects;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::routes::forms;
use axum::extract::{Form, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracker_intelligence::{predict_future, predict_trend, TrendError, TrendPredictor};

/// Form for POST /add_entry
#[derive(Debug, Default, Deserialize)]
pub struct AddEntryForm {
    /// Weight in kilograms
    pub weight: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Form for POST /delete_entry
#[derive(Debug, Default, Deserialize)]
pub struct DeleteEntryForm {
    /// Zero-based position in the log
    pub index: Option<String>,
}

/// Body of GET /predict_future/{days}
#[derive(Debug, Serialize, Deserialize)]
pub struct FuturePredictionResponse {
    /// One forecast weight per day after the latest logged date
    pub predictions: Vec<f64>,
}

/// Body returned instead of a prediction when the log is too short
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionUnavailable {
    /// Explanation for the user
    pub error: String,
}

/// Weight routes
pub struct WeightRoutes;

impl WeightRoutes {
    /// Create all weight routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/add_entry", post(Self::handle_add_entry))
            .route("/delete_entry", post(Self::handle_delete_entry))
            .route("/generate_graph", get(Self::handle_generate_graph))
            .route("/predict_future/:days", get(Self::handle_predict_future))
            .route("/predict_trend", get(Self::handle_predict_trend))
            .with_state(resources)
    }

    /// Handle POST /add_entry
    async fn handle_add_entry(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Form(form): Form<AddEntryForm>,
    ) -> AppResult<Response> {
        let auth = resources.authenticate(&headers).await?;
        let weight = forms::positive_number(form.weight.as_deref(), "weight", MAX_WEIGHT_KG)?;
        let date = forms::date(form.date.as_deref(), "date")?;

        resources
            .database
            .add_weight_entry(auth.user_id, date, weight)
            .await?;
        AppLogger::log_entry_change(auth.user_id, "weight", "add");
        Ok(Redirect::to(redirects::DASHBOARD).into_response())
    }

    /// Handle POST /delete_entry; an out-of-range index changes nothing
    async fn handle_delete_entry(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Form(form): Form<DeleteEntryForm>,
    ) -> AppResult<Response> {
        let auth = resources.authenticate(&headers).await?;
        let index: i64 = forms::parse_required(form.index.as_deref(), "index")?;

        let deleted = resources
            .database
            .delete_weight_entry_at(auth.user_id, index)
            .await?;
        if deleted {
            AppLogger::log_entry_change(auth.user_id, "weight", "delete");
        } else {
            tracing::debug!(user_id = %auth.user_id, index, "Delete index out of range; ignored");
        }
        Ok(Redirect::to(redirects::DASHBOARD).into_response())
    }

    /// Handle GET /generate_graph
    async fn handle_generate_graph(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Response> {
        let auth = resources.authenticate(&headers).await?;
        let samples = resources.database.weight_samples(auth.user_id).await?;

        let points = samples.len();
        let title = format!("Weight trend for {}", auth.username);

        let started = Instant::now();
        let rendered = run_model(move || {
            TrendPredictor::fit(&samples).map(|model| {
                render_weight_chart(&title, &samples, &model, i64::from(DEFAULT_FORECAST_DAYS))
            })
        })
        .await?;
        let svg = match rendered {
            Ok(svg) => svg?,
            Err(e) if e.is_insufficient_data() => {
                return Ok((
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    e.user_message(),
                )
                    .into_response());
            }
            Err(e) => return Err(e.into()),
        };
        AppLogger::log_prediction(auth.user_id, "chart", points, started.elapsed());

        resources.charts.write_user_chart(auth.user_id, &svg).await?;
        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "image/svg+xml"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            svg,
        )
            .into_response())
    }

    /// Handle GET /predict_future/{days}
    async fn handle_predict_future(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(days): Path<String>,
    ) -> AppResult<Response> {
        let auth = resources.authenticate(&headers).await?;
        let days: i64 = days
            .trim()
            .parse()
            .map_err(|_| AppError::invalid_format("days", format!("'{days}' is not a whole number of days")))?;
        let samples = resources.database.weight_samples(auth.user_id).await?;

        let points = samples.len();

        let started = Instant::now();
        match run_model(move || predict_future(&samples, days)).await? {
            Ok(predictions) => {
                AppLogger::log_prediction(auth.user_id, "future", points, started.elapsed());
                Ok(Json(FuturePredictionResponse { predictions }).into_response())
            }
            Err(e) => Self::unavailable_or_error(e),
        }
    }

    /// Handle GET /predict_trend
    async fn handle_predict_trend(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Response> {
        let auth = resources.authenticate(&headers).await?;
        let samples = resources.database.weight_samples(auth.user_id).await?;

        let points = samples.len();

        let started = Instant::now();
        match run_model(move || predict_trend(&samples)).await? {
            Ok(prediction) => {
                AppLogger::log_prediction(auth.user_id, "trend", points, started.elapsed());
                Ok(Json(prediction).into_response())
            }
            Err(e) => Self::unavailable_or_error(e),
        }
    }

    fn unavailable_or_error(error: TrendError) -> AppResult<Response> {
        if error.is_insufficient_data() {
            Ok((
                StatusCode::OK,
                Json(PredictionUnavailable {
                    error: error.user_message(),
                }),
            )
                .into_response())
        } else {
            Err(error.into())
        }
    }
}

/// Run a trend-model computation on the blocking pool
async fn run_model<T, F>(task: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::internal(format!("Trend model task failed: {e}")))
}
