// ABOUTME: Goal plan route
// ABOUTME: Parses the plan form and returns BMR, calorie target, macros, and workout guidance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use crate::routes::forms;
use axum::extract::Form;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracker_intelligence::{generate_plan, Plan, PlanRequest};

/// Form for POST /generate_plan; names match the front end's camelCase fields
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanForm {
    /// Current weight in kg
    pub current_weight: Option<String>,
    /// Target weight in kg
    pub target_weight: Option<String>,
    /// Weeks to reach the target
    pub timeframe: Option<String>,
    /// sedentary, light, moderate, very, or extra
    pub activity_level: Option<String>,
    /// cut, bulk, or maintain
    pub nutrition_goals: Option<String>,
    /// Height in cm
    pub height: Option<String>,
    /// Age in years
    pub age: Option<String>,
}

impl PlanForm {
    /// Parse the raw fields; range checks happen in the generator
    pub fn to_request(&self) -> AppResult<PlanRequest> {
        Ok(PlanRequest {
            current_weight: forms::parse_required(self.current_weight.as_deref(), "currentWeight")?,
            target_weight: forms::parse_required(self.target_weight.as_deref(), "targetWeight")?,
            timeframe_weeks: forms::parse_required(self.timeframe.as_deref(), "timeframe")?,
            activity_level: forms::optional(self.activity_level.as_deref()).unwrap_or_default(),
            nutrition_goal: forms::required(self.nutrition_goals.as_deref(), "nutritionGoals")?
                .to_owned(),
            height_cm: forms::parse_required(self.height.as_deref(), "height")?,
            age: forms::parse_required(self.age.as_deref(), "age")?,
        })
    }
}

/// Plan routes
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create the plan route; it needs no shared state
    pub fn routes() -> Router {
        Router::new().route("/generate_plan", post(Self::handle_generate_plan))
    }

    /// Handle POST /generate_plan
    async fn handle_generate_plan(Form(form): Form<PlanForm>) -> AppResult<Json<Plan>> {
        let request = form.to_request()?;
        let plan = generate_plan(&request)?;
        tracing::debug!(
            goal = ?plan.nutrition_goal,
            activity = ?plan.activity_level,
            calorie_target = plan.calorie_target,
            "Generated plan"
        );
        Ok(Json(plan))
    }
}
