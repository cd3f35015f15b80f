// ABOUTME: Route module organization for the tracker HTTP endpoints
// ABOUTME: One module per domain, each exposing a routes(resources) constructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes by domain
//!
//! Handlers are thin: they authenticate, parse form or JSON input into typed values, call
//! storage or the intelligence crate, and shape the response.

/// Registration, login, and logout
pub mod auth;
/// FAQ chat and search
pub mod chat;
/// Aggregated per-user overview
pub mod dashboard;
/// Form field parsing helpers
pub mod forms;
/// Liveness and readiness
pub mod health;
/// Calorie log
pub mod nutrition;
/// Goal plan generator
pub mod plan;
/// Weight log, charts, and predictions
pub mod weight;
/// Workout log and exercise suggestions
pub mod workouts;

pub use auth::{AuthRoutes, AuthService};
pub use chat::ChatRoutes;
pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;
pub use nutrition::NutritionRoutes;
pub use plan::PlanRoutes;
pub use weight::WeightRoutes;
pub use workouts::WorkoutRoutes;
