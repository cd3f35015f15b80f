// ABOUTME: Core data models for the tracker service
// ABOUTME: Re-exports weight, nutrition, workout, user, and FAQ types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Per-user log records (weight, food, workouts), the account model, and the FAQ corpus
//! entry. Storage lives in the server crate; these types carry no persistence logic.

mod faq;
mod nutrition;
mod user;
mod weight;
mod workout;

pub use faq::FaqEntry;
pub use nutrition::{DailyIntake, FoodEntry};
pub use user::User;
pub use weight::{WeightEntry, WeightSample};
pub use workout::{UnknownWorkoutType, WorkoutEntry, WorkoutType};
