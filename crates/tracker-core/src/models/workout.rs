// ABOUTME: Workout log models
// ABOUTME: WorkoutType enumeration and WorkoutEntry as stored per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of workout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    /// Running, cycling, swimming
    Cardio,
    /// Resistance training
    Strength,
    /// Stretching, yoga, pilates
    Flexibility,
    /// High-intensity interval training
    Hiit,
}

impl WorkoutType {
    /// All workout types in display order
    pub const ALL: [Self; 4] = [Self::Cardio, Self::Strength, Self::Flexibility, Self::Hiit];

    /// Lowercase key used in forms, URLs and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cardio => "cardio",
            Self::Strength => "strength",
            Self::Flexibility => "flexibility",
            Self::Hiit => "hiit",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a workout type key is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown workout type '{0}' (expected cardio, strength, flexibility or hiit)")]
pub struct UnknownWorkoutType(pub String);

impl FromStr for WorkoutType {
    type Err = UnknownWorkoutType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cardio" => Ok(Self::Cardio),
            "strength" => Ok(Self::Strength),
            "flexibility" => Ok(Self::Flexibility),
            "hiit" => Ok(Self::Hiit),
            _ => Err(UnknownWorkoutType(s.to_owned())),
        }
    }
}

/// One completed workout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutEntry {
    /// Row identifier
    pub id: i64,
    /// Owner of the entry
    pub user_id: Uuid,
    /// Day the workout took place
    pub date: NaiveDate,
    /// Kind of workout
    pub workout_type: WorkoutType,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Estimated calories burned
    pub calories_burned: u32,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the entry was recorded
    pub created_at: DateTime<Utc>,
}
