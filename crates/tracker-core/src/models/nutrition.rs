// ABOUTME: Calorie log models
// ABOUTME: FoodEntry as stored per user and the daily intake summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One food item the user logged
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodEntry {
    /// Row identifier
    pub id: i64,
    /// Owner of the entry
    pub user_id: Uuid,
    /// Food name as typed by the user
    pub name: String,
    /// Calories consumed
    pub calories: u32,
    /// When the food was logged
    pub consumed_at: DateTime<Utc>,
}

/// Entries for one calendar day plus their calorie total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyIntake {
    /// Day summarized (UTC)
    pub date: NaiveDate,
    /// Entries consumed on that day, oldest first
    pub entries: Vec<FoodEntry>,
    /// Sum of `calories` over `entries`
    pub total_calories: u64,
}

impl DailyIntake {
    /// Summarize the entries for `date`
    #[must_use]
    pub fn new(date: NaiveDate, entries: Vec<FoodEntry>) -> Self {
        let total_calories = entries.iter().map(|e| u64::from(e.calories)).sum();
        Self {
            date,
            entries,
            total_calories,
        }
    }
}
