// ABOUTME: Body-weight log models
// ABOUTME: WeightEntry as stored per user and the (date, weight) sample fed to the predictor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged body weight, in the order the user entered it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    /// Row identifier; ascending ids give insertion order
    pub id: i64,
    /// Owner of the entry
    pub user_id: Uuid,
    /// Calendar date the user attached to the measurement
    pub date: NaiveDate,
    /// Weight in kilograms
    pub weight: f64,
    /// When the entry was recorded
    pub created_at: DateTime<Utc>,
}

impl WeightEntry {
    /// Project to the sample used by the trend predictor
    #[must_use]
    pub const fn sample(&self) -> WeightSample {
        WeightSample {
            date: self.date,
            weight: self.weight,
        }
    }
}

/// A `(date, weight)` pair without storage metadata
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightSample {
    /// Measurement date
    pub date: NaiveDate,
    /// Weight in kilograms
    pub weight: f64,
}

impl WeightSample {
    /// Create a sample
    #[must_use]
    pub const fn new(date: NaiveDate, weight: f64) -> Self {
        Self { date, weight }
    }
}
