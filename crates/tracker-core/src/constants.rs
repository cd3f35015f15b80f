// ABOUTME: Domain constants shared by the server and the intelligence crate
// ABOUTME: Forecast limits, model hyperparameters, validation bounds, and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Service identity used in logs and token audiences
pub mod service_names {
    /// Name of the tracker HTTP service
    pub const PIERRE_TRACKER: &str = "pierre-tracker";
    /// JWT audience for session tokens
    pub const SESSION_AUDIENCE: &str = "pierre-tracker-web";
}

/// Weight-trend forecasting limits
pub mod forecast {
    /// Minimum number of logged weights before a model is fitted
    pub const MIN_TREND_POINTS: usize = 2;
    /// Days projected by the graph and trend endpoints
    pub const DEFAULT_FORECAST_DAYS: u32 = 10;
    /// Upper bound accepted by the variable-horizon endpoint
    pub const MAX_FORECAST_DAYS: u32 = 365;
}

/// Fixed hyperparameters for the RBF support-vector regressor
pub mod trend_model {
    /// Regularization strength (box constraint on dual coefficients)
    pub const REGULARIZATION_C: f64 = 1000.0;
    /// RBF kernel width: `k(a, b) = exp(-gamma * (a - b)^2)`
    pub const KERNEL_GAMMA: f64 = 0.1;
    /// Epsilon-insensitive tolerance band, in kilograms
    pub const EPSILON: f64 = 0.1;
    /// Diagonal ridge added to the kernel matrix; bounds its condition number on daily logs
    pub const KERNEL_RIDGE: f64 = 0.01;
    /// Kernel values below this are treated as zero when updating neighbours
    pub const KERNEL_CUTOFF: f64 = 1e-12;
    /// Stop coordinate descent once the largest optimality violation drops below this, in kilograms
    pub const SOLVER_TOLERANCE: f64 = 1e-3;
    /// Hard cap on coordinate-descent sweeps
    pub const SOLVER_MAX_SWEEPS: usize = 10_000;
}

/// FAQ matcher settings
pub mod faq {
    /// Lowest similarity ever accepted, regardless of the per-query mean
    pub const SIMILARITY_FLOOR: f64 = 0.1;
    /// Answer returned when no corpus question is similar enough
    pub const FALLBACK_ANSWER: &str =
        "I'm sorry, I don't have an answer for that. Try rephrasing your question.";
}

/// Validation bounds for user input
pub mod limits {
    /// Heaviest weight accepted for a log entry or plan, in kilograms
    pub const MAX_WEIGHT_KG: f64 = 500.0;
    /// Shortest accepted height, in centimeters
    pub const MIN_HEIGHT_CM: f64 = 50.0;
    /// Tallest accepted height, in centimeters
    pub const MAX_HEIGHT_CM: f64 = 300.0;
    /// Youngest age the BMR formula is validated for
    pub const MIN_AGE_YEARS: u32 = 10;
    /// Oldest accepted age
    pub const MAX_AGE_YEARS: u32 = 120;
    /// Largest calorie count accepted for a single food or workout entry
    pub const MAX_ENTRY_CALORIES: u32 = 10_000;
    /// Longest accepted workout, in minutes
    pub const MAX_WORKOUT_MINUTES: u32 = 1_440;
    /// Minimum password length at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Username length bounds
    pub const MIN_USERNAME_LENGTH: usize = 3;
    /// Username length bounds
    pub const MAX_USERNAME_LENGTH: usize = 32;
    /// Session lifetime when not configured
    pub const DEFAULT_SESSION_HOURS: i64 = 24;
}

/// User-facing messages
pub mod messages {
    /// Plain-text and JSON signal for the graph and prediction routes
    pub const INSUFFICIENT_DATA: &str =
        "Not enough data to generate a prediction. Log at least 2 weight entries.";
    /// Registration conflict on username
    pub const USERNAME_TAKEN: &str = "Username already exists";
    /// Registration conflict on email
    pub const EMAIL_TAKEN: &str = "Email address is already registered";
    /// Login failure (never says which half was wrong)
    pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
}

/// Date formats accepted from forms
pub mod formats {
    /// ISO calendar date as sent by `<input type="date">`
    pub const FORM_DATE: &str = "%Y-%m-%d";
}
