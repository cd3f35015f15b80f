// ABOUTME: Prediction and recommendation algorithms for the tracker service
// ABOUTME: Weight-trend regression, TF-IDF FAQ matching, goal plans, and log statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Tracker Intelligence
//!
//! Pure computation with no I/O, kept in its own crate so the server compiles in parallel.
//!
//! - **`trend_predictor`**: trend line plus RBF support-vector regression over a weight log
//! - **`faq_matcher`**: TF-IDF cosine matching against a frozen FAQ corpus
//! - **`plan_generator`**: BMR-based calorie, pace, and macro plan
//! - **`weight_summary`**: descriptive statistics for the weight log
//! - **`exercise_catalog`**: fixed exercise suggestions per workout type

/// Exercise suggestions per workout type
pub mod exercise_catalog;
/// FAQ matcher
pub mod faq_matcher;
/// Epsilon-SVR with an RBF kernel
pub mod kernel_regression;
/// Goal plan generator
pub mod plan_generator;
/// Least-squares trend line
pub mod regression;
/// TF-IDF vectorizer
pub mod tfidf;
/// Weight-trend predictor
pub mod trend_predictor;
/// Weight log statistics
pub mod weight_summary;

pub use faq_matcher::{FaqError, FaqMatch, FaqMatcher};
pub use plan_generator::{generate_plan, Plan, PlanError, PlanRequest};
pub use trend_predictor::{
    predict_future, predict_trend, PredictedPoint, TrendError, TrendPrediction, TrendPredictor,
};
pub use weight_summary::{entry_changes, summarize, WeightStatistics};
