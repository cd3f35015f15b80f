// ABOUTME: Weight-trend predictor combining a least-squares trend with RBF kernel regression
// ABOUTME: Produces the fitted curve over logged dates and day-by-day forecasts beyond the last log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: day offsets are far below 2^52

//! # Trend Predictor
//!
//! Each date becomes an integer day offset from the earliest logged date; weight is the target.
//! A straight trend line is fitted first and an RBF support-vector regressor models what the
//! line misses. Close to the logged dates the curve follows the data within the tolerance
//! band; further out it relaxes back onto the trend line.
//!
//! The model is refitted on every call. Fitting is CPU-bound and grows with the number of
//! logged points, so async callers run it on a blocking thread.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracker_core::constants::forecast::{DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS, MIN_TREND_POINTS};
use tracker_core::constants::messages::INSUFFICIENT_DATA;
use tracker_core::errors::AppError;
use tracker_core::models::WeightSample;

use crate::kernel_regression::{RbfSvr, SvrParams};
use crate::regression::LinearFit;

/// Reasons a prediction could not be produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    /// Fewer samples than the model needs
    #[error("insufficient data: need at least {required} weight entries, have {actual}")]
    InsufficientData {
        /// Minimum number of samples
        required: usize,
        /// Samples supplied
        actual: usize,
    },
    /// Forecast horizon outside `0..=max`
    #[error("forecast horizon must be between 0 and {max} days, got {requested}")]
    InvalidHorizon {
        /// Days requested
        requested: i64,
        /// Largest accepted horizon
        max: u32,
    },
    /// A logged weight is non-finite or not positive
    #[error("weight on {date} is not a positive finite number")]
    InvalidWeight {
        /// Date of the offending sample
        date: NaiveDate,
    },
}

impl TrendError {
    /// Whether this is the user-facing "log more data" condition
    #[must_use]
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Message shown to users for this error
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientData { .. } => INSUFFICIENT_DATA.to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<TrendError> for AppError {
    fn from(error: TrendError) -> Self {
        match error {
            TrendError::InvalidHorizon { .. } => Self::out_of_range("days", error.to_string()),
            TrendError::InsufficientData { .. } | TrendError::InvalidWeight { .. } => {
                Self::invalid_input(error.to_string())
            }
        }
    }
}

/// A dated weight value produced by the model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictedPoint {
    /// Calendar date
    pub date: NaiveDate,
    /// Model output in kilograms
    pub weight: f64,
}

/// Fitted curve plus forecast, ready to plot or return as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPrediction {
    /// Model value at every logged date, in input order
    pub fitted: Vec<PredictedPoint>,
    /// Day-by-day forecast starting the day after the latest logged date
    pub future: Vec<PredictedPoint>,
    /// Long-range trend in kilograms per day
    pub trend_kg_per_day: f64,
}

/// A model fitted to one weight log
#[derive(Debug, Clone)]
pub struct TrendPredictor {
    origin: NaiveDate,
    offsets: Vec<f64>,
    dates: Vec<NaiveDate>,
    last_offset: i64,
    trend: LinearFit,
    residual_model: RbfSvr,
}

impl TrendPredictor {
    /// Fit the model with the default hyperparameters
    pub fn fit(samples: &[WeightSample]) -> Result<Self, TrendError> {
        Self::fit_with(samples, SvrParams::default())
    }

    /// Fit the model with explicit kernel hyperparameters
    pub fn fit_with(samples: &[WeightSample], params: SvrParams) -> Result<Self, TrendError> {
        if samples.len() < MIN_TREND_POINTS {
            return Err(TrendError::InsufficientData {
                required: MIN_TREND_POINTS,
                actual: samples.len(),
            });
        }
        if let Some(bad) = samples
            .iter()
            .find(|s| !s.weight.is_finite() || s.weight <= 0.0)
        {
            return Err(TrendError::InvalidWeight { date: bad.date });
        }

        // Non-empty: checked against MIN_TREND_POINTS above
        let origin = samples
            .iter()
            .map(|s| s.date)
            .min()
            .ok_or(TrendError::InsufficientData {
                required: MIN_TREND_POINTS,
                actual: 0,
            })?;

        let day_offsets: Vec<i64> = samples
            .iter()
            .map(|s| (s.date - origin).num_days())
            .collect();
        let last_offset = day_offsets.iter().copied().max().unwrap_or(0);
        let offsets: Vec<f64> = day_offsets.iter().map(|d| *d as f64).collect();
        let weights: Vec<f64> = samples.iter().map(|s| s.weight).collect();

        let trend = LinearFit::fit(&offsets, &weights).ok_or(TrendError::InsufficientData {
            required: MIN_TREND_POINTS,
            actual: samples.len(),
        })?;
        let residuals: Vec<f64> = offsets
            .iter()
            .zip(&weights)
            .map(|(x, y)| y - trend.at(*x))
            .collect();
        let residual_model = RbfSvr::fit(&offsets, &residuals, params);

        tracing::debug!(
            points = samples.len(),
            span_days = last_offset,
            slope = trend.slope,
            support_vectors = residual_model.support_vector_count(),
            sweeps = residual_model.sweeps(),
            "Fitted weight trend model"
        );

        Ok(Self {
            origin,
            offsets,
            dates: samples.iter().map(|s| s.date).collect(),
            last_offset,
            trend,
            residual_model,
        })
    }

    /// Model value at a day offset from the earliest logged date
    #[must_use]
    pub fn predict_offset(&self, offset: f64) -> f64 {
        self.trend.at(offset) + self.residual_model.predict(offset)
    }

    /// Model values at every logged date, in input order
    #[must_use]
    pub fn fitted(&self) -> Vec<PredictedPoint> {
        self.dates
            .iter()
            .zip(&self.offsets)
            .map(|(date, offset)| PredictedPoint {
                date: *date,
                weight: self.predict_offset(*offset),
            })
            .collect()
    }

    /// Forecast values for the `days` days after the latest logged date
    ///
    /// A zero-day horizon yields an empty forecast.
    pub fn forecast(&self, days: i64) -> Result<Vec<f64>, TrendError> {
        let horizon = validate_horizon(days)?;
        Ok((1..=i64::from(horizon))
            .map(|step| self.predict_offset((self.last_offset + step) as f64))
            .collect())
    }

    /// Dated forecast for the `days` days after the latest logged date
    pub fn forecast_points(&self, days: i64) -> Result<Vec<PredictedPoint>, TrendError> {
        let values = self.forecast(days)?;
        Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, weight)| PredictedPoint {
                date: self.date_at(self.last_offset + i as i64 + 1),
                weight,
            })
            .collect())
    }

    /// Long-range slope in kilograms per day
    #[must_use]
    pub const fn trend_kg_per_day(&self) -> f64 {
        self.trend.slope
    }

    /// Earliest logged date (day offset zero)
    #[must_use]
    pub const fn origin(&self) -> NaiveDate {
        self.origin
    }

    fn date_at(&self, offset: i64) -> NaiveDate {
        u64::try_from(offset)
            .ok()
            .and_then(|d| self.origin.checked_add_days(Days::new(d)))
            .unwrap_or(NaiveDate::MAX)
    }
}

fn validate_horizon(days: i64) -> Result<u32, TrendError> {
    u32::try_from(days)
        .ok()
        .filter(|d| *d <= MAX_FORECAST_DAYS)
        .ok_or(TrendError::InvalidHorizon {
            requested: days,
            max: MAX_FORECAST_DAYS,
        })
}

/// Fitted curve plus the default ten-day forecast
pub fn predict_trend(samples: &[WeightSample]) -> Result<TrendPrediction, TrendError> {
    let model = TrendPredictor::fit(samples)?;
    Ok(TrendPrediction {
        fitted: model.fitted(),
        future: model.forecast_points(i64::from(DEFAULT_FORECAST_DAYS))?,
        trend_kg_per_day: model.trend_kg_per_day(),
    })
}

/// Forecast values for an arbitrary horizon
///
/// The sample count is checked before the horizon, so an empty log always reports
/// insufficient data.
pub fn predict_future(samples: &[WeightSample], days: i64) -> Result<Vec<f64>, TrendError> {
    TrendPredictor::fit(samples)?.forecast(days)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(n: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(n))
            .unwrap()
    }

    fn log(points: &[(u64, f64)]) -> Vec<WeightSample> {
        points
            .iter()
            .map(|(d, w)| WeightSample::new(day(*d), *w))
            .collect()
    }

    #[test]
    fn test_insufficient_data_below_two_points() {
        for samples in [vec![], log(&[(0, 80.0)])] {
            let err = predict_future(&samples, 5).unwrap_err();
            assert!(err.is_insufficient_data());
            assert!(predict_trend(&samples).unwrap_err().is_insufficient_data());
        }
    }

    #[test]
    fn test_two_point_extrapolation() {
        let predictions = predict_future(&log(&[(0, 80.0), (5, 79.0)]), 1).unwrap();
        assert_eq!(predictions.len(), 1);
        assert!((predictions[0] - 78.8).abs() < 0.1, "got {}", predictions[0]);
    }

    #[test]
    fn test_default_trend_has_ten_dated_points() {
        let samples = log(&[(0, 80.0), (2, 79.6), (7, 79.1), (9, 78.7)]);
        let prediction = predict_trend(&samples).unwrap();

        assert_eq!(prediction.fitted.len(), 4);
        assert_eq!(prediction.future.len(), 10);
        assert_eq!(prediction.future[0].date, day(10));
        assert_eq!(prediction.future[9].date, day(19));
        assert!(prediction.trend_kg_per_day < 0.0);
    }

    #[test]
    fn test_fitted_curve_follows_data_closer_than_trend_line() {
        let samples = log(&[(0, 80.0), (1, 80.6), (3, 79.4), (4, 80.1), (6, 79.0)]);
        let model = TrendPredictor::fit(&samples).unwrap();
        for (point, sample) in model.fitted().iter().zip(&samples) {
            assert_eq!(point.date, sample.date);
            assert!((point.weight - sample.weight).abs() < 0.4);
        }

        let offsets: Vec<f64> = samples
            .iter()
            .map(|s| (s.date - day(0)).num_days() as f64)
            .collect();
        let weights: Vec<f64> = samples.iter().map(|s| s.weight).collect();
        let line = LinearFit::fit(&offsets, &weights).unwrap();
        let curve_error: f64 = model
            .fitted()
            .iter()
            .zip(&samples)
            .map(|(p, s)| (p.weight - s.weight).abs())
            .sum();
        let line_error: f64 = offsets
            .iter()
            .zip(&weights)
            .map(|(x, y)| (line.at(*x) - y).abs())
            .sum();
        assert!(curve_error < line_error);
    }

    #[test]
    fn test_noisy_daily_log_converges_and_forecasts_near_trend() {
        let points: Vec<(u64, f64)> = (0..100u32)
            .map(|d| {
                let x = f64::from(d);
                (
                    u64::from(d),
                    0.03f64.mul_add(-x, 85.0) + 0.4 * (1.7 * x).sin() + 0.2 * (4.3 * x).cos(),
                )
            })
            .collect();
        let params = SvrParams::default();
        let model = TrendPredictor::fit_with(&log(&points), params).unwrap();

        assert!(model.residual_model.sweeps() < params.max_sweeps);
        let next_day = model.forecast(1).unwrap()[0];
        assert!(
            (next_day - 82.0).abs() < 1.0,
            "first forecast day {next_day} strays from the 82.0 kg trend"
        );
    }

    #[test]
    fn test_unsorted_input_uses_earliest_date_as_origin() {
        let samples = log(&[(5, 79.0), (0, 80.0)]);
        let model = TrendPredictor::fit(&samples).unwrap();
        assert_eq!(model.origin(), day(0));
        let fitted = model.fitted();
        assert_eq!(fitted[0].date, day(5));
        assert!((model.forecast(1).unwrap()[0] - 78.8).abs() < 0.1);
    }

    #[test]
    fn test_duplicate_dates_are_accepted() {
        let samples = log(&[(0, 80.0), (0, 80.4)]);
        let values = predict_future(&samples, 3).unwrap();
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_horizon_bounds() {
        let samples = log(&[(0, 80.0), (5, 79.0)]);
        assert_eq!(predict_future(&samples, 0).unwrap(), Vec::<f64>::new());
        assert!(matches!(
            predict_future(&samples, -3),
            Err(TrendError::InvalidHorizon { requested: -3, .. })
        ));
        assert!(predict_future(&samples, 366).is_err());
        assert_eq!(predict_future(&samples, 365).unwrap().len(), 365);
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let samples = log(&[(0, 80.0), (1, 0.0)]);
        assert_eq!(
            predict_future(&samples, 1),
            Err(TrendError::InvalidWeight { date: day(1) })
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_forecast_has_requested_length_and_is_finite(
            points in prop::collection::vec((0u64..400, 30.0f64..250.0), 2..25),
            days in 0i64..=365,
        ) {
            let samples = log(&points);
            let values = predict_future(&samples, days).unwrap();
            prop_assert_eq!(values.len() as i64, days);
            prop_assert!(values.iter().all(|v| v.is_finite()));
        }
    }
}
