// ABOUTME: Parsing helpers for url-encoded form fields
// ABOUTME: Turn optional raw strings into typed values or field-specific 400 errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Forms arrive as `Option<String>` fields so a missing or non-numeric value produces the
//! service's JSON error body instead of the framework's plain-text rejection.

use crate::constants::formats::FORM_DATE;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use std::str::FromStr;

/// Trimmed, non-blank value of `field`
pub fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(field))
}

/// Parse a required field with `FromStr`
pub fn parse_required<T: FromStr>(value: Option<&str>, field: &str) -> AppResult<T> {
    let raw = required(value, field)?;
    raw.parse()
        .map_err(|_| AppError::invalid_format(field, format!("'{raw}' is not a valid {field}")))
}

/// Finite number in `(0, max]`
pub fn positive_number(value: Option<&str>, field: &str, max: f64) -> AppResult<f64> {
    let number: f64 = parse_required(value, field)?;
    if number.is_finite() && number > 0.0 && number <= max {
        Ok(number)
    } else {
        Err(AppError::out_of_range(
            field,
            format!("{field} must be greater than 0 and at most {max}"),
        ))
    }
}

/// Whole number in `[min, max]`
pub fn bounded_u32(value: Option<&str>, field: &str, min: u32, max: u32) -> AppResult<u32> {
    let number: u32 = parse_required(value, field)?;
    if (min..=max).contains(&number) {
        Ok(number)
    } else {
        Err(AppError::out_of_range(
            field,
            format!("{field} must be between {min} and {max}"),
        ))
    }
}

/// `YYYY-MM-DD` date
pub fn date(value: Option<&str>, field: &str) -> AppResult<NaiveDate> {
    let raw = required(value, field)?;
    NaiveDate::parse_from_str(raw, FORM_DATE)
        .map_err(|_| AppError::invalid_format(field, format!("'{raw}' is not a YYYY-MM-DD date")))
}

/// Trimmed value, or `None` when absent or blank
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
