// ABOUTME: Descriptive statistics over a weight log
// ABOUTME: Average, range, total change, and per-entry change versus the previous dated entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: entry counts are small

use serde::Serialize;
use tracker_core::models::WeightSample;

/// Summary of a weight log; every value is `None` for an empty log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeightStatistics {
    /// Number of entries
    pub count: usize,
    /// Weight on the most recent date (latest insertion wins ties)
    pub latest_weight: Option<f64>,
    /// Arithmetic mean
    pub average_weight: Option<f64>,
    /// Lowest weight
    pub min_weight: Option<f64>,
    /// Highest weight
    pub max_weight: Option<f64>,
    /// Latest minus earliest weight by date; negative means weight was lost
    pub total_change: Option<f64>,
}

/// Compute statistics for `samples` (any order)
#[must_use]
pub fn summarize(samples: &[WeightSample]) -> WeightStatistics {
    if samples.is_empty() {
        return WeightStatistics::default();
    }

    let order = date_order(samples);
    let first = samples[order[0]].weight;
    let latest = samples[order[order.len() - 1]].weight;
    let sum: f64 = samples.iter().map(|s| s.weight).sum();
    let min = samples.iter().map(|s| s.weight).fold(f64::INFINITY, f64::min);
    let max = samples
        .iter()
        .map(|s| s.weight)
        .fold(f64::NEG_INFINITY, f64::max);

    WeightStatistics {
        count: samples.len(),
        latest_weight: Some(latest),
        average_weight: Some(sum / samples.len() as f64),
        min_weight: Some(min),
        max_weight: Some(max),
        total_change: Some(latest - first),
    }
}

/// Change of each entry versus the entry before it in date order, aligned with `samples`
///
/// The earliest entry has a change of zero.
#[must_use]
pub fn entry_changes(samples: &[WeightSample]) -> Vec<f64> {
    let mut changes = vec![0.0; samples.len()];
    let order = date_order(samples);
    for pair in order.windows(2) {
        changes[pair[1]] = samples[pair[1]].weight - samples[pair[0]].weight;
    }
    changes
}

/// Input indices sorted by date; insertion order breaks ties
fn date_order(samples: &[WeightSample]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..samples.len()).collect();
    order.sort_by_key(|&i| samples[i].date);
    order
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(day: u32, weight: f64) -> WeightSample {
        WeightSample::new(NaiveDate::from_ymd_opt(2024, 3, day).unwrap(), weight)
    }

    #[test]
    fn test_empty_log_has_no_statistics() {
        let stats = summarize(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.average_weight.is_none());
        assert!(entry_changes(&[]).is_empty());
    }

    #[test]
    fn test_statistics_use_date_order_not_insertion_order() {
        let log = [sample(10, 78.0), sample(1, 81.0), sample(5, 79.5)];
        let stats = summarize(&log);

        assert_eq!(stats.count, 3);
        assert_eq!(stats.latest_weight, Some(78.0));
        assert_eq!(stats.min_weight, Some(78.0));
        assert_eq!(stats.max_weight, Some(81.0));
        assert!((stats.total_change.unwrap() + 3.0).abs() < 1e-12);
        assert!((stats.average_weight.unwrap() - 79.5).abs() < 1e-12);
    }

    #[test]
    fn test_entry_changes_align_with_input() {
        let log = [sample(10, 78.0), sample(1, 81.0), sample(5, 79.5)];
        let changes = entry_changes(&log);
        assert!((changes[0] + 1.5).abs() < 1e-12);
        assert!(changes[1].abs() < f64::EPSILON);
        assert!((changes[2] + 1.5).abs() < 1e-12);
    }
}
