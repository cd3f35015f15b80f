// ABOUTME: Ordinary least-squares trend line used as the predictor's long-range component
// ABOUTME: Handles degenerate inputs (single distinct x) by falling back to a flat line at the mean
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: point counts are small

use serde::{Deserialize, Serialize};

/// Straight line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Rate of change per unit x (kg per day for weight logs)
    pub slope: f64,
    /// Value at `x = 0`
    pub intercept: f64,
    /// Coefficient of determination, 0 when y has no variance
    pub r_squared: f64,
}

impl LinearFit {
    /// Evaluate the line at `x`
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }

    /// Least-squares fit through `(xs[i], ys[i])`
    ///
    /// Returns `None` for empty input or mismatched lengths. When every `x` is identical
    /// (several weights logged on one day) the slope is zero and the line sits at the mean.
    #[must_use]
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.is_empty() || xs.len() != ys.len() {
            return None;
        }

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx = dx.mul_add(dx, sxx);
            sxy = dx.mul_add(dy, sxy);
            syy = dy.mul_add(dy, syy);
        }

        if sxx.abs() < f64::EPSILON {
            return Some(Self {
                slope: 0.0,
                intercept: mean_y,
                r_squared: 0.0,
            });
        }

        let slope = sxy / sxx;
        let intercept = slope.mul_add(-mean_x, mean_y);
        let r_squared = if syy.abs() < f64::EPSILON {
            0.0
        } else {
            (sxy * sxy) / (sxx * syy)
        };

        Some(Self {
            slope,
            intercept,
            r_squared,
        })
    }
}
