// ABOUTME: Epsilon-insensitive support-vector regression with an RBF kernel
// ABOUTME: Dual problem solved by cyclic coordinate descent with soft-thresholding and box clipping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # RBF Support-Vector Regression
//!
//! The model is `f(x) = Σ βᵢ · k(xᵢ, x)` with `k(a, b) = exp(-γ (a - b)²)`. There is no bias
//! term: the predictor fits this machine on residuals of a trend line, which are centred on
//! zero, so the kernel part decays to zero away from the data.
//!
//! The dual objective is
//!
//! ```text
//! minimize  ½ βᵀ(K + λI)β − yᵀβ + ε‖β‖₁   subject to  −C ≤ βᵢ ≤ C
//! ```
//!
//! The ridge `λ` keeps the problem well conditioned when points are a day apart; without it
//! the Gaussian kernel matrix is numerically singular and the optimum interpolates noise with
//! coefficients pinned at `±C`. In the primal it rounds the loss off quadratically near the
//! tube edge.
//!
//! Each coordinate has a closed-form minimizer (soft-threshold, then clip), so cyclic
//! coordinate descent needs no step size. The solver stops once every coordinate satisfies
//! its optimality conditions to within `tolerance`, measured on the gradient in the units of
//! the targets. Kernel rows are stored sparsely: entries below `KERNEL_CUTOFF` are dropped,
//! so a sweep over a daily log costs `O(n)` rather than `O(n²)`.

use serde::{Deserialize, Serialize};
use tracker_core::constants::trend_model::{
    EPSILON, KERNEL_CUTOFF, KERNEL_GAMMA, KERNEL_RIDGE, REGULARIZATION_C, SOLVER_MAX_SWEEPS,
    SOLVER_TOLERANCE,
};

/// Hyperparameters of the regressor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvrParams {
    /// Box constraint on each dual coefficient
    pub c: f64,
    /// RBF kernel width
    pub gamma: f64,
    /// Half-width of the zero-loss tube
    pub epsilon: f64,
    /// Diagonal ridge added to the kernel matrix
    pub ridge: f64,
    /// Largest optimality violation accepted at convergence
    pub tolerance: f64,
    /// Upper bound on sweeps over all coefficients
    pub max_sweeps: usize,
}

impl Default for SvrParams {
    fn default() -> Self {
        Self {
            c: REGULARIZATION_C,
            gamma: KERNEL_GAMMA,
            epsilon: EPSILON,
            ridge: KERNEL_RIDGE,
            tolerance: SOLVER_TOLERANCE,
            max_sweeps: SOLVER_MAX_SWEEPS,
        }
    }
}

/// Fitted RBF support-vector regressor
#[derive(Debug, Clone)]
pub struct RbfSvr {
    params: SvrParams,
    support: Vec<f64>,
    coefficients: Vec<f64>,
    sweeps: usize,
}

impl RbfSvr {
    /// Fit the dual coefficients to `(xs[i], ys[i])`
    ///
    /// Inputs must have equal length; extra elements of the longer slice are ignored.
    #[must_use]
    pub fn fit(xs: &[f64], ys: &[f64], params: SvrParams) -> Self {
        let n = xs.len().min(ys.len());
        let xs = &xs[..n];
        let ys = &ys[..n];

        // Sparse kernel rows: (column, K_ij) for every entry above the cutoff
        let rows: Vec<Vec<(usize, f64)>> = xs
            .iter()
            .map(|&a| {
                xs.iter()
                    .enumerate()
                    .map(|(j, &b)| (j, rbf(params.gamma, a, b)))
                    .filter(|(_, k)| *k > KERNEL_CUTOFF)
                    .collect()
            })
            .collect();
        // Every RBF diagonal entry is exactly one
        let diagonal = 1.0 + params.ridge;

        let mut beta = vec![0.0; n];
        // f_i = Σ_j K_ij β_j, maintained incrementally
        let mut f = vec![0.0; n];
        let mut sweeps = 0;
        let mut violation = f64::INFINITY;

        while sweeps < params.max_sweeps {
            sweeps += 1;
            violation = 0.0;

            for i in 0..n {
                let gradient = params.ridge.mul_add(beta[i], f[i]) - ys[i];
                violation = violation.max(kkt_violation(beta[i], gradient, &params));

                // Minimizer along coordinate i with the others held fixed
                let pull = diagonal.mul_add(beta[i], -gradient);
                let updated =
                    (soft_threshold(pull, params.epsilon) / diagonal).clamp(-params.c, params.c);
                let delta = updated - beta[i];
                if delta != 0.0 {
                    for &(j, k_ij) in &rows[i] {
                        f[j] = delta.mul_add(k_ij, f[j]);
                    }
                    beta[i] = updated;
                }
            }

            if violation < params.tolerance {
                break;
            }
        }

        if violation >= params.tolerance {
            tracing::warn!(
                points = n,
                sweeps,
                violation,
                "Kernel regression stopped at the sweep limit before converging"
            );
        }

        Self {
            params,
            support: xs.to_vec(),
            coefficients: beta,
            sweeps,
        }
    }

    /// Predict at `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.support
            .iter()
            .zip(&self.coefficients)
            .map(|(&s, &b)| b * rbf(self.params.gamma, s, x))
            .sum()
    }

    /// Dual coefficients, one per training point
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Number of training points with a non-zero coefficient
    #[must_use]
    pub fn support_vector_count(&self) -> usize {
        self.coefficients.iter().filter(|b| **b != 0.0).count()
    }

    /// Sweeps the solver ran before converging or hitting the cap
    #[must_use]
    pub const fn sweeps(&self) -> usize {
        self.sweeps
    }
}

fn rbf(gamma: f64, a: f64, b: f64) -> f64 {
    let d = a - b;
    (-gamma * d * d).exp()
}

/// Distance of coordinate `β` from its optimality conditions, given the smooth gradient `g`
///
/// Interior positive coefficients need `g = −ε`, interior negative ones `g = ε`, zero ones
/// `|g| ≤ ε`, and coefficients at `±C` only need `g` on the correct side of `∓ε`.
fn kkt_violation(beta: f64, gradient: f64, params: &SvrParams) -> f64 {
    let eps = params.epsilon;
    if beta == 0.0 {
        (gradient.abs() - eps).max(0.0)
    } else if beta >= params.c {
        (gradient + eps).max(0.0)
    } else if beta <= -params.c {
        (eps - gradient).max(0.0)
    } else if beta > 0.0 {
        (gradient + eps).abs()
    } else {
        (gradient - eps).abs()
    }
}

fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
    }
}
