// ABOUTME: Weight-goal plan generator using Mifflin-St Jeor BMR and activity multipliers
// ABOUTME: Pure function mapping a validated request to calorie, pace, macro, and workout targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Generator
//!
//! Computes a weight plan from body measurements, a timeframe, an activity level, and a
//! nutrition goal. No I/O; every failure is a [`PlanError`].
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracker_core::constants::limits::{
    MAX_AGE_YEARS, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_AGE_YEARS, MIN_HEIGHT_CM,
};
use tracker_core::errors::AppError;

/// Why a plan could not be generated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Timeframe was zero, negative, or not finite
    #[error("timeframe must be a positive number of weeks, got {0}")]
    NonPositiveTimeframe(f64),
    /// Nutrition goal key not in {cut, bulk, maintain}
    #[error("unknown nutrition goal '{0}' (expected cut, bulk or maintain)")]
    UnknownNutritionGoal(String),
    /// A measurement is outside its accepted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Form field name
        field: &'static str,
        /// Value received
        value: f64,
        /// Lowest accepted value
        min: f64,
        /// Highest accepted value
        max: f64,
    },
}

impl PlanError {
    /// Form field the error refers to
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveTimeframe(_) => "timeframe",
            Self::UnknownNutritionGoal(_) => "nutritionGoals",
            Self::OutOfRange { field, .. } => field,
        }
    }
}

impl From<PlanError> for AppError {
    fn from(error: PlanError) -> Self {
        let field = error.field();
        match error {
            PlanError::UnknownNutritionGoal(_) => Self::invalid_format(field, error.to_string()),
            PlanError::NonPositiveTimeframe(_) | PlanError::OutOfRange { .. } => {
                Self::out_of_range(field, error.to_string())
            }
        }
    }
}

/// Daily activity level used to scale BMR into energy needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days per week
    Light,
    /// Moderate exercise 3-5 days per week
    Moderate,
    /// Hard exercise 6-7 days per week
    Very,
    /// Hard daily exercise plus a physical job
    Extra,
}

impl ActivityLevel {
    /// Energy multiplier applied to BMR
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Very => 1.725,
            Self::Extra => 1.9,
        }
    }

    /// Weekly exercise guidance for this activity level
    #[must_use]
    pub const fn exercise_guidance(self) -> &'static str {
        match self {
            Self::Sedentary => "30 minutes of light exercise 3 times per week",
            Self::Light => "45 minutes of moderate exercise 3-4 times per week",
            Self::Moderate => "1 hour of exercise 4-5 times per week",
            Self::Very => "1 hour of intense exercise 6 times per week",
            Self::Extra => "1-2 hours of intense exercise 6 times per week",
        }
    }

    /// Parse a form key, falling back to sedentary for anything unrecognized
    #[must_use]
    pub fn from_key_lossy(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            tracing::warn!(activity_level = key, "Unknown activity level, using sedentary");
            Self::Sedentary
        })
    }

    /// Parse a form key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "sedentary" => Some(Self::Sedentary),
            "light" => Some(Self::Light),
            "moderate" => Some(Self::Moderate),
            "very" => Some(Self::Very),
            "extra" => Some(Self::Extra),
            _ => None,
        }
    }
}

/// Direction of the nutrition plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NutritionGoal {
    /// Calorie deficit, fat loss
    Cut,
    /// Calorie surplus, muscle gain
    Bulk,
    /// Energy balance
    Maintain,
}

impl NutritionGoal {
    /// Macronutrient split for this goal
    #[must_use]
    pub const fn macros(self) -> MacroSplit {
        match self {
            Self::Cut => MacroSplit {
                protein: 30,
                carbs: 40,
                fat: 30,
            },
            Self::Bulk => MacroSplit {
                protein: 25,
                carbs: 50,
                fat: 25,
            },
            Self::Maintain => MacroSplit {
                protein: 25,
                carbs: 45,
                fat: 30,
            },
        }
    }

    /// Exercise recommendation for this goal
    #[must_use]
    pub const fn exercise_recommendation(self) -> &'static str {
        match self {
            Self::Cut => {
                "Combine 3-4 cardio sessions with 2-3 full-body strength workouts per week to keep muscle while in a calorie deficit"
            }
            Self::Bulk => {
                "Train with progressive overload 4-5 times per week and keep cardio to 1-2 light sessions"
            }
            Self::Maintain => {
                "Balance 3 strength sessions with 2-3 moderate cardio sessions per week"
            }
        }
    }

    /// Suggested workouts for this goal
    #[must_use]
    pub const fn workouts(self) -> &'static [&'static str] {
        match self {
            Self::Cut => &[
                "30 minutes of brisk walking or jogging",
                "20 minutes of HIIT intervals",
                "Full-body circuit: squats, push-ups, rows",
                "45 minutes of cycling",
            ],
            Self::Bulk => &[
                "Compound lifts: squat, bench press, deadlift",
                "Upper/lower split with 8-12 rep ranges",
                "Accessory work: pull-ups, dips, lunges",
                "Light 15-minute cooldown cardio",
            ],
            Self::Maintain => &[
                "Full-body strength training",
                "30 minutes of swimming or cycling",
                "Yoga or mobility session",
                "Recreational sports",
            ],
        }
    }
}

impl FromStr for NutritionGoal {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cut" => Ok(Self::Cut),
            "bulk" => Ok(Self::Bulk),
            "maintain" => Ok(Self::Maintain),
            _ => Err(PlanError::UnknownNutritionGoal(s.to_owned())),
        }
    }
}

/// Percentage of daily calories from each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroSplit {
    /// Protein share
    #[serde(serialize_with = "as_percent")]
    pub protein: u8,
    /// Carbohydrate share
    #[serde(serialize_with = "as_percent")]
    pub carbs: u8,
    /// Fat share
    #[serde(serialize_with = "as_percent")]
    pub fat: u8,
}

impl fmt::Display for MacroSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "protein {}%, carbs {}%, fat {}%",
            self.protein, self.carbs, self.fat
        )
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's serialize_with signature
fn as_percent<S: Serializer>(value: &u8, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value}%"))
}

/// Inputs to [`generate_plan`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// Current body weight, kg
    pub current_weight: f64,
    /// Goal body weight, kg
    pub target_weight: f64,
    /// Weeks available to reach the goal
    pub timeframe_weeks: f64,
    /// Activity level key (unknown keys count as sedentary)
    pub activity_level: String,
    /// Nutrition goal key: cut, bulk, or maintain
    pub nutrition_goal: String,
    /// Height, cm
    pub height_cm: f64,
    /// Age, years
    pub age: u32,
}

/// Generated plan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Echo of the current weight
    pub current_weight: f64,
    /// Echo of the target weight
    pub target_weight: f64,
    /// `current - target`; negative when the goal is to gain
    pub weight_to_lose: f64,
    /// Weeks requested
    pub timeframe: f64,
    /// Weight change per week needed to hit the target
    pub weekly_target: f64,
    /// Basal metabolic rate, kcal/day
    pub bmr: f64,
    /// Activity level applied
    pub activity_level: ActivityLevel,
    /// Multiplier applied to BMR
    pub activity_multiplier: f64,
    /// Daily energy target, kcal
    pub calorie_target: f64,
    /// Goal the macros and workouts were chosen for
    pub nutrition_goal: NutritionGoal,
    /// Macronutrient split
    pub macronutrients: MacroSplit,
    /// Goal-specific exercise advice
    pub exercise_recommendation: &'static str,
    /// Activity-level exercise frequency
    pub activity_guidance: &'static str,
    /// Suggested workouts
    pub recommended_workouts: Vec<&'static str>,
}

/// Mifflin-St Jeor BMR (male constant), kcal/day
#[must_use]
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    6.25f64.mul_add(height_cm, 10.0 * weight_kg) - 5.0 * f64::from(age) + 5.0
}

/// Multiplier for an activity key; unknown keys map to 1.2
#[must_use]
pub fn activity_multiplier(key: &str) -> f64 {
    ActivityLevel::from_key_lossy(key).multiplier()
}

/// Build a plan from `request`
pub fn generate_plan(request: &PlanRequest) -> Result<Plan, PlanError> {
    check_range("currentWeight", request.current_weight, f64::MIN_POSITIVE, MAX_WEIGHT_KG)?;
    check_range("targetWeight", request.target_weight, f64::MIN_POSITIVE, MAX_WEIGHT_KG)?;
    check_range("height", request.height_cm, MIN_HEIGHT_CM, MAX_HEIGHT_CM)?;
    check_range(
        "age",
        f64::from(request.age),
        f64::from(MIN_AGE_YEARS),
        f64::from(MAX_AGE_YEARS),
    )?;
    if !request.timeframe_weeks.is_finite() || request.timeframe_weeks <= 0.0 {
        return Err(PlanError::NonPositiveTimeframe(request.timeframe_weeks));
    }
    let goal: NutritionGoal = request.nutrition_goal.parse()?;
    let activity = ActivityLevel::from_key_lossy(&request.activity_level);

    let bmr = basal_metabolic_rate(request.current_weight, request.height_cm, request.age);
    let weight_to_lose = request.current_weight - request.target_weight;

    Ok(Plan {
        current_weight: request.current_weight,
        target_weight: request.target_weight,
        weight_to_lose: round2(weight_to_lose),
        timeframe: request.timeframe_weeks,
        weekly_target: round2(weight_to_lose / request.timeframe_weeks),
        bmr: round2(bmr),
        activity_level: activity,
        activity_multiplier: activity.multiplier(),
        calorie_target: round2(bmr * activity.multiplier()),
        nutrition_goal: goal,
        macronutrients: goal.macros(),
        exercise_recommendation: goal.exercise_recommendation(),
        activity_guidance: activity.exercise_guidance(),
        recommended_workouts: goal.workouts().to_vec(),
    })
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), PlanError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PlanError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
