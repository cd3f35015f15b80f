// ABOUTME: Fixed exercise suggestions for each workout type
// ABOUTME: Shown next to the workout log form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;
use tracker_core::models::WorkoutType;

/// One suggested exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExerciseSuggestion {
    /// Exercise name
    pub name: &'static str,
    /// Volume or duration guidance
    pub description: &'static str,
}

const fn exercise(name: &'static str, description: &'static str) -> ExerciseSuggestion {
    ExerciseSuggestion { name, description }
}

const CARDIO: [ExerciseSuggestion; 3] = [
    exercise("Running", "30 minutes at moderate pace"),
    exercise("Cycling", "45 minutes at varying intensity"),
    exercise("Swimming", "30 minutes of laps"),
];

const STRENGTH: [ExerciseSuggestion; 3] = [
    exercise("Push-ups", "3 sets of 15 reps"),
    exercise("Squats", "4 sets of 12 reps"),
    exercise("Deadlifts", "3 sets of 10 reps"),
];

const FLEXIBILITY: [ExerciseSuggestion; 3] = [
    exercise("Yoga Flow", "20 minutes of basic poses"),
    exercise("Static Stretching", "Hold each stretch for 30 seconds"),
    exercise("Pilates", "30 minutes of core exercises"),
];

const HIIT: [ExerciseSuggestion; 3] = [
    exercise("Burpees", "30 seconds work, 15 seconds rest"),
    exercise("Mountain Climbers", "45 seconds work, 15 seconds rest"),
    exercise("Jump Rope", "1 minute work, 30 seconds rest"),
];

/// Suggestions for `workout_type`
#[must_use]
pub const fn suggestions(workout_type: WorkoutType) -> &'static [ExerciseSuggestion] {
    match workout_type {
        WorkoutType::Cardio => &CARDIO,
        WorkoutType::Strength => &STRENGTH,
        WorkoutType::Flexibility => &FLEXIBILITY,
        WorkoutType::Hiit => &HIIT,
    }
}
