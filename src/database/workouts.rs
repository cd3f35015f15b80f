// ABOUTME: Workout log storage
// ABOUTME: Lists workouts newest first and deletes them by id within the owning user's log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{format_date, parse_date, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracker_core::models::{WorkoutEntry, WorkoutType};
use uuid::Uuid;

/// Validated input for a new workout
#[derive(Debug, Clone)]
pub struct NewWorkout {
    /// Day the workout took place
    pub date: NaiveDate,
    /// Category
    pub workout_type: WorkoutType,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Estimated energy expenditure
    pub calories_burned: u32,
    /// Free-text notes
    pub notes: Option<String>,
}

impl Database {
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                workout_type TEXT NOT NULL CHECK (workout_type IN ('cardio', 'strength', 'flexibility', 'hiit')),
                duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
                calories_burned INTEGER NOT NULL CHECK (calories_burned >= 0),
                notes TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workouts table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_user_date ON workouts(user_id, date)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create workouts index: {e}")))?;

        Ok(())
    }

    /// Record a workout
    pub async fn add_workout(&self, user_id: Uuid, workout: NewWorkout) -> AppResult<WorkoutEntry> {
        let created_at = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO workouts (user_id, date, workout_type, duration_minutes, calories_burned, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id
            ",
        )
        .bind(user_id.to_string())
        .bind(format_date(workout.date))
        .bind(workout.workout_type.as_str())
        .bind(i64::from(workout.duration_minutes))
        .bind(i64::from(workout.calories_burned))
        .bind(workout.notes.as_deref())
        .bind(created_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add workout: {e}")))?;

        Ok(WorkoutEntry {
            id,
            user_id,
            date: workout.date,
            workout_type: workout.workout_type,
            duration_minutes: workout.duration_minutes,
            calories_burned: workout.calories_burned,
            notes: workout.notes,
            created_at,
        })
    }

    /// The user's workouts, newest date first; at most `limit` when given
    pub async fn list_workouts(
        &self,
        user_id: Uuid,
        limit: Option<u32>,
    ) -> AppResult<Vec<WorkoutEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, workout_type, duration_minutes, calories_burned, notes, created_at
            FROM workouts
            WHERE user_id = ?1
            ORDER BY date DESC, id DESC
            LIMIT ?2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit.map_or(-1, i64::from))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }

    /// Delete one of the user's workouts; `false` if it does not exist or is not theirs
    pub async fn delete_workout(&self, user_id: Uuid, workout_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = ?1 AND user_id = ?2")
            .bind(workout_id)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_workout(row: &SqliteRow) -> AppResult<WorkoutEntry> {
    let user_id: String = row.get("user_id");
    let date: String = row.get("date");
    let workout_type: String = row.get("workout_type");
    let created_at: String = row.get("created_at");
    let duration: i64 = row.get("duration_minutes");
    let calories: i64 = row.get("calories_burned");

    Ok(WorkoutEntry {
        id: row.get("id"),
        user_id: parse_uuid(&user_id)?,
        date: parse_date(&date)?,
        workout_type: workout_type
            .parse()
            .map_err(|e| AppError::database(format!("Invalid workout type in database: {e}")))?,
        duration_minutes: u32::try_from(duration)
            .map_err(|_| AppError::database(format!("Invalid duration in database: {duration}")))?,
        calories_burned: u32::try_from(calories)
            .map_err(|_| AppError::database(format!("Invalid calories in database: {calories}")))?,
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at)?,
    })
}
