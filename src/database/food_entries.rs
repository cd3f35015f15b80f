// ABOUTME: Calorie log storage
// ABOUTME: Food entries are grouped by the UTC day they were logged on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{format_date, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracker_core::models::FoodEntry;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_food_entries(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                calories INTEGER NOT NULL CHECK (calories >= 0),
                consumed_on TEXT NOT NULL,
                consumed_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create food_entries table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_food_entries_user_day ON food_entries(user_id, consumed_on)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create food_entries index: {e}")))?;

        Ok(())
    }

    /// Log a food item as consumed now
    pub async fn add_food_entry(
        &self,
        user_id: Uuid,
        name: &str,
        calories: u32,
    ) -> AppResult<FoodEntry> {
        let consumed_at = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO food_entries (user_id, name, calories, consumed_on, consumed_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            ",
        )
        .bind(user_id.to_string())
        .bind(name)
        .bind(i64::from(calories))
        .bind(format_date(consumed_at.date_naive()))
        .bind(consumed_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add food entry: {e}")))?;

        Ok(FoodEntry {
            id,
            user_id,
            name: name.to_owned(),
            calories,
            consumed_at,
        })
    }

    /// Entries logged on `day`, oldest first
    pub async fn list_food_entries_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> AppResult<Vec<FoodEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, calories, consumed_at
            FROM food_entries
            WHERE user_id = ?1 AND consumed_on = ?2
            ORDER BY id
            ",
        )
        .bind(user_id.to_string())
        .bind(format_date(day))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list food entries: {e}")))?;

        rows.iter().map(row_to_food_entry).collect()
    }

    /// Delete one of the user's food entries; `false` if it does not exist or is not theirs
    pub async fn delete_food_entry(&self, user_id: Uuid, entry_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM food_entries WHERE id = ?1 AND user_id = ?2")
            .bind(entry_id)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete food entry: {e}")))?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_food_entry(row: &SqliteRow) -> AppResult<FoodEntry> {
    let user_id: String = row.get("user_id");
    let consumed_at: String = row.get("consumed_at");
    let calories: i64 = row.get("calories");
    Ok(FoodEntry {
        id: row.get("id"),
        user_id: parse_uuid(&user_id)?,
        name: row.get("name"),
        calories: u32::try_from(calories)
            .map_err(|_| AppError::database(format!("Invalid calories in database: {calories}")))?,
        consumed_at: parse_timestamp(&consumed_at)?,
    })
}
