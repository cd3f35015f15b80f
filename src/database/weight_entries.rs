// ABOUTME: Weight log storage, one ordered list per user
// ABOUTME: Entries keep insertion order; deletion addresses an entry by its position in that order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{format_date, parse_date, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracker_core::models::{WeightEntry, WeightSample};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_weight_entries(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS weight_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                weight REAL NOT NULL CHECK (weight > 0),
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create weight_entries table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_weight_entries_user ON weight_entries(user_id, id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create weight_entries index: {e}")))?;

        Ok(())
    }

    /// Append an entry to the end of the user's log
    pub async fn add_weight_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        weight: f64,
    ) -> AppResult<WeightEntry> {
        let created_at = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO weight_entries (user_id, date, weight, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            ",
        )
        .bind(user_id.to_string())
        .bind(format_date(date))
        .bind(weight)
        .bind(created_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add weight entry: {e}")))?;

        Ok(WeightEntry {
            id,
            user_id,
            date,
            weight,
            created_at,
        })
    }

    /// The user's entries in insertion order
    pub async fn list_weight_entries(&self, user_id: Uuid) -> AppResult<Vec<WeightEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, weight, created_at
            FROM weight_entries
            WHERE user_id = ?1
            ORDER BY id
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list weight entries: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// The user's `(date, weight)` pairs in insertion order
    pub async fn weight_samples(&self, user_id: Uuid) -> AppResult<Vec<WeightSample>> {
        Ok(self
            .list_weight_entries(user_id)
            .await?
            .iter()
            .map(WeightEntry::sample)
            .collect())
    }

    /// Delete the entry at zero-based `index` in insertion order
    ///
    /// Returns `false` without touching the log when `index` is negative or past the end.
    /// The lookup and delete share a transaction so a concurrent append or delete cannot shift
    /// the position in between.
    pub async fn delete_weight_entry_at(&self, user_id: Uuid, index: i64) -> AppResult<bool> {
        if index < 0 {
            return Ok(false);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let target: Option<i64> = sqlx::query_scalar(
            r"
            SELECT id FROM weight_entries
            WHERE user_id = ?1
            ORDER BY id
            LIMIT 1 OFFSET ?2
            ",
        )
        .bind(user_id.to_string())
        .bind(index)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to locate weight entry: {e}")))?;

        let Some(id) = target else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM weight_entries WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete weight entry: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit weight delete: {e}")))?;

        Ok(true)
    }
}

fn row_to_entry(row: &SqliteRow) -> AppResult<WeightEntry> {
    let user_id: String = row.get("user_id");
    let date: String = row.get("date");
    let created_at: String = row.get("created_at");
    Ok(WeightEntry {
        id: row.get("id"),
        user_id: parse_uuid(&user_id)?,
        date: parse_date(&date)?,
        weight: row.get("weight"),
        created_at: parse_timestamp(&created_at)?,
    })
}
