// ABOUTME: System settings storage for server-wide key/value state
// ABOUTME: Holds the generated session signing secret when none is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::constants::settings;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use rand::RngCore;
use sqlx::Row;

/// Bytes of randomness in a generated signing secret
const GENERATED_SECRET_BYTES: usize = 64;

/// A system setting entry
#[derive(Debug, Clone)]
pub struct SystemSetting {
    /// Unique key identifier for the setting
    pub key: String,
    /// The current value of the setting
    pub value: String,
    /// When the setting was last modified
    pub updated_at: chrono::DateTime<Utc>,
}

impl Database {
    pub(super) async fn migrate_system_settings(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS system_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create system_settings table: {e}")))?;
        Ok(())
    }

    /// Get a system setting by key
    pub async fn get_system_setting(&self, key: &str) -> AppResult<Option<SystemSetting>> {
        let row = sqlx::query("SELECT key, value, updated_at FROM system_settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get system setting: {e}")))?;

        Ok(row.map(|row| {
            let updated_at_str: String = row.get("updated_at");
            let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at_str)
                .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));
            SystemSetting {
                key: row.get("key"),
                value: row.get("value"),
                updated_at,
            }
        }))
    }

    /// Set a system setting value
    pub async fn set_system_setting(&self, key: &str, value: &str) -> AppResult<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r"
            INSERT INTO system_settings (key, value, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = ?2,
                updated_at = ?3
            ",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to set system setting: {e}")))?;
        Ok(())
    }

    /// Return the persisted session signing secret, generating one on first use
    ///
    /// Sessions survive restarts because the secret is stored rather than regenerated.
    pub async fn get_or_create_jwt_secret(&self) -> AppResult<String> {
        if let Some(existing) = self.get_system_setting(settings::JWT_SECRET).await? {
            return Ok(existing.value);
        }

        let mut bytes = [0_u8; GENERATED_SECRET_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let secret = hex::encode(bytes);

        // INSERT OR IGNORE keeps the first writer's secret if two starts race
        sqlx::query(
            r"
            INSERT OR IGNORE INTO system_settings (key, value, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            ",
        )
        .bind(settings::JWT_SECRET)
        .bind(&secret)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store session secret: {e}")))?;

        tracing::info!("Generated and stored a new session signing secret");
        self.get_system_setting(settings::JWT_SECRET)
            .await?
            .map(|s| s.value)
            .ok_or_else(|| AppError::internal("Session secret missing after insert"))
    }
}
