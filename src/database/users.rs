// ABOUTME: User account storage
// ABOUTME: Creates accounts with unique username and email and looks them up for login and sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, parse_uuid, Database};
use crate::constants::messages::{EMAIL_TAKEN, USERNAME_TAKEN};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracker_core::models::User;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;

        Ok(())
    }

    /// Insert a new account
    ///
    /// Fails with `ResourceAlreadyExists` when the username or email is taken; nothing is
    /// written in that case.
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        if self.get_user_by_username(&user.username).await?.is_some() {
            return Err(AppError::already_exists(USERNAME_TAKEN));
        }
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::already_exists(EMAIL_TAKEN));
        }

        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, created_at, last_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .bind(user.last_active.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // A concurrent registration won the race between the checks and the insert
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::already_exists(USERNAME_TAKEN)
            }
            other => AppError::database(format!("Failed to create user: {other}")),
        })?;

        Ok(user.id)
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.get_user_impl("id", &user_id.to_string()).await
    }

    /// Get a user by exact username
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.get_user_impl("username", username).await
    }

    /// Get a user by email, case-insensitively
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get_user_impl("email", email).await
    }

    /// Resolve a login identifier, which may be a username or an email
    pub async fn get_user_by_login(&self, identifier: &str) -> AppResult<Option<User>> {
        if let Some(user) = self.get_user_by_username(identifier).await? {
            return Ok(Some(user));
        }
        if identifier.contains('@') {
            return self.get_user_by_email(identifier).await;
        }
        Ok(None)
    }

    async fn get_user_impl(&self, field: &str, value: &str) -> AppResult<Option<User>> {
        let query = format!(
            "SELECT id, username, email, password_hash, created_at, last_active FROM users WHERE {field} = ?1"
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by {field}: {e}")))?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Record activity for a user
    pub async fn update_last_active(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_active = ?1 WHERE id = ?2")
            .bind(Utc::now().to_rfc3339())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update last active: {e}")))?;
        Ok(())
    }

    /// Number of registered users
    pub async fn get_user_count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count users: {e}")))
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");
    let last_active: String = row.get("last_active");
    Ok(User {
        id: parse_uuid(&id)?,
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: parse_timestamp(&created_at)?,
        last_active: parse_timestamp(&last_active)?,
    })
}
