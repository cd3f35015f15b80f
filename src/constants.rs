// ABOUTME: Application constants for the tracker server
// ABOUTME: Re-exports shared domain constants and adds environment keys, defaults, and cookie names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Domain constants come from `tracker_core::constants`; this module adds the values only the
//! server needs.

pub use tracker_core::constants::{faq, forecast, formats, limits, messages, service_names, trend_model};

/// Environment variable names
pub mod env_keys {
    /// Bind address
    pub const HOST: &str = "HOST";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// SQLite URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Session signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// Session lifetime in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// bcrypt work factor
    pub const BCRYPT_COST: &str = "BCRYPT_COST";
    /// Add the `Secure` attribute to session cookies
    pub const COOKIE_SECURE: &str = "COOKIE_SECURE";
    /// Directory for rendered charts
    pub const CHARTS_DIR: &str = "CHARTS_DIR";
    /// Optional FAQ corpus file
    pub const FAQ_DATASET_PATH: &str = "FAQ_DATASET_PATH";
    /// Comma-separated CORS origins or `*`
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Largest accepted request body
    pub const MAX_REQUEST_BODY_BYTES: &str = "MAX_REQUEST_BODY_BYTES";
    /// development, production, or testing
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    /// Bind address
    pub const HOST: &str = "127.0.0.1";
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8080;
    /// SQLite database file
    pub const DATABASE_URL: &str = "sqlite:./data/tracker.db";
    /// Chart output directory
    pub const CHARTS_DIR: &str = "./data/charts";
    /// CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// 64 KiB is plenty for form posts and chat queries
    pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
}

/// Session cookie settings
pub mod cookies {
    /// Cookie carrying the session JWT
    pub const AUTH_TOKEN: &str = "auth_token";
}

/// System setting keys
pub mod settings {
    /// Generated session signing secret, used when none is configured
    pub const JWT_SECRET: &str = "jwt_secret";
}

/// Redirect targets
pub mod redirects {
    /// After logging in or changing the weight log
    pub const DASHBOARD: &str = "/dashboard";
    /// After registering or logging out
    pub const LOGIN: &str = "/login";
    /// After changing the calorie log
    pub const FOOD_ENTRIES: &str = "/food_entries";
    /// After changing the workout log
    pub const WORKOUTS: &str = "/workouts";
}

/// bcrypt work factor bounds accepted by the hashing library
pub mod password_hashing {
    /// Cheapest allowed cost; used by tests
    pub const MIN_COST: u32 = 4;
    /// Most expensive allowed cost
    pub const MAX_COST: u32 = 31;
}
