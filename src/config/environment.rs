// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into typed server, database, auth, and storage settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::constants::{defaults, env_keys, limits, password_hashing};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite`, lost on shutdown
    Memory,
}

impl DatabaseUrl {
    /// Parse `sqlite:<path>`, `sqlite::memory:`, or a bare file path
    ///
    /// # Errors
    ///
    /// Returns an error for an empty path or a non-SQLite scheme
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(path_str) = trimmed.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" {
                return Ok(Self::Memory);
            }
            if path_str.is_empty() {
                return Err(anyhow!("DATABASE_URL has an empty SQLite path"));
            }
            return Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            });
        }
        if trimmed.contains("://") {
            return Err(anyhow!("Unsupported database URL scheme: {trimmed}"));
        }
        if trimmed.is_empty() {
            return Err(anyhow!("DATABASE_URL is empty"));
        }
        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Convert to an sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/tracker.db"),
        }
    }
}

/// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Where the data lives
    pub url: DatabaseUrl,
}

/// Session and password settings
#[derive(Clone)]
pub struct AuthConfig {
    /// Session signing secret; when absent a generated secret is persisted in the database
    pub jwt_secret: Option<String>,
    /// Session lifetime
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

/// On-disk locations
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory for rendered weight charts
    pub charts_dir: PathBuf,
    /// FAQ corpus to load instead of the bundled one
    pub faq_dataset_path: Option<PathBuf>,
}

/// HTTP surface settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Allowed CORS origins; `["*"]` allows any
    pub cors_allowed_origins: Vec<String>,
    /// Largest accepted request body
    pub max_request_body_bytes: usize,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment mode
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Session and password settings
    pub auth: AuthConfig,
    /// On-disk locations
    pub storage: StorageConfig,
    /// HTTP surface settings
    pub http: HttpConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or(env_keys::HOST, defaults::HOST),
            http_port: parse_env(env_keys::HTTP_PORT, defaults::HTTP_PORT)?,
            environment: Environment::from_str_or_default(&env_var_or(
                env_keys::ENVIRONMENT,
                "development",
            )),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    env_keys::DATABASE_URL,
                    defaults::DATABASE_URL,
                ))
                .context("Invalid DATABASE_URL value")?,
            },
            auth: AuthConfig {
                jwt_secret: env::var(env_keys::JWT_SECRET)
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                jwt_expiry_hours: parse_env(
                    env_keys::JWT_EXPIRY_HOURS,
                    limits::DEFAULT_SESSION_HOURS,
                )?,
                bcrypt_cost: parse_env(env_keys::BCRYPT_COST, bcrypt::DEFAULT_COST)?,
                cookie_secure: parse_env(env_keys::COOKIE_SECURE, false)?,
            },
            storage: StorageConfig {
                charts_dir: PathBuf::from(env_var_or(env_keys::CHARTS_DIR, defaults::CHARTS_DIR)),
                faq_dataset_path: env::var(env_keys::FAQ_DATASET_PATH)
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from),
            },
            http: HttpConfig {
                cors_allowed_origins: parse_origins(&env_var_or(
                    env_keys::CORS_ALLOWED_ORIGINS,
                    defaults::CORS_ALLOWED_ORIGINS,
                )),
                max_request_body_bytes: parse_env(
                    env_keys::MAX_REQUEST_BODY_BYTES,
                    defaults::MAX_REQUEST_BODY_BYTES,
                )?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Configuration for tests: in-memory database, cheap hashing, fixed secret
    #[must_use]
    pub fn for_testing(charts_dir: PathBuf) -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: 0,
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
            },
            auth: AuthConfig {
                jwt_secret: Some("test-secret-with-enough-entropy-for-hs256".to_owned()),
                jwt_expiry_hours: limits::DEFAULT_SESSION_HOURS,
                bcrypt_cost: password_hashing::MIN_COST,
                cookie_secure: false,
            },
            storage: StorageConfig {
                charts_dir,
                faq_dataset_path: None,
            },
            http: HttpConfig {
                cors_allowed_origins: vec!["*".to_owned()],
                max_request_body_bytes: defaults::MAX_REQUEST_BODY_BYTES,
            },
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error for settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }
        if !(password_hashing::MIN_COST..=password_hashing::MAX_COST).contains(&self.auth.bcrypt_cost) {
            return Err(anyhow!(
                "BCRYPT_COST must be between {} and {}",
                password_hashing::MIN_COST,
                password_hashing::MAX_COST
            ));
        }
        if self.http.max_request_body_bytes == 0 {
            return Err(anyhow!("MAX_REQUEST_BODY_BYTES must be positive"));
        }
        if self.http.cors_allowed_origins.is_empty() {
            return Err(anyhow!("CORS_ALLOWED_ORIGINS must list at least one origin"));
        }

        if self.environment.is_production() {
            if !self.auth.cookie_secure {
                warn!("COOKIE_SECURE is disabled in production; session cookies will be sent over plain HTTP");
            }
            if self.database.url.is_memory() {
                warn!("Production is using an in-memory database; all data is lost on restart");
            }
            if self.auth.jwt_secret.is_none() {
                warn!("JWT_SECRET not set; a generated secret will be persisted in the database");
            }
        }

        Ok(())
    }

    /// Human-readable configuration overview, without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pierre Tracker Configuration:\n\
             - Environment: {}\n\
             - Listen: {}:{}\n\
             - Database: {}\n\
             - Session lifetime: {}h\n\
             - Session secret: {}\n\
             - Secure cookies: {}\n\
             - Charts directory: {}\n\
             - FAQ corpus: {}\n\
             - CORS origins: {}\n\
             - Max request body: {} bytes",
            self.environment,
            self.host,
            self.http_port,
            self.database.url.to_connection_string(),
            self.auth.jwt_expiry_hours,
            if self.auth.jwt_secret.is_some() {
                "configured"
            } else {
                "generated"
            },
            self.auth.cookie_secure,
            self.storage.charts_dir.display(),
            self.storage
                .faq_dataset_path
                .as_ref()
                .map_or_else(|| "bundled".to_owned(), |p| p.display().to_string()),
            self.http.cors_allowed_origins.join(","),
            self.http.max_request_body_bytes,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse `key` when set, otherwise use `default`
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {key} value {raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
