// ABOUTME: Account registration, login, and logout routes
// ABOUTME: Login sets an HttpOnly session cookie; logout clears it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication Routes
//!
//! Form-based endpoints for a browser front end. Successful requests answer with
//! `303 See Other` so the browser follows up with a `GET`.

use crate::auth::{hash_password, verify_password};
use crate::constants::limits::{MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};
use crate::constants::messages::INVALID_CREDENTIALS;
use crate::constants::redirects;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::routes::forms;
use crate::security::cookies::{clear_auth_cookie, set_auth_cookie};
use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tracker_core::models::User;

/// Registration form
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    /// Desired username
    pub username: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Plain-text password
    pub password: Option<String>,
}

/// Login form; `username` may also hold the email address
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    /// Username or email
    pub username: Option<String>,
    /// Plain-text password
    pub password: Option<String>,
}

/// Account business logic, independent of HTTP
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    /// Service over the shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Create an account; fails with 409 when the username or email is taken
    pub async fn register(&self, username: &str, email: &str, password: &str) -> AppResult<User> {
        if !Self::is_valid_username(username) {
            return Err(AppError::invalid_format(
                "username",
                format!(
                    "Username must be {MIN_USERNAME_LENGTH}-{MAX_USERNAME_LENGTH} characters of letters, digits, '_', '-' or '.'"
                ),
            ));
        }
        if !Self::is_valid_email(email) {
            return Err(AppError::invalid_format("email", "Invalid email format"));
        }
        if !Self::is_valid_password(password) {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let database = &self.resources.database;
        if database.get_user_by_username(username).await?.is_some() {
            return Err(AppError::already_exists(
                crate::constants::messages::USERNAME_TAKEN,
            ));
        }

        let password_hash =
            hash_password(password.to_owned(), self.resources.config.auth.bcrypt_cost).await?;
        let user = User::new(username.to_owned(), email.to_owned(), password_hash);
        database.create_user(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<(User, String)> {
        let database = &self.resources.database;
        let Some(user) = database.get_user_by_login(identifier).await? else {
            AppLogger::log_auth_event(identifier, "login", false, Some("unknown user"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        };

        if !verify_password(password.to_owned(), user.password_hash.clone()).await? {
            AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("bad password"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        }

        database.update_last_active(user.id).await?;
        let token = self.resources.auth_manager.generate_token(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);
        Ok((user, token))
    }

    /// Usernames: 3-32 characters from `[A-Za-z0-9_.-]`
    #[must_use]
    pub fn is_valid_username(username: &str) -> bool {
        let length = username.chars().count();
        (MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length)
            && username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    }

    /// Minimal structural email check
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 || email.chars().any(char::is_whitespace) {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.') && !domain_part.contains('@')
    }

    /// Minimum length only
    #[must_use]
    pub fn is_valid_password(password: &str) -> bool {
        password.chars().count() >= MIN_PASSWORD_LENGTH
    }
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/register", post(Self::handle_register))
            .route("/login", post(Self::handle_login))
            .route("/logout", get(Self::handle_logout).post(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle POST /register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<RegisterForm>,
    ) -> AppResult<Response> {
        let username = forms::required(form.username.as_deref(), "username")?;
        let email = forms::required(form.email.as_deref(), "email")?;
        let password = form
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::missing_field("password"))?;

        AuthService::new(resources)
            .register(username, email, password)
            .await?;
        Ok(Redirect::to(redirects::LOGIN).into_response())
    }

    /// Handle POST /login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<LoginForm>,
    ) -> AppResult<Response> {
        let identifier = forms::required(form.username.as_deref(), "username")?;
        let password = form
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::missing_field("password"))?;

        let (_, token) = AuthService::new(resources.clone())
            .login(identifier, password)
            .await?;

        let mut headers = HeaderMap::new();
        set_auth_cookie(
            &mut headers,
            &token,
            resources.auth_manager.token_expiry_hours() * 3600,
            resources.config.auth.cookie_secure,
        );
        Ok((headers, Redirect::to(redirects::DASHBOARD)).into_response())
    }

    /// Handle GET/POST /logout
    async fn handle_logout(State(resources): State<Arc<ServerResources>>) -> Response {
        let mut headers = HeaderMap::new();
        clear_auth_cookie(&mut headers, resources.config.auth.cookie_secure);
        (headers, Redirect::to(redirects::LOGIN)).into_response()
    }
}
