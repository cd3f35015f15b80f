// ABOUTME: Session authentication for protected routes
// ABOUTME: Accepts the auth_token cookie or a Bearer header and resolves the session to a live user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthManager;
use crate::constants::cookies::AUTH_TOKEN;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::security::cookies::get_cookie_value;
use http::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::sync::Arc;
use uuid::Uuid;

/// Where the session token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// `auth_token` cookie set at login
    Cookie,
    /// `Authorization: Bearer` header
    BearerHeader,
}

impl SessionSource {
    /// Label for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cookie => "cookie",
            Self::BearerHeader => "bearer",
        }
    }
}

/// The user a request acts for
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User id; every log query is scoped to it
    pub user_id: Uuid,
    /// Current username
    pub username: String,
    /// Current email
    pub email: String,
    /// How the session was presented
    pub source: SessionSource,
}

/// Validates sessions against the signing key and the user table
#[derive(Clone)]
pub struct SessionAuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl SessionAuthMiddleware {
    /// Create the authenticator
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its headers
    ///
    /// The cookie is tried first because browsers send it automatically; API clients use the
    /// `Authorization` header instead. A rejected cookie falls through to a Bearer header
    /// when one is present, so a stale browser session never masks a valid API token.
    #[tracing::instrument(
        skip(self, headers),
        fields(
            auth_method = tracing::field::Empty,
            user_id = tracing::field::Empty,
            success = tracing::field::Empty,
        )
    )]
    pub async fn authenticate_request_with_headers(
        &self,
        headers: &HeaderMap,
    ) -> AppResult<AuthenticatedUser> {
        let mut rejection = None;

        for (token, source) in Self::extract_tokens(headers)? {
            tracing::Span::current().record("auth_method", source.as_str());
            match self.authenticate_token(&token, source).await {
                Ok(user) => {
                    tracing::Span::current()
                        .record("user_id", user.user_id.to_string())
                        .record("success", true);
                    return Ok(user);
                }
                Err(e) => {
                    tracing::debug!(source = source.as_str(), "Session token rejected: {}", e.message);
                    rejection = Some(e);
                }
            }
        }

        let e = rejection.unwrap_or_else(AppError::auth_required);
        tracing::Span::current().record("success", false);
        AppLogger::log_security_event("session_rejected", &e.message, None);
        Err(e)
    }

    /// Session tokens in the order they are tried
    ///
    /// A malformed `Authorization` header is an error only when there is no cookie to try.
    fn extract_tokens(headers: &HeaderMap) -> AppResult<Vec<(String, SessionSource)>> {
        let cookie = get_cookie_value(headers, AUTH_TOKEN);
        let bearer = headers.get(AUTHORIZATION).map(Self::parse_bearer);

        let mut tokens = Vec::with_capacity(2);
        match (cookie, bearer) {
            (None, None) => return Err(AppError::auth_required()),
            (None, Some(bearer)) => tokens.push((bearer?, SessionSource::BearerHeader)),
            (Some(cookie), bearer) => {
                tokens.push((cookie, SessionSource::Cookie));
                if let Some(Ok(token)) = bearer {
                    tokens.push((token, SessionSource::BearerHeader));
                }
            }
        }
        Ok(tokens)
    }

    fn parse_bearer(header: &HeaderValue) -> AppResult<String> {
        let header = header
            .to_str()
            .map_err(|_| AppError::auth_invalid("Authorization header is not valid ASCII"))?;
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| AppError::auth_invalid("Authorization header must use the Bearer scheme"))
    }

    async fn authenticate_token(
        &self,
        token: &str,
        source: SessionSource,
    ) -> AppResult<AuthenticatedUser> {
        let claims = self.auth_manager.validate_token(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Session refers to an unknown user"))?;

        Ok(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
            email: user.email,
            source,
        })
    }
}
