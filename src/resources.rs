// ABOUTME: Shared server state handed to every route
// ABOUTME: Bundles configuration, storage, session auth, the FAQ matcher, and the chart renderer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthManager;
use crate::charts::ChartRenderer;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::middleware::{AuthenticatedUser, SessionAuthMiddleware};
use http::HeaderMap;
use std::sync::Arc;
use tracker_intelligence::FaqMatcher;

/// Dependencies shared by all request handlers
///
/// Built once at startup and shared as `Arc<ServerResources>`; nothing in it is replaced
/// while the server runs.
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Account and log storage
    pub database: Arc<Database>,
    /// Session token signer
    pub auth_manager: Arc<AuthManager>,
    /// Session authenticator for protected routes
    pub auth_middleware: SessionAuthMiddleware,
    /// Immutable FAQ vector space
    pub faq_matcher: Arc<FaqMatcher>,
    /// Per-user chart writer
    pub charts: Arc<ChartRenderer>,
}

impl ServerResources {
    /// Assemble resources, resolving the session signing secret
    pub async fn new(
        config: ServerConfig,
        database: Database,
        faq_matcher: FaqMatcher,
    ) -> AppResult<Self> {
        let database = Arc::new(database);
        let secret = match &config.auth.jwt_secret {
            Some(secret) => secret.clone(),
            None => database.get_or_create_jwt_secret().await?,
        };
        let auth_manager = Arc::new(AuthManager::new(
            secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        ));
        let auth_middleware = SessionAuthMiddleware::new(auth_manager.clone(), database.clone());
        let charts = Arc::new(ChartRenderer::new(config.storage.charts_dir.clone()));

        Ok(Self {
            config: Arc::new(config),
            database,
            auth_manager,
            auth_middleware,
            faq_matcher: Arc::new(faq_matcher),
            charts,
        })
    }

    /// Resolve the session on a request
    pub async fn authenticate(&self, headers: &HeaderMap) -> AppResult<AuthenticatedUser> {
        self.auth_middleware
            .authenticate_request_with_headers(headers)
            .await
    }
}
