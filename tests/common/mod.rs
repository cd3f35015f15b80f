// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds in-memory server resources and registers and logs in test users over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `pierre_tracker`

use crate::helpers::axum_test::AxumTestRequest;
use anyhow::Result;
use axum::http::StatusCode;
use axum::Router;
use pierre_tracker::{
    config::ServerConfig, database::Database, resources::ServerResources, server::build_router,
};
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tracker_intelligence::FaqMatcher;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// A fully wired application backed by an in-memory database
pub struct TestApp {
    /// Router with every route and layer
    pub router: Router,
    /// Shared resources behind the router
    pub resources: Arc<ServerResources>,
    /// Chart output directory, removed on drop
    pub charts_dir: TempDir,
}

impl TestApp {
    /// Fresh router handle for one request
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Standard server resources for tests
pub async fn create_test_resources(charts_dir: &TempDir) -> Result<Arc<ServerResources>> {
    init_test_logging();
    let config = ServerConfig::for_testing(charts_dir.path().to_path_buf());
    let database = Database::new(&config.database.url).await?;
    let faq_matcher = FaqMatcher::with_default_corpus()?;
    Ok(Arc::new(
        ServerResources::new(config, database, faq_matcher).await?,
    ))
}

/// Build the complete application
pub async fn create_test_app() -> Result<TestApp> {
    let charts_dir = tempfile::tempdir()?;
    let resources = create_test_resources(&charts_dir).await?;
    Ok(TestApp {
        router: build_router(resources.clone()),
        resources,
        charts_dir,
    })
}

/// Password used for every test account
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Register `username` through POST /register
pub async fn register_user(app: &TestApp, username: &str) {
    let email = format!("{username}@example.com");
    AxumTestRequest::post("/register")
        .form(&[
            ("username", username),
            ("email", email.as_str()),
            ("password", TEST_PASSWORD),
        ])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

/// Register and log in `username`, returning the `Cookie` header value for the session
pub async fn login_user(app: &TestApp, username: &str) -> String {
    register_user(app, username).await;
    let response = AxumTestRequest::post("/login")
        .form(&[("username", username), ("password", TEST_PASSWORD)])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    response.cookie_pair().expect("login must set a session cookie")
}

/// Log a weight entry for the session in `cookie`
pub async fn add_weight(app: &TestApp, cookie: &str, date: &str, weight: &str) {
    AxumTestRequest::post("/add_entry")
        .cookie(Some(cookie))
        .form(&[("weight", weight), ("date", date)])
        .send(app.app())
        .await
        .assert_status(StatusCode::SEE_OTHER);
}
