// ABOUTME: FAQ chat and search routes
// ABOUTME: Answers free-text questions from the FAQ corpus and filters the corpus by substring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracker_core::models::FaqEntry;

/// Body of POST /chat
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's question
    pub query: Option<String>,
}

/// Answer to a chat query
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Corpus answer, or the fallback text when nothing matched
    pub answer: String,
}

/// Query string of GET /faq
#[derive(Debug, Deserialize)]
pub struct FaqSearchQuery {
    /// Case-insensitive substring; absent or blank lists everything
    pub search: Option<String>,
}

/// Result of GET /faq
#[derive(Debug, Serialize, Deserialize)]
pub struct FaqSearchResponse {
    /// Matching entries in corpus order
    pub entries: Vec<FaqEntry>,
    /// Number of matching entries
    pub count: usize,
}

/// Chat routes
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/chat", post(Self::handle_chat))
            .route("/faq", get(Self::handle_faq_search))
            .with_state(resources)
    }

    /// Handle POST /chat
    async fn handle_chat(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<ChatRequest>, JsonRejection>,
    ) -> AppResult<Json<ChatResponse>> {
        let Json(request) =
            payload.map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        let query = request
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::missing_field("query"))?;

        let result = resources.faq_matcher.find_match(query);
        tracing::info!(
            matched = result.is_match(),
            score = result.score,
            threshold = result.threshold,
            "Chat query answered"
        );
        Ok(Json(ChatResponse {
            answer: result.answer,
        }))
    }

    /// Handle GET /faq
    async fn handle_faq_search(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<FaqSearchQuery>,
    ) -> Json<FaqSearchResponse> {
        let entries: Vec<FaqEntry> = resources
            .faq_matcher
            .search(query.search.as_deref().unwrap_or_default())
            .into_iter()
            .cloned()
            .collect();
        Json(FaqSearchResponse {
            count: entries.len(),
            entries,
        })
    }
}
