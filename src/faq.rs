// ABOUTME: Loads the FAQ corpus for the chat endpoint
// ABOUTME: Uses FAQ_DATASET_PATH when configured, otherwise the corpus bundled with the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::StorageConfig;
use crate::errors::{AppError, AppResult};
use tracker_intelligence::FaqMatcher;

/// Build the process-wide FAQ matcher
///
/// Runs once before the server accepts connections; the vector space is immutable afterwards.
pub async fn load_faq_matcher(storage: &StorageConfig) -> AppResult<FaqMatcher> {
    let Some(path) = &storage.faq_dataset_path else {
        tracing::info!("Using bundled FAQ corpus");
        return Ok(FaqMatcher::with_default_corpus()?);
    };

    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::config(format!("Failed to read FAQ dataset {}: {e}", path.display()))
    })?;
    let matcher = tokio::task::spawn_blocking(move || FaqMatcher::from_json(&json))
        .await
        .map_err(|e| AppError::internal(format!("FAQ loading task failed: {e}")))??;

    tracing::info!(path = %path.display(), entries = matcher.entries().len(), "Loaded FAQ corpus");
    Ok(matcher)
}
