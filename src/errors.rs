// ABOUTME: Re-exports the unified error type from tracker-core
// ABOUTME: Routes, services, and storage return AppResult so failures share one JSON shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The types live in `tracker_core::errors` so the intelligence crate can convert its own
//! error enums into [`AppError`]. With the `http-response` feature enabled, `AppError`
//! renders as `{"error": {"code", "message"}}` with the matching status.

pub use tracker_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails};
