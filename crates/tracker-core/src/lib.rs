// ABOUTME: Core types and constants for the Pierre Tracker service
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Tracker Core
//!
//! Foundation crate providing shared types and constants for the tracker server and the
//! intelligence crate. It changes rarely, which keeps incremental builds of the workspace
//! fast.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Forecast limits, model hyperparameters, validation bounds
//! - **models**: Weight, food, workout, user, and FAQ records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
