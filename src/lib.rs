// ABOUTME: Main library entry point for the Pierre Tracker service
// ABOUTME: Weight, nutrition, and workout logging over HTTP with trend prediction and FAQ chat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Tracker
//!
//! A personal fitness-tracking HTTP service. Users register, log in, and keep per-user logs
//! of body weight, food, and workouts. On top of the logs the service offers
//!
//! - a weight-trend predictor (trend line plus RBF support-vector regression),
//! - a TF-IDF FAQ matcher for the chat endpoint,
//! - a goal plan generator (BMR, calorie target, macros, workouts).
//!
//! The algorithms live in the `tracker-intelligence` crate; this crate wires them to
//! storage, authentication, and the axum router.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_tracker::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Session tokens and password hashing
pub mod auth;

/// Weight chart rendering and per-user chart files
pub mod charts;

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// SQLite persistence
pub mod database;

/// Unified error handling
pub mod errors;

/// FAQ corpus loading
pub mod faq;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: session authentication, CORS, request tracing
pub mod middleware;

/// Shared server state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Cookie helpers
pub mod security;

/// Router assembly and server lifecycle
pub mod server;
