// ABOUTME: HTTP middleware for session authentication, CORS, and request tracing
// ABOUTME: Provides the session authenticator and tower layers applied by the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session authentication
pub mod auth;
/// CORS configuration
pub mod cors;
/// Request spans and request ids
pub mod tracing;

pub use auth::{AuthenticatedUser, SessionAuthMiddleware, SessionSource};
pub use cors::setup_cors;
pub use self::tracing::{make_request_span, REQUEST_ID_HEADER};
