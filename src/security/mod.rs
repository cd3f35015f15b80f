// ABOUTME: Security helpers shared by the HTTP layer
// ABOUTME: Currently the session cookie reader and writers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session cookie parsing and `Set-Cookie` construction
pub mod cookies;

pub use cookies::{clear_auth_cookie, get_cookie_value, set_auth_cookie};
