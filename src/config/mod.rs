// ABOUTME: Configuration module for the tracker server
// ABOUTME: Exposes environment-driven server settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, DatabaseConfig, DatabaseUrl, Environment, HttpConfig, ServerConfig, StorageConfig,
};
