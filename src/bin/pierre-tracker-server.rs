// ABOUTME: Fitness tracker server binary
// ABOUTME: Loads configuration, opens storage, builds the FAQ matcher and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pierre Tracker Server Binary
//!
//! Starts the weight, nutrition and workout tracking API with cookie sessions and
//! SQLite persistence.

use anyhow::Result;
use clap::Parser;
use pierre_tracker::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    faq::load_faq_matcher,
    logging::LoggingConfig,
    resources::ServerResources,
    server::run_server,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pierre-tracker-server")]
#[command(about = "Pierre Tracker - weight trends, nutrition, workouts and fitness FAQ")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env().init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url {
        config.database.url = DatabaseUrl::parse_url(&url)?;
    }
    config.validate()?;

    info!("Starting Pierre Tracker");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    let faq_matcher = load_faq_matcher(&config.storage).await?;
    let resources = Arc::new(ServerResources::new(config, database, faq_matcher).await?);

    if let Err(e) = run_server(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    info!("Server shut down cleanly");
    Ok(())
}
