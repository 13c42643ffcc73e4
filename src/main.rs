//! Exógena Admin - Main Entry Point
//!
//! Console for the Exógena 2025 licensing back office: clients, sellers,
//! ERP serials, sales, payments, activations and key generation.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use exogena_admin_lib::{
    commands::{self, Cli},
    config::Config,
    logging,
    storage::SecureStorage,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // `.env` has to be loaded before clap reads its env fallbacks
    let mut config = Config::from_env();
    let cli = Cli::parse();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    logging::init(&config.log_dir());
    info!(api_url = %config.api_url, "Exógena Admin starting...");

    let storage = SecureStorage::open(&config.data_dir)
        .with_context(|| format!("opening session storage in {}", config.data_dir.display()))?;
    let state = AppState::new(&config.api_url, storage).context("building API client")?;

    Ok(commands::run(&state, cli.command).await)
}
