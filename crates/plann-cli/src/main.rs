//! Plann CLI Application
//!
//! Command-line host for the plann trip planner. Remote trips are reached
//! over HTTP; the active trip pointer lives in a local SQLite file.

mod args;
mod cli;
mod prompt;
mod remote;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, TripCommands};
use log::info;
use plann_core::ActiveTripStoreBuilder;
use remote::{HttpTripService, Owner};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        api_url,
        owner_name,
        owner_email,
        no_color,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    // Date selection never touches storage or the network.
    if let Some(Range(args)) = &command {
        return cli::show_range(args, &renderer);
    }

    let store = ActiveTripStoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize active trip store")?;

    let owner = owner_name
        .zip(owner_email)
        .map(|(name, email)| Owner { name, email });
    let remote = HttpTripService::new(&api_url, owner).context("Failed to build HTTP client")?;

    info!("Plann started against {api_url}");

    let cli = Cli::new(store, Arc::new(remote), renderer);
    match command {
        Some(Trip { command }) => cli.handle_trip_command(command).await,
        Some(Range(_)) | None => cli.handle_trip_command(TripCommands::Status).await,
    }
}
