use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{RangeArgs, TripCommands};

/// Plan a trip, invite guests and follow it from the terminal
///
/// Plann walks through the same steps as the mobile app: pick a destination
/// and a date range, add guests, confirm, and from then on this device
/// follows the created trip until it is removed.
#[derive(Parser)]
#[command(version, about, name = "plann")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/plann/plann.db
    #[arg(long, global = true, env = "PLANN_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Base URL of the trip service
    #[arg(
        long,
        global = true,
        env = "PLANN_API_URL",
        default_value = "http://localhost:3333"
    )]
    pub api_url: String,

    /// Name sent as the trip owner when creating a trip
    #[arg(long, global = true, env = "PLANN_OWNER_NAME")]
    pub owner_name: Option<String>,

    /// Email sent as the trip owner when creating a trip
    #[arg(long, global = true, env = "PLANN_OWNER_EMAIL")]
    pub owner_email: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Plann CLI
///
/// Without a command, the active trip status is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Fold calendar taps into a date range (offline)
    #[command(alias = "r")]
    Range(RangeArgs),
    /// Create, follow and manage the active trip
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
}
