//! Airshed server entry point

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use airshed_server::config::ServerConfig;
use airshed_server::osm::{self, GeoBounds};
use airshed_server::router::build_router;
use airshed_server::server::start_server;
use airshed_server::state::AppState;

/// Street-level pollutant dispersion service
#[derive(Parser, Debug)]
#[command(name = "airshed-server")]
#[command(about = "Street-level pollutant dispersion service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Path to a TOML configuration file (defaults apply without one)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Fetch the drivable road network for a bounding box from the Overpass
    /// API and write the network document
    FetchMap {
        /// Northern latitude bound (degrees)
        #[arg(long)]
        north: f64,

        /// Southern latitude bound (degrees)
        #[arg(long)]
        south: f64,

        /// Eastern longitude bound (degrees)
        #[arg(long)]
        east: f64,

        /// Western longitude bound (degrees)
        #[arg(long)]
        west: f64,

        /// Output path for the network document
        #[arg(short, long, default_value = "network.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Serve { config } => {
            let config = match config {
                Some(path) => ServerConfig::load(&path)?,
                None => ServerConfig::default(),
            };
            let state = Arc::new(AppState::from_config(&config));
            let router = build_router(state, &config.cors_origins);
            start_server(&config.listen, router).await?;
        }
        Command::FetchMap {
            north,
            south,
            east,
            west,
            output,
        } => {
            let bounds = GeoBounds {
                north,
                south,
                east,
                west,
            };
            osm::fetch_map(bounds, &output).await?;
        }
    }

    Ok(())
}
