//! Jobwatch Monitor
//!
//! Polls the harvester for freelance listings, keeps the ones matching the
//! configured filters and announces each job the first time it is seen.
//!
//! Architecture:
//! - Configuration: Settings from flags with environment fallbacks
//! - Repositories: HTTP communication with the harvester
//! - Services: Notification sinks (terminal, tracing)
//! - Scheduler: Idle/Monitoring state machine and poll cycles
//!
//! When the harvester cannot be reached, cycles run on synthetic listings so
//! the session keeps going.

mod commands;
mod config;
mod repository;
mod scheduler;
mod service;
mod session;

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{Commands, Connection, handle_command};
use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;

#[derive(Parser)]
#[command(name = "jobwatch")]
#[command(about = "Watch a freelance marketplace for new matching jobs", long_about = None)]
struct Cli {
    /// Harvester URL
    #[arg(
        long,
        global = true,
        env = "JOBWATCH_HARVESTER_URL",
        default_value = "http://localhost:4000"
    )]
    harvester_url: String,

    /// Seconds before a harvester request is abandoned
    #[arg(long, global = true, env = "JOBWATCH_REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobwatch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let connection = Connection {
        harvester_url: cli.harvester_url,
        request_timeout: Duration::from_secs(cli.request_timeout),
    };

    handle_command(cli.command, connection).await
}
