//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod categories;
mod console;
mod health;
mod once;
mod watch;

use anyhow::{Context, Result};
use clap::Subcommand;
use jobwatch_client::HarvesterClient;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, SettingsArgs};
use crate::repository::HttpListingSource;
use crate::scheduler::{BatchSource, CycleReport, Monitor};
use crate::service::{ConsoleSink, EventSink, LogSink};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Poll for new jobs until interrupted
    Watch {
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Run a single poll cycle and exit
    Once {
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Check that the harvester is reachable
    Health,
    /// List the category keys accepted by --category
    Categories,
}

/// Connection settings shared by every command
pub struct Connection {
    pub harvester_url: String,
    pub request_timeout: Duration,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, connection: Connection) -> Result<()> {
    match command {
        Commands::Watch { settings } => watch::run(load_config(connection, settings)?).await,
        Commands::Once { settings } => once::run(load_config(connection, settings)?).await,
        Commands::Health => health::run(&connect(&connection)?).await,
        Commands::Categories => {
            categories::list();
            Ok(())
        }
    }
}

fn load_config(connection: Connection, settings: SettingsArgs) -> Result<Config> {
    let config = Config {
        harvester_url: connection.harvester_url,
        request_timeout: connection.request_timeout,
        settings: settings.into(),
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn connect(connection: &Connection) -> Result<HarvesterClient> {
    HarvesterClient::with_timeout(&connection.harvester_url, connection.request_timeout)
        .context("Failed to create harvester client")
}

/// Builds a monitor wired to the harvester and the terminal
fn build_monitor(config: &Config) -> Result<Monitor> {
    let client = HarvesterClient::with_timeout(&config.harvester_url, config.request_timeout)
        .context("Failed to create harvester client")?;

    let sinks: Vec<Arc<dyn EventSink>> = vec![
        Arc::new(ConsoleSink::new(config.settings.enable_notifications)),
        Arc::new(LogSink),
    ];

    Ok(Monitor::new(
        Arc::new(HttpListingSource::new(client)),
        sinks,
        config.settings.clone(),
    ))
}

/// One-line summary of a cycle
fn describe_report(report: &CycleReport) -> String {
    let source = match report.source {
        BatchSource::Live => "live listings",
        BatchSource::Synthetic => "synthetic listings (harvester unavailable)",
    };
    format!(
        "{}: {} fetched, {} matched, {} new",
        source, report.fetched, report.matched, report.admitted
    )
}
