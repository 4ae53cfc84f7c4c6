//! Continuous monitoring

use anyhow::{Context, Result};
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use super::{build_monitor, console, describe_report};
use crate::config::Config;
use crate::scheduler::Monitor;
use crate::service::events::format_budget;

pub async fn run(config: Config) -> Result<()> {
    let mut monitor = build_monitor(&config)?;
    let settings = monitor.settings();

    let categories: Vec<&str> = settings.categories.iter().map(|c| c.display_name()).collect();
    println!(
        "{} {} every {}s (press Ctrl-C to quit)",
        "Watching".green().bold(),
        categories.join(", "),
        settings.check_interval_seconds
    );

    if let Some(report) = monitor.start().await? {
        println!("{}", describe_report(&report).dimmed());
    }
    debug!(state = ?monitor.state(), "Monitor started");

    println!("{}", console::HELP.dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                break;
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => handle_line(&mut monitor, &line).await,
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!("Failed to read commands from stdin: {}", e);
                    stdin_open = false;
                }
            },
        }
    }

    println!();
    println!("{}", "Stopping...".yellow());
    monitor.stop().await;

    let stats = monitor.stats();
    println!(
        "Session {}: {} new job(s), {} stored, average budget {}",
        monitor.session_id().to_string().dimmed(),
        stats.new_this_session,
        stats.total_stored,
        format_budget(stats.average_budget)
    );
    if let Some(latest) = monitor.jobs().last() {
        println!("Latest: {} {}", latest.title.bold(), latest.url.dimmed());
    }

    Ok(())
}

async fn handle_line(monitor: &mut Monitor, line: &str) {
    let command = match console::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return,
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            return;
        }
    };

    match console::execute(monitor, command).await {
        Ok(message) => println!("{} {}", "✓".green(), message),
        Err(e) => println!("{} {}", "✗".red(), e),
    }
}
