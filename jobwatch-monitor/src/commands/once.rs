//! Single poll cycle

use anyhow::Result;
use colored::*;

use super::{build_monitor, describe_report};
use crate::config::Config;

pub async fn run(config: Config) -> Result<()> {
    let monitor = build_monitor(&config)?;

    let report = monitor.poll_once().await;
    println!("{}", describe_report(&report).bold());

    Ok(())
}
