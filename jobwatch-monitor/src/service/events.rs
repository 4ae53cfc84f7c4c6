//! Notification sinks
//!
//! Every poll cycle reports each newly admitted job and then the updated
//! statistics to the registered sinks, in that order.

use colored::*;
use jobwatch_core::{Job, Stats};
use tracing::info;

/// Observer of poll-cycle outcomes
pub trait EventSink: Send + Sync {
    /// Called once per newly admitted job
    fn on_new_job(&self, job: &Job);

    /// Called after every cycle, whether or not anything new was found
    fn on_stats_changed(&self, stats: &Stats);
}

/// Prints notifications and a stats line to the terminal
pub struct ConsoleSink {
    notifications: bool,
}

impl ConsoleSink {
    pub fn new(notifications: bool) -> Self {
        Self { notifications }
    }
}

impl EventSink for ConsoleSink {
    fn on_new_job(&self, job: &Job) {
        if !self.notifications {
            return;
        }
        println!("{}", format_job(job));
    }

    fn on_stats_changed(&self, stats: &Stats) {
        println!("{}", format_stats(stats).dimmed());
    }
}

/// Emits tracing events
pub struct LogSink;

impl EventSink for LogSink {
    fn on_new_job(&self, job: &Job) {
        info!(
            job_id = %job.id,
            country = %job.country_code,
            budget = job.budget,
            "New job: {}",
            job.title
        );
    }

    fn on_stats_changed(&self, stats: &Stats) {
        info!(
            total_stored = stats.total_stored,
            new_this_session = stats.new_this_session,
            average_budget = stats.average_budget,
            "Stats updated"
        );
    }
}

/// Human-readable budget; zero means the listing did not state one
pub fn format_budget(budget: u64) -> String {
    if budget == 0 {
        "a combinar".to_string()
    } else {
        format!("${}", budget)
    }
}

fn format_job(job: &Job) -> String {
    format!(
        "  {} {}\n    {} · {} · {}\n    {}",
        "▸".cyan(),
        job.title.bold(),
        job.category,
        job.country,
        format_budget(job.budget).green(),
        job.url.dimmed()
    )
}

fn format_stats(stats: &Stats) -> String {
    let last_check = stats
        .last_check_time
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    format!(
        "stored: {} | new this session: {} | avg budget: {} | last check: {}",
        stats.total_stored,
        stats.new_this_session,
        format_budget(stats.average_budget),
        last_check
    )
}
