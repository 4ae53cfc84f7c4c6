//! Interactive commands read from stdin while watching
//!
//! ```text
//! clear                      forget known jobs and reset counters
//! stats                      print current statistics
//! pause | resume             stop or restart polling
//! set categories <k1,k2>     replace accepted categories
//! set countries <c1,c2>      replace accepted countries (empty: any)
//! set keywords <w1,w2>       replace keywords (empty: none)
//! set min-budget <n>
//! set max-jobs <n>
//! set interval <seconds>     applied on the next resume
//! help
//! ```

use anyhow::{Result, anyhow, bail};
use jobwatch_core::Category;

use super::describe_report;
use crate::config::Settings;
use crate::scheduler::{Monitor, MonitorError, MonitorState};
use crate::service::events::format_budget;

pub const HELP: &str = "commands: clear, stats, pause, resume, help, \
set <categories|countries|keywords|min-budget|max-jobs|interval> <value>";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Clear,
    Stats,
    Pause,
    Resume,
    Help,
    Set(SettingUpdate),
}

/// A single settings change
#[derive(Debug, Clone, PartialEq)]
pub enum SettingUpdate {
    Categories(Vec<Category>),
    Countries(Vec<String>),
    Keywords(Vec<String>),
    MinBudget(f64),
    MaxJobs(usize),
    Interval(u64),
}

impl SettingUpdate {
    pub fn apply(self, settings: &mut Settings) {
        match self {
            SettingUpdate::Categories(categories) => settings.categories = categories,
            SettingUpdate::Countries(countries) => settings.countries = countries,
            SettingUpdate::Keywords(keywords) => settings.keywords = keywords,
            SettingUpdate::MinBudget(min_budget) => settings.min_budget = min_budget,
            SettingUpdate::MaxJobs(max_jobs) => settings.max_jobs = max_jobs,
            SettingUpdate::Interval(seconds) => settings.check_interval_seconds = seconds,
        }
    }
}

/// Parses one input line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<ConsoleCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command = match word.to_lowercase().as_str() {
        "clear" => ConsoleCommand::Clear,
        "stats" => ConsoleCommand::Stats,
        "pause" => ConsoleCommand::Pause,
        "resume" => ConsoleCommand::Resume,
        "help" | "?" => ConsoleCommand::Help,
        "set" => ConsoleCommand::Set(parse_update(rest.trim())?),
        other => bail!("unknown command '{}' ({})", other, HELP),
    };

    Ok(Some(command))
}

fn parse_update(input: &str) -> Result<SettingUpdate> {
    let (key, value) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    let value = value.trim();

    let update = match key {
        "categories" => SettingUpdate::Categories(
            list(value)
                .map(|key| key.parse::<Category>())
                .collect::<Result<_, _>>()?,
        ),
        "countries" => SettingUpdate::Countries(list(value).map(str::to_string).collect()),
        "keywords" => SettingUpdate::Keywords(list(value).map(str::to_string).collect()),
        "min-budget" => SettingUpdate::MinBudget(number(key, value)?),
        "max-jobs" => SettingUpdate::MaxJobs(number(key, value)?),
        "interval" => SettingUpdate::Interval(number(key, value)?),
        "" => bail!("missing setting name ({})", HELP),
        other => bail!("unknown setting '{}'", other),
    };

    Ok(update)
}

fn list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

fn number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("{} expects a number, got '{}'", key, value))
}

/// Runs a command against the monitor and describes the outcome
pub async fn execute(monitor: &mut Monitor, command: ConsoleCommand) -> Result<String> {
    match command {
        ConsoleCommand::Clear => {
            monitor.clear();
            Ok("known jobs cleared".to_string())
        }
        ConsoleCommand::Stats => {
            let stats = monitor.stats();
            Ok(format!(
                "{:?}: {} stored, {} new this session, average budget {}",
                monitor.state(),
                stats.total_stored,
                stats.new_this_session,
                format_budget(stats.average_budget)
            ))
        }
        ConsoleCommand::Pause => {
            if monitor.state() == MonitorState::Idle {
                return Ok("already paused".to_string());
            }
            monitor.stop().await;
            Ok("paused".to_string())
        }
        ConsoleCommand::Resume => match monitor.start().await {
            Ok(Some(report)) => Ok(format!("resumed, {}", describe_report(&report))),
            Ok(None) => Ok("already watching".to_string()),
            Err(MonitorError::NoCategories) => {
                bail!("{} (try `set categories ti-programacao`)", MonitorError::NoCategories)
            }
            Err(e) => Err(e.into()),
        },
        ConsoleCommand::Help => Ok(HELP.to_string()),
        ConsoleCommand::Set(update) => {
            let applies_on_resume = matches!(update, SettingUpdate::Interval(_))
                && monitor.state() == MonitorState::Monitoring;

            let mut settings = monitor.settings();
            update.apply(&mut settings);
            monitor.update_settings(settings)?;

            if applies_on_resume {
                Ok("interval saved; pause and resume to apply it".to_string())
            } else {
                Ok("settings updated".to_string())
            }
        }
    }
}
