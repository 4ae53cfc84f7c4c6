//! Monitor configuration
//!
//! Defines the user-tunable monitoring settings and the connection settings
//! for the harvester. Values come from command-line flags with `JOBWATCH_*`
//! environment fallbacks.

use clap::Args;
use jobwatch_core::dto::scrape::UPSTREAM_FETCH_TIMEOUT_SECS;
use jobwatch_core::{Category, FilterConfig};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;

/// Accepted poll interval, in seconds
pub const CHECK_INTERVAL_BOUNDS: RangeInclusive<u64> = 10..=3600;

pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_MAX_JOBS: usize = 50;

/// Harvester request timeout, with headroom over its own upstream fetch
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = UPSTREAM_FETCH_TIMEOUT_SECS + 5;

/// Rejected settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("check interval must be between {min} and {max} seconds, got {0}", min = CHECK_INTERVAL_BOUNDS.start(), max = CHECK_INTERVAL_BOUNDS.end())]
    IntervalOutOfRange(u64),

    #[error("max jobs must be at least 1")]
    ZeroCapacity,

    #[error("minimum budget must be a non-negative number, got {0}")]
    InvalidMinBudget(f64),
}

/// Monitoring settings
///
/// Filter criteria and capacity take effect from the next poll cycle, the
/// interval from the next start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub enable_notifications: bool,
    pub check_interval_seconds: u64,
    pub max_jobs: usize,
    pub categories: Vec<Category>,
    pub countries: Vec<String>,
    pub min_budget: f64,
    pub keywords: Vec<String>,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !CHECK_INTERVAL_BOUNDS.contains(&self.check_interval_seconds) {
            return Err(SettingsError::IntervalOutOfRange(
                self.check_interval_seconds,
            ));
        }

        if self.max_jobs == 0 {
            return Err(SettingsError::ZeroCapacity);
        }

        if !self.min_budget.is_finite() || self.min_budget < 0.0 {
            return Err(SettingsError::InvalidMinBudget(self.min_budget));
        }

        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }

    /// Store capacity; zero is clamped to one
    pub fn capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.max_jobs).unwrap_or(NonZeroUsize::MIN)
    }

    /// Category requested from the listing page
    ///
    /// The page is scoped to one category, so only the first is fetched.
    pub fn primary_category(&self) -> Category {
        self.categories.first().copied().unwrap_or_default()
    }

    pub fn filter(&self) -> FilterConfig {
        FilterConfig::new(
            self.categories.iter().copied(),
            &self.countries,
            self.min_budget,
            &self.keywords,
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_notifications: true,
            check_interval_seconds: DEFAULT_CHECK_INTERVAL_SECS,
            max_jobs: DEFAULT_MAX_JOBS,
            categories: vec![Category::default()],
            countries: vec!["BR".to_string()],
            min_budget: 0.0,
            keywords: Vec::new(),
        }
    }
}

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Harvester base URL (e.g., "http://localhost:4000")
    pub harvester_url: String,

    /// Upper bound for one harvester request
    pub request_timeout: Duration,

    pub settings: Settings,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.harvester_url.is_empty() {
            anyhow::bail!("harvester_url cannot be empty");
        }

        if !self.harvester_url.starts_with("http://") && !self.harvester_url.starts_with("https://")
        {
            anyhow::bail!("harvester_url must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.settings.categories.is_empty() {
            anyhow::bail!("at least one category is required");
        }

        self.settings.validate()?;

        Ok(())
    }
}

/// Monitoring settings as command-line flags
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Category keys to accept (see `jobwatch categories`)
    #[arg(
        short,
        long = "category",
        env = "JOBWATCH_CATEGORIES",
        value_delimiter = ',',
        default_value = "ti-programacao"
    )]
    pub categories: Vec<Category>,

    /// Two-letter country codes to accept; empty accepts every country
    #[arg(
        long = "country",
        env = "JOBWATCH_COUNTRIES",
        value_delimiter = ',',
        default_value = "BR"
    )]
    pub countries: Vec<String>,

    /// Minimum budget, inclusive
    #[arg(long, env = "JOBWATCH_MIN_BUDGET", default_value_t = 0.0)]
    pub min_budget: f64,

    /// Keywords matched against title, description and skills
    #[arg(short, long = "keyword", env = "JOBWATCH_KEYWORDS", value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Seconds between poll cycles
    #[arg(short, long, env = "JOBWATCH_INTERVAL", default_value_t = DEFAULT_CHECK_INTERVAL_SECS)]
    pub interval: u64,

    /// Number of jobs remembered for deduplication
    #[arg(long, env = "JOBWATCH_MAX_JOBS", default_value_t = DEFAULT_MAX_JOBS)]
    pub max_jobs: usize,

    /// Print only the stats line, not individual notifications
    #[arg(long, env = "JOBWATCH_QUIET")]
    pub quiet: bool,
}

impl From<SettingsArgs> for Settings {
    fn from(args: SettingsArgs) -> Self {
        Self {
            enable_notifications: !args.quiet,
            check_interval_seconds: args.interval,
            max_jobs: args.max_jobs,
            categories: args.categories,
            countries: args.countries,
            min_budget: args.min_budget,
            keywords: args.keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            harvester_url: "http://localhost:4000".to_string(),
            request_timeout: Duration::from_secs(30),
            settings: Settings::default(),
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.check_interval(), Duration::from_secs(30));
        assert_eq!(settings.capacity().get(), 50);
        assert_eq!(settings.primary_category(), Category::ItProgramming);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_interval_bounds() {
        let mut settings = Settings::default();

        settings.check_interval_seconds = 9;
        assert_eq!(
            settings.validate(),
            Err(SettingsError::IntervalOutOfRange(9))
        );

        settings.check_interval_seconds = 10;
        assert!(settings.validate().is_ok());

        settings.check_interval_seconds = 3600;
        assert!(settings.validate().is_ok());

        settings.check_interval_seconds = 3601;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_capacity_and_budget_validation() {
        let mut settings = Settings::default();
        settings.max_jobs = 0;
        assert_eq!(settings.validate(), Err(SettingsError::ZeroCapacity));

        settings.max_jobs = 1;
        settings.min_budget = -1.0;
        assert!(settings.validate().is_err());

        settings.min_budget = f64::NAN;
        assert!(settings.validate().is_err());

        settings.min_budget = 250.0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_filter_normalizes_criteria() {
        let settings = Settings {
            countries: vec!["ar".to_string()],
            keywords: vec![" React ".to_string()],
            ..Settings::default()
        };
        let filter = settings.filter();

        assert!(filter.countries.contains("AR"));
        assert!(filter.keywords.contains("react"));
        assert!(filter.categories.contains(&Category::ItProgramming));
    }

    #[test]
    fn test_settings_json_shape() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["checkIntervalSeconds"], 30);
        assert_eq!(json["maxJobs"], 50);
        assert_eq!(json["categories"][0], "ti-programacao");

        let parsed: Settings = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();
        assert!(config.validate().is_ok());

        config.harvester_url = "localhost:4000".to_string();
        assert!(config.validate().is_err());

        config.harvester_url = "http://localhost:4000".to_string();
        config.settings.categories.clear();
        assert!(config.validate().is_err());

        config.settings.categories = vec![Category::Legal];
        config.settings.max_jobs = 0;
        assert!(config.validate().is_err());
    }
}
