//! Scrape DTOs exchanged between the monitor and the harvester

use serde::{Deserialize, Serialize};

use crate::domain::Job;

/// Default upper bound, in seconds, for the harvester's upstream page load
///
/// Callers of `GET /api/scrape-jobs` should wait longer than this.
pub const UPSTREAM_FETCH_TIMEOUT_SECS: u64 = 30;

/// Query accepted by `GET /api/scrape-jobs`
///
/// Both fields are comma separated lists. The listing page is scoped to a
/// single category, so only the first category key is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeQuery {
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub countries: Option<String>,
}

impl ScrapeQuery {
    /// First non-empty entry of the categories list
    pub fn primary_category(&self) -> Option<&str> {
        first_entry(self.categories.as_deref())
    }

    /// First non-empty entry of the countries list
    pub fn primary_country(&self) -> Option<&str> {
        first_entry(self.countries.as_deref())
            .filter(|country| !country.eq_ignore_ascii_case("undefined"))
    }
}

fn first_entry(list: Option<&str>) -> Option<&str> {
    list?.split(',').map(str::trim).find(|entry| !entry.is_empty())
}

/// Response body of `GET /api/scrape-jobs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResponse {
    pub fn ok(jobs: Vec<Job>) -> Self {
        Self {
            success: true,
            count: jobs.len(),
            jobs,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            jobs: Vec::new(),
            error: Some(error.into()),
        }
    }
}
