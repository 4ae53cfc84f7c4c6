//! Filter pipeline
//!
//! Category, country, minimum-budget and keyword predicates, applied
//! conjunctively and order-preserving.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{Category, Job};

/// User criteria a job must satisfy to be announced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    /// Accepted categories; empty accepts nothing
    pub categories: BTreeSet<Category>,

    /// Accepted upper-case country codes; empty accepts every country
    pub countries: BTreeSet<String>,

    /// Minimum budget, inclusive
    pub min_budget: f64,

    /// Lowercase keywords; empty disables keyword matching
    pub keywords: BTreeSet<String>,
}

impl FilterConfig {
    /// Builds a configuration, normalizing country codes to upper case and
    /// keywords to trimmed lowercase (blank keywords are dropped)
    pub fn new<C, K>(
        categories: impl IntoIterator<Item = Category>,
        countries: C,
        min_budget: f64,
        keywords: K,
    ) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Self {
            categories: categories.into_iter().collect(),
            countries: countries
                .into_iter()
                .map(|code| code.as_ref().trim().to_uppercase())
                .filter(|code| !code.is_empty())
                .collect(),
            min_budget,
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    /// Whether a single job passes every predicate
    pub fn matches(&self, job: &Job) -> bool {
        if !self.categories.contains(&job.category_id) {
            return false;
        }

        if !self.countries.is_empty() && !self.countries.contains(&job.country_code) {
            return false;
        }

        if (job.budget as f64) < self.min_budget {
            return false;
        }

        if !self.keywords.is_empty() {
            let text = job.search_text();
            if !self.keywords.iter().any(|keyword| text.contains(keyword.as_str())) {
                return false;
            }
        }

        true
    }

    /// Jobs of `batch` that pass, in input order
    pub fn apply(&self, batch: &[Job]) -> Vec<Job> {
        batch.iter().filter(|job| self.matches(job)).cloned().collect()
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(
            [Category::ItProgramming],
            ["BR"],
            0.0,
            std::iter::empty::<&str>(),
        )
    }
}
