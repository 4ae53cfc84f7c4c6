//! Job domain types

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use url::Url;

use super::category::Category;

/// Prefix of ids derived from a live listing URL
pub const LIVE_ID_PREFIX: &str = "job_real_";

/// Length of the random base-36 token used when no stable id is available
pub const TOKEN_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Canonical record of one freelance listing
///
/// Produced by the normalizer (live markup) or the synthetic source, and
/// shared unchanged by the filter, the store and the notification sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Budget estimate; `0` means unspecified
    pub budget: u64,
    /// Display name of the category
    pub category: String,
    pub category_id: Category,
    /// Display name of the country
    pub country: String,
    pub country_code: String,
    pub url: String,
    pub skills: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Job {
    /// Text searched by keyword filters, lowercased
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.skills.join(" ")
        )
        .to_lowercase()
    }
}

/// Derives a stable job id from a listing URL
///
/// Uses the last non-empty path segment, so repeated fetches of the same
/// listing yield the same id even with a trailing slash. Falls back to a
/// random token when the path has no non-empty segment at all.
pub fn live_job_id<R: Rng + ?Sized>(url: &Url, rng: &mut R) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|segment| !segment.is_empty()).next_back())
        .map(str::to_string)
        .unwrap_or_else(|| random_token(rng));

    format!("{LIVE_ID_PREFIX}{segment}")
}

/// Generates a random lowercase base-36 token
pub fn random_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..TOKEN_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_live_id_uses_trailing_segment() {
        let mut rng = StdRng::seed_from_u64(1);
        let url = Url::parse("https://www.workana.com/job/landing-page-react?ref=home").unwrap();

        assert_eq!(live_job_id(&url, &mut rng), "job_real_landing-page-react");
        // Stable across calls
        assert_eq!(live_job_id(&url, &mut rng), "job_real_landing-page-react");
    }

    #[test]
    fn test_live_id_ignores_trailing_slash() {
        let url = Url::parse("https://www.workana.com/jobs/loja-virtual/").unwrap();

        let first = live_job_id(&url, &mut StdRng::seed_from_u64(1));
        let second = live_job_id(&url, &mut StdRng::seed_from_u64(2));
        assert_eq!(first, "job_real_loja-virtual");
        assert_eq!(first, second);
    }

    #[test]
    fn test_live_id_falls_back_to_token() {
        let mut rng = StdRng::seed_from_u64(1);
        let url = Url::parse("https://www.workana.com/").unwrap();

        let id = live_job_id(&url, &mut rng);
        assert!(id.starts_with(LIVE_ID_PREFIX));
        assert_eq!(id.len(), LIVE_ID_PREFIX.len() + TOKEN_LEN);
    }

    #[test]
    fn test_random_token_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let token = random_token(&mut rng);
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
