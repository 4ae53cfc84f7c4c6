//! Record normalizer
//!
//! Turns loosely structured candidate elements from a listing page into
//! canonical [`Job`] records. Every field is resolved by an ordered chain of
//! extractors; optional fields fall back to a default and required fields
//! (title, url) drop the candidate. A candidate whose sub-structure cannot be
//! read is skipped, so normalization as a whole never fails.

pub mod fragment;

pub use fragment::{ExtractError, Fragment, Hint, Node};

use chrono::{DateTime, Utc};
use tracing::debug;
use url::Url;

use crate::domain::job::live_job_id;
use crate::domain::{Category, HOME_COUNTRY_NAME, Job, country_code};

/// Candidates examined per page; the rest are ignored
pub const MAX_CANDIDATES: usize = 20;

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Maximum number of skill tags kept per job
pub const MAX_SKILLS: usize = 5;

/// Site that relative listing links are resolved against
pub const LISTING_BASE_URL: &str = "https://www.workana.com";

/// Title fallback chain, most specific first
const TITLE_CHAIN: &[Hint] = &[Hint::Heading, Hint::TitleTagged, Hint::ProjectLink];

type CountryExtractor = fn(&Node) -> Option<&str>;

/// Country fallback chain over the location node
const COUNTRY_CHAIN: &[CountryExtractor] = &[node_text, flag_alt];

/// Normalizes candidate elements into jobs of one category
#[derive(Debug, Clone)]
pub struct Normalizer {
    base_url: Url,
}

impl Normalizer {
    /// Creates a normalizer resolving relative links against `base_url`
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Normalizes up to [`MAX_CANDIDATES`] candidates
    ///
    /// The listing page is scoped to `category`, so every produced job carries
    /// it. `captured_at` becomes each job's timestamp. Output order follows
    /// candidate order.
    pub fn normalize<F, I>(
        &self,
        candidates: I,
        category: Category,
        captured_at: DateTime<Utc>,
    ) -> Vec<Job>
    where
        F: Fragment,
        I: IntoIterator<Item = F>,
    {
        candidates
            .into_iter()
            .take(MAX_CANDIDATES)
            .enumerate()
            .filter_map(|(index, candidate)| {
                match self.normalize_one(&candidate, category, captured_at) {
                    Ok(Some(job)) => Some(job),
                    Ok(None) => None,
                    Err(e) => {
                        debug!("Skipping candidate {}: {}", index, e);
                        None
                    }
                }
            })
            .collect()
    }

    fn normalize_one<F: Fragment>(
        &self,
        candidate: &F,
        category: Category,
        captured_at: DateTime<Utc>,
    ) -> Result<Option<Job>, ExtractError> {
        let Some(title) = first_text(candidate, TITLE_CHAIN)? else {
            return Ok(None);
        };

        let Some(url) = self.resolve_url(candidate)? else {
            debug!("Candidate '{}' has no detail link", title);
            return Ok(None);
        };

        let budget = candidate
            .find_first(&[Hint::Price])?
            .map(|node| parse_budget(&node.text))
            .unwrap_or(0);

        let description = candidate
            .find_first(&[Hint::Description])?
            .map(|node| truncate_chars(node.text.trim(), MAX_DESCRIPTION_CHARS))
            .unwrap_or_default();

        let skills = candidate
            .find_all(Hint::Tag)?
            .iter()
            .map(|node| node.text.trim())
            .filter(|skill| !skill.is_empty())
            .take(MAX_SKILLS)
            .map(str::to_string)
            .collect();

        let country = candidate
            .find_first(&[Hint::Location])?
            .and_then(|node| {
                COUNTRY_CHAIN
                    .iter()
                    .filter_map(|extract| extract(&node))
                    .map(str::trim)
                    .find(|text| !text.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| HOME_COUNTRY_NAME.to_string());

        Ok(Some(Job {
            id: live_job_id(&url, &mut rand::rng()),
            title,
            description,
            budget,
            category: category.display_name().to_string(),
            category_id: category,
            country_code: country_code(&country).to_string(),
            country,
            url: url.to_string(),
            skills,
            timestamp: captured_at,
        }))
    }

    fn resolve_url<F: Fragment>(&self, candidate: &F) -> Result<Option<Url>, ExtractError> {
        let href = candidate
            .find_first(&[Hint::DetailLink])?
            .and_then(|node| node.attr("href").map(|href| href.trim().to_string()))
            .filter(|href| !href.is_empty());

        Ok(href.and_then(|href| self.base_url.join(&href).ok()))
    }
}

/// First non-empty trimmed text along an ordered hint chain
fn first_text<F: Fragment>(candidate: &F, chain: &[Hint]) -> Result<Option<String>, ExtractError> {
    for hint in chain {
        if let Some(node) = candidate.find_first(&[*hint])? {
            let text = node.text.trim();
            if !text.is_empty() {
                return Ok(Some(text.to_string()));
            }
        }
    }
    Ok(None)
}

fn node_text(node: &Node) -> Option<&str> {
    Some(node.text.as_str())
}

fn flag_alt(node: &Node) -> Option<&str> {
    node.attr("alt")
}

/// Keeps only the digits of a price label; unparsable labels mean unspecified
fn parse_budget(text: &str) -> u64 {
    text.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Candidate {
        nodes: Vec<(Hint, Node)>,
        broken: bool,
    }

    impl Candidate {
        fn with(mut self, hint: Hint, node: Node) -> Self {
            self.nodes.push((hint, node));
            self
        }

        fn listing(title: &str, href: &str) -> Self {
            Candidate::default()
                .with(Hint::Heading, Node::new(title))
                .with(Hint::DetailLink, Node::new("").with_attr("href", href))
        }
    }

    impl Fragment for Candidate {
        fn find_all(&self, hint: Hint) -> Result<Vec<Node>, ExtractError> {
            if self.broken {
                return Err(ExtractError::Malformed("detached element".to_string()));
            }
            Ok(self
                .nodes
                .iter()
                .filter(|(h, _)| *h == hint)
                .map(|(_, node)| node.clone())
                .collect())
        }
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(Url::parse(LISTING_BASE_URL).unwrap())
    }

    fn run(candidates: Vec<Candidate>) -> Vec<Job> {
        normalizer().normalize(candidates, Category::ItProgramming, Utc::now())
    }

    #[test]
    fn test_untitled_candidate_is_dropped_in_order() {
        let jobs = run(vec![
            Candidate::listing("Site em React", "/jobs/site-react"),
            Candidate::default()
                .with(Hint::DetailLink, Node::new("").with_attr("href", "/jobs/sem-titulo")),
            Candidate::listing("App Flutter", "/jobs/app-flutter"),
        ]);

        let titles: Vec<_> = jobs.iter().map(|job| job.title.as_str()).collect();
        assert_eq!(titles, vec!["Site em React", "App Flutter"]);
    }

    #[test]
    fn test_candidate_without_link_is_dropped() {
        let jobs = run(vec![
            Candidate::default().with(Hint::Heading, Node::new("Sem link")),
            Candidate::listing("Com link", "   "),
        ]);
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_examines_at_most_twenty_candidates() {
        let candidates = (0..25)
            .map(|i| Candidate::listing(&format!("Job {i}"), &format!("/jobs/job-{i}")))
            .collect();

        let jobs = run(candidates);
        assert_eq!(jobs.len(), MAX_CANDIDATES);
        assert_eq!(jobs.last().map(|job| job.id.as_str()), Some("job_real_job-19"));
    }

    #[test]
    fn test_broken_candidate_is_skipped() {
        let broken = Candidate {
            broken: true,
            ..Candidate::listing("Quebrado", "/jobs/quebrado")
        };

        let jobs = run(vec![broken, Candidate::listing("Ok", "/jobs/ok")]);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Ok");
    }

    #[test]
    fn test_title_chain_skips_empty_heading() {
        let candidate = Candidate::default()
            .with(Hint::Heading, Node::new("   "))
            .with(Hint::ProjectLink, Node::new("Pelo link"))
            .with(Hint::TitleTagged, Node::new("  Pela classe  "))
            .with(Hint::DetailLink, Node::new("").with_attr("href", "/jobs/x"));

        let jobs = run(vec![candidate]);
        assert_eq!(jobs[0].title, "Pela classe");
    }

    #[test]
    fn test_fields_are_resolved() {
        let candidate = Candidate::listing("  Loja virtual  ", "/jobs/loja-virtual")
            .with(Hint::Price, Node::new("USD 1,500"))
            .with(Hint::Description, Node::new("  Preciso de uma loja.  "))
            .with(Hint::Tag, Node::new(" Shopify "))
            .with(Hint::Tag, Node::new(""))
            .with(Hint::Tag, Node::new("CSS"))
            .with(Hint::Location, Node::new("Argentina"));

        let job = run(vec![candidate]).remove(0);
        assert_eq!(job.id, "job_real_loja-virtual");
        assert_eq!(job.title, "Loja virtual");
        assert_eq!(job.url, "https://www.workana.com/jobs/loja-virtual");
        assert_eq!(job.budget, 1500);
        assert_eq!(job.description, "Preciso de uma loja.");
        assert_eq!(job.skills, vec!["Shopify", "CSS"]);
        assert_eq!(job.country, "Argentina");
        assert_eq!(job.country_code, "AR");
        assert_eq!(job.category, "TI e Programação");
        assert_eq!(job.category_id, Category::ItProgramming);
    }

    #[test]
    fn test_defaults_for_missing_optional_fields() {
        let job = run(vec![Candidate::listing("Simples", "/jobs/simples")]).remove(0);
        assert_eq!(job.budget, 0);
        assert_eq!(job.description, "");
        assert!(job.skills.is_empty());
        assert_eq!(job.country, HOME_COUNTRY_NAME);
        assert_eq!(job.country_code, "BR");
    }

    #[test]
    fn test_unparsable_budget_is_unspecified() {
        let candidate = Candidate::listing("A combinar", "/jobs/a")
            .with(Hint::Price, Node::new("A combinar"));
        assert_eq!(run(vec![candidate])[0].budget, 0);

        let candidate = Candidate::listing("Enorme", "/jobs/b")
            .with(Hint::Price, Node::new("9".repeat(40)));
        assert_eq!(run(vec![candidate])[0].budget, 0);
    }

    #[test]
    fn test_description_truncated_by_chars() {
        let candidate = Candidate::listing("Longo", "/jobs/longo")
            .with(Hint::Description, Node::new("ç".repeat(300)));

        let job = run(vec![candidate]).remove(0);
        assert_eq!(job.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_skills_capped() {
        let candidate = (0..8).fold(Candidate::listing("Tags", "/jobs/tags"), |c, i| {
            c.with(Hint::Tag, Node::new(format!("skill-{i}")))
        });

        let job = run(vec![candidate]).remove(0);
        assert_eq!(
            job.skills,
            vec!["skill-0", "skill-1", "skill-2", "skill-3", "skill-4"]
        );
    }

    #[test]
    fn test_country_from_flag_alt_text() {
        let candidate = Candidate::listing("Bandeira", "/jobs/bandeira")
            .with(Hint::Location, Node::new("  ").with_attr("alt", " Chile "));

        let job = run(vec![candidate]).remove(0);
        assert_eq!(job.country, "Chile");
        assert_eq!(job.country_code, "CL");
    }

    #[test]
    fn test_absolute_links_are_kept() {
        let candidate = Candidate::listing("Absoluto", "https://www.workana.com/jobs/abs");
        let job = run(vec![candidate]).remove(0);
        assert_eq!(job.url, "https://www.workana.com/jobs/abs");
    }

    #[test]
    fn test_same_listing_same_id() {
        let first = run(vec![Candidate::listing("A", "/jobs/estavel")]);
        let second = run(vec![Candidate::listing("A", "/jobs/estavel")]);
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn test_trailing_slash_listing_same_id() {
        let first = run(vec![Candidate::listing("Loja", "/jobs/loja-virtual/")]);
        let second = run(vec![Candidate::listing("Loja", "/jobs/loja-virtual/")]);

        assert_eq!(first[0].url, "https://www.workana.com/jobs/loja-virtual/");
        assert_eq!(first[0].id, "job_real_loja-virtual");
        assert_eq!(first[0].id, second[0].id);
    }
}
