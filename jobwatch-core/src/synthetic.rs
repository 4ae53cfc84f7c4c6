//! Synthetic listings
//!
//! Stand-in data used when the live listing page cannot be reached. Records
//! follow the same [`Job`] schema as normalized ones, so nothing downstream
//! needs to know where a batch came from.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::domain::job::random_token;
use crate::domain::{Category, Job};
use crate::normalize::LISTING_BASE_URL;

/// Inclusive range of jobs produced per batch
pub const BATCH_SIZE: std::ops::RangeInclusive<usize> = 1..=5;

/// Half-open budget range of synthetic jobs
pub const BUDGET_RANGE: std::ops::Range<u64> = 100..2100;

const CATEGORIES: [Category; 4] = [
    Category::ItProgramming,
    Category::DesignMultimedia,
    Category::WritingTranslation,
    Category::SalesMarketing,
];

const COUNTRIES: [(&str, &str); 8] = [
    ("BR", "Brasil"),
    ("US", "Estados Unidos"),
    ("AR", "Argentina"),
    ("MX", "México"),
    ("CO", "Colômbia"),
    ("CL", "Chile"),
    ("ES", "Espanha"),
    ("PT", "Portugal"),
];

const TITLES: [&str; 10] = [
    "Desenvolvimento de Website em React",
    "Designer Gráfico para Logo",
    "Tradução PT-EN de Conteúdo Técnico",
    "Campanha de Marketing Digital",
    "Desenvolvimento de API REST",
    "Criação de Identidade Visual",
    "Redação de Artigos SEO",
    "Desenvolvimento Mobile Flutter",
    "Edição de Vídeos Promocionais",
    "Consultoria em Python",
];

const SKILLS: [&str; 4] = ["JavaScript", "React", "Node.js", "CSS"];

const DESCRIPTION: &str = "Descrição detalhada do projeto...";

/// Generates plausible random jobs from a fixed pool
pub struct SyntheticSource<R> {
    rng: R,
}

impl<R: Rng> SyntheticSource<R> {
    /// Creates a source drawing from `rng`; pass a seeded generator for
    /// reproducible batches
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Produces a batch of 1 to 5 jobs stamped with `now`
    pub fn generate(&mut self, now: DateTime<Utc>) -> Vec<Job> {
        let count = self.rng.random_range(BATCH_SIZE);
        (0..count).map(|_| self.job(now)).collect()
    }

    fn job(&mut self, now: DateTime<Utc>) -> Job {
        let rng = &mut self.rng;

        let category = *CATEGORIES.choose(rng).unwrap_or(&Category::ItProgramming);
        let (country_code, country) = *COUNTRIES.choose(rng).unwrap_or(&COUNTRIES[0]);
        let title = *TITLES.choose(rng).unwrap_or(&TITLES[0]);
        let skill_count = rng.random_range(1..=3);

        Job {
            id: format!("job_{}_{}", now.timestamp_millis(), random_token(rng)),
            title: title.to_string(),
            description: DESCRIPTION.to_string(),
            budget: rng.random_range(BUDGET_RANGE),
            category: category.display_name().to_string(),
            category_id: category,
            country: country.to_string(),
            country_code: country_code.to_string(),
            url: format!(
                "{}/jobs?category={}&language=pt",
                LISTING_BASE_URL,
                category.upstream_slug()
            ),
            skills: SKILLS[..skill_count].iter().map(|s| s.to_string()).collect(),
            timestamp: now,
        }
    }
}
