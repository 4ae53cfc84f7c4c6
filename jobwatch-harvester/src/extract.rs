//! HTML extraction
//!
//! Adapts parsed listing-page HTML to the normalizer's [`Fragment`] interface.
//! Each structural [`Hint`] maps to a CSS selector list tuned to the
//! marketplace markup.

use chrono::{DateTime, Utc};
use jobwatch_core::normalize::{ExtractError, Fragment, Hint, Node, Normalizer};
use jobwatch_core::{Category, Job};
use scraper::{ElementRef, Html, Selector};

/// Elements that each hold one listing
pub const CANDIDATE_SELECTOR: &str =
    r#"[class*="project-item"], .project, [data-testid*="project"]"#;

/// CSS selectors for a structural hint
pub fn hint_selector(hint: Hint) -> &'static str {
    match hint {
        Hint::Heading => "h2, h3",
        Hint::TitleTagged => r#"[class*="title"]"#,
        Hint::ProjectLink => r#"a[class*="project"]"#,
        Hint::DetailLink => r#"a[href*="/projects/"], a[href*="/jobs/"]"#,
        Hint::Price => r#"[class*="budget"], [class*="price"], [class*="amount"]"#,
        Hint::Description => r#"p, [class*="description"]"#,
        Hint::Tag => r#"[class*="skill"], [class*="tag"], .badge"#,
        Hint::Location => r#"[class*="country"], [class*="location"], img[alt*="flag"]"#,
    }
}

const HINTS: [Hint; 8] = [
    Hint::Heading,
    Hint::TitleTagged,
    Hint::ProjectLink,
    Hint::DetailLink,
    Hint::Price,
    Hint::Description,
    Hint::Tag,
    Hint::Location,
];

/// Parsed selectors for every hint, built once per page
pub struct HintSelectors {
    selectors: Vec<(Hint, Selector)>,
}

impl HintSelectors {
    pub fn parse() -> Result<Self, ExtractError> {
        let selectors = HINTS
            .into_iter()
            .map(|hint| {
                Selector::parse(hint_selector(hint))
                    .map(|selector| (hint, selector))
                    .map_err(|e| ExtractError::Selector {
                        hint,
                        message: format!("{:?}", e),
                    })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { selectors })
    }

    fn get(&self, hint: Hint) -> Option<&Selector> {
        self.selectors
            .iter()
            .find(|(candidate, _)| *candidate == hint)
            .map(|(_, selector)| selector)
    }
}

/// One candidate element of a parsed page
pub struct HtmlFragment<'a> {
    element: ElementRef<'a>,
    selectors: &'a HintSelectors,
}

impl<'a> HtmlFragment<'a> {
    pub fn new(element: ElementRef<'a>, selectors: &'a HintSelectors) -> Self {
        Self { element, selectors }
    }
}

impl Fragment for HtmlFragment<'_> {
    fn find_all(&self, hint: Hint) -> Result<Vec<Node>, ExtractError> {
        let selector = self.selectors.get(hint).ok_or_else(|| ExtractError::Selector {
            hint,
            message: "no selector registered".to_string(),
        })?;

        Ok(self.element.select(selector).map(snapshot).collect())
    }
}

fn snapshot(element: ElementRef<'_>) -> Node {
    Node {
        text: element.text().collect(),
        attributes: element
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    }
}

/// Parses a listing page and normalizes its candidates
///
/// The parsed document is not `Send`, so parsing and normalization happen in
/// one synchronous call.
pub fn extract_jobs(
    html: &str,
    normalizer: &Normalizer,
    category: Category,
    captured_at: DateTime<Utc>,
) -> anyhow::Result<Vec<Job>> {
    let selector = Selector::parse(CANDIDATE_SELECTOR)
        .map_err(|e| anyhow::anyhow!("invalid candidate selector: {:?}", e))?;
    let hints = HintSelectors::parse()?;

    let document = Html::parse_document(html);
    let candidates = document
        .select(&selector)
        .map(|element| HtmlFragment::new(element, &hints));

    Ok(normalizer.normalize(candidates, category, captured_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobwatch_core::normalize::LISTING_BASE_URL;
    use url::Url;

    const PAGE: &str = r#"
        <html><body>
          <div class="project-item">
            <h2> <a href="/jobs/loja-virtual-shopify">Loja virtual em Shopify</a> </h2>
            <span class="budget">USD 1.000</span>
            <p>Preciso de uma loja completa com integração de pagamentos.</p>
            <span class="skill">Shopify</span><span class="skill">CSS</span>
            <span class="country">Argentina</span>
          </div>
          <div class="project-item">
            <span class="budget">USD 50</span>
            <a href="/jobs/sem-titulo">ver</a>
          </div>
          <div class="project-item">
            <h3>Logo para cafeteria</h3>
            <a class="link" href="https://www.workana.com/projects/logo-cafe">detalhes</a>
            <img class="flag" alt="flag Chile" src="/cl.png">
          </div>
          <div class="project-item">
            <h3>Sem link</h3>
          </div>
        </body></html>
    "#;

    fn normalizer() -> Normalizer {
        Normalizer::new(Url::parse(LISTING_BASE_URL).unwrap())
    }

    #[test]
    fn test_extracts_listings_from_markup() {
        let jobs = extract_jobs(PAGE, &normalizer(), Category::ItProgramming, Utc::now()).unwrap();
        assert_eq!(jobs.len(), 2);

        let shop = &jobs[0];
        assert_eq!(shop.title, "Loja virtual em Shopify");
        assert_eq!(shop.id, "job_real_loja-virtual-shopify");
        assert_eq!(shop.url, "https://www.workana.com/jobs/loja-virtual-shopify");
        assert_eq!(shop.budget, 1000);
        assert!(shop.description.starts_with("Preciso de uma loja"));
        assert_eq!(shop.skills, vec!["Shopify", "CSS"]);
        assert_eq!(shop.country_code, "AR");

        let logo = &jobs[1];
        assert_eq!(logo.title, "Logo para cafeteria");
        assert_eq!(logo.id, "job_real_logo-cafe");
        assert_eq!(logo.budget, 0);
        assert_eq!(logo.country, "flag Chile");
    }

    #[test]
    fn test_page_without_candidates() {
        let jobs = extract_jobs(
            "<html><body><p>Nenhum projeto</p></body></html>",
            &normalizer(),
            Category::ItProgramming,
            Utc::now(),
        )
        .unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_every_hint_selector_parses() {
        let hints = HintSelectors::parse().unwrap();
        let html = Html::parse_fragment("<div><h2>t</h2></div>");
        let fragment = HtmlFragment::new(html.root_element(), &hints);

        for hint in HINTS {
            assert!(fragment.find_all(hint).is_ok(), "{:?}", hint);
        }
        assert_eq!(fragment.find_all(Hint::Heading).unwrap().len(), 1);
    }
}
