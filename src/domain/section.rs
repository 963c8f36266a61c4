use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ScraperResult;

/// Listing pages scraped on every run, relative to the site base URL
pub const DEFAULT_SECTIONS: &[(&str, &str)] = &[
    ("biznes.html", "Biznes"),
    ("infrastruktura.html", "Infrastruktura"),
    ("pasazer.html", "Pasazer"),
    ("prawo.html", "Prawo"),
    ("tabor.html", "Tabor"),
    ("zintegrowany-transport.html", "Zintegrowany Transport"),
    ("innowacje.html", "Innowacje"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub url: String,
    pub tag: String,
}

impl Section {
    pub fn new(url: String, tag: String) -> Self {
        Self { url, tag }
    }

    /// Resolve the default section list against a base URL
    pub fn defaults(base_url: &str) -> ScraperResult<Vec<Section>> {
        let base = Url::parse(base_url)?;

        DEFAULT_SECTIONS
            .iter()
            .map(|(path, tag)| Ok(Section::new(base.join(path)?.to_string(), tag.to_string())))
            .collect()
    }

    pub fn matches_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_against_base() {
        let sections = Section::defaults("https://www.rynek-kolejowy.pl").unwrap();

        assert_eq!(sections.len(), 7);
        assert_eq!(sections[0].url, "https://www.rynek-kolejowy.pl/biznes.html");
        assert_eq!(sections[0].tag, "Biznes");
        assert_eq!(sections[5].tag, "Zintegrowany Transport");
    }

    #[test]
    fn test_matches_tag_ignores_case() {
        let section = Section::new(
            "https://example.com/tabor.html".to_string(),
            "Tabor".to_string(),
        );

        assert!(section.matches_tag("tabor"));
        assert!(section.matches_tag(" TABOR "));
        assert!(!section.matches_tag("prawo"));
    }
}
