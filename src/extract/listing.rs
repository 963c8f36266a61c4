use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use super::ParseError;

static LISTING_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".listaWiadomosciv3 a[href]").expect("invalid selector: listing links")
});

/// Fragment appended to comment-count links that point back at the same article
const COMMENTS_FRAGMENT: &str = "#disqus_thread";

/// Collect article links from a section listing page.
///
/// Links are resolved against `page_url`, comment anchors are skipped and
/// duplicates removed in first-seen order.
pub fn parse_listing(html: &str, page_url: &str) -> Result<Vec<String>, ParseError> {
    let base = Url::parse(page_url).map_err(|e| ParseError::UrlParseError(e.to_string()))?;
    let document = Html::parse_document(html);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&LISTING_LINKS) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let resolved = match base.join(href.trim()) {
            Ok(url) => url.to_string(),
            Err(e) => {
                log::debug!("Skipping unresolvable link '{}': {}", href, e);
                continue;
            }
        };

        if resolved.contains(COMMENTS_FRAGMENT) {
            continue;
        }

        if seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <nav><a href="/prawo.html">Prawo</a></nav>
          <div class="listaWiadomosciv3">
            <a href="/mobile/nowe-tramwaje-115000.html">Nowe tramwaje</a>
            <a href="/mobile/nowe-tramwaje-115000.html#disqus_thread">3 komentarze</a>
            <a href="https://www.rynek-kolejowy.pl/mobile/pkp-plk-115001.html">PKP PLK</a>
          </div>
          <div class="listaWiadomosciv3">
            <a href="/mobile/nowe-tramwaje-115000.html">Nowe tramwaje</a>
            <a>no href</a>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_listing_collects_section_links() {
        let links = parse_listing(LISTING, "https://www.rynek-kolejowy.pl/tabor.html").unwrap();

        assert_eq!(
            links,
            vec![
                "https://www.rynek-kolejowy.pl/mobile/nowe-tramwaje-115000.html".to_string(),
                "https://www.rynek-kolejowy.pl/mobile/pkp-plk-115001.html".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_listing_ignores_links_outside_listing() {
        let links = parse_listing(LISTING, "https://www.rynek-kolejowy.pl/tabor.html").unwrap();
        assert!(!links.iter().any(|l| l.ends_with("/prawo.html")));
    }

    #[test]
    fn test_parse_listing_empty_page() {
        let links = parse_listing("<html></html>", "https://example.com/").unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_parse_listing_rejects_bad_page_url() {
        let result = parse_listing(LISTING, "not a url");
        assert!(matches!(result, Err(ParseError::UrlParseError(_))));
    }
}
