//! HTML extraction for section listings and article pages.
//!
//! Everything here works on page source text, so the same code serves the
//! WebDriver session and the plain HTTP session.

mod article;
mod listing;

pub use article::{parse_article, parse_published};
pub use listing::parse_listing;

use scraper::ElementRef;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing required element: {0}")]
    MissingElement(String),
    #[error("Malformed article details: {0}")]
    MalformedDetails(String),
    #[error("Failed to parse URL: {0}")]
    UrlParseError(String),
}

fn elem_text(element: ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
