use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use super::{elem_text, ParseError};
use crate::domain::Article;

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".wiadTit").expect("invalid selector: title"));
static LEAD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".WiadomoscLead").expect("invalid selector: lead"));
static DETAILS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".wiadSzczegol").expect("invalid selector: details"));
static MAIN_PHOTO: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("img.fotoWiadomosc[src]").expect("invalid selector: main photo")
});
static GALLERY_PHOTO: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#main-1 img[src]").expect("invalid selector: gallery photo"));

static RE_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}\.\d{1,2}\.\d{4}|\d{4}-\d{2}-\d{2}),?(?:\s+(\d{1,2}:\d{2}))?")
        .expect("invalid regex: date time")
});

/// Separator between author and date in the article details line
const DETAILS_SEPARATOR: char = '⚫';

/// Extract an article record from a rendered article page
pub fn parse_article(html: &str, link: &str, tag: &str) -> Result<Article, ParseError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(elem_text)
        .ok_or_else(|| ParseError::MissingElement("wiadTit".to_string()))?;

    let lead = document
        .select(&LEAD)
        .next()
        .map(elem_text)
        .ok_or_else(|| ParseError::MissingElement("WiadomoscLead".to_string()))?;

    let details = document
        .select(&DETAILS)
        .next()
        .map(elem_text)
        .ok_or_else(|| ParseError::MissingElement("wiadSzczegol".to_string()))?;

    let (author, date) = split_details(&details)?;

    // Pages carry a single photo, a gallery, or a video with no image at all
    let photo_src = document
        .select(&MAIN_PHOTO)
        .next()
        .or_else(|| document.select(&GALLERY_PHOTO).next())
        .and_then(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty());

    let photo_url = match photo_src {
        Some(src) => Some(resolve(link, src)?),
        None => {
            log::info!("Photo for {} has not been found", link);
            None
        }
    };

    let published_at = parse_published(&date);

    Ok(Article::new(link.to_string(), tag.to_string(), title)
        .with_lead(lead)
        .with_byline(author, date)
        .with_published_at(published_at)
        .with_photo_url(photo_url))
}

fn split_details(details: &str) -> Result<(String, String), ParseError> {
    let mut parts = details.split(DETAILS_SEPARATOR).map(str::trim);

    match (parts.next(), parts.next()) {
        (Some(author), Some(date)) => Ok((author.to_string(), date.to_string())),
        _ => Err(ParseError::MalformedDetails(details.to_string())),
    }
}

fn resolve(link: &str, src: &str) -> Result<String, ParseError> {
    let base = Url::parse(link).map_err(|e| ParseError::UrlParseError(e.to_string()))?;
    base.join(src)
        .map(|u| u.to_string())
        .map_err(|e| ParseError::UrlParseError(e.to_string()))
}

/// Normalise a publication date to ISO-8601, if it can be recognised
pub fn parse_published(date: &str) -> Option<String> {
    let caps = RE_DATE_TIME.captures(date)?;
    let day = caps.get(1)?.as_str();

    let date = NaiveDate::parse_from_str(day, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(day, "%Y-%m-%d"))
        .ok()?;

    // An unreadable time still leaves a usable date
    let with_time = caps.get(2).and_then(|time| {
        let stamp = format!("{} {}", date.format("%Y-%m-%d"), time.as_str());
        NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M").ok()
    });

    match with_time {
        Some(dt) => Some(dt.format("%Y-%m-%dT%H:%M:00").to_string()),
        None => Some(date.format("%Y-%m-%d").to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://www.rynek-kolejowy.pl/mobile/nowe-tramwaje-115000.html";

    fn page(photo_block: &str) -> String {
        format!(
            r#"<html><body>
              <h1 class="wiadTit">  Nowe tramwaje
                 dla Krakowa </h1>
              <div class="wiadSzczegol">Jan Kowalski ⚫ 18.07.2023, 12:05 ⚫ 3 komentarze</div>
              <div class="WiadomoscLead">Miasto podpisało umowę na dostawę tramwajów.</div>
              {}
            </body></html>"#,
            photo_block
        )
    }

    #[test]
    fn test_parse_article_with_main_photo() {
        let html = page(r#"<img class="fotoWiadomosc" src="/foto/2023/tram.jpg">"#);
        let article = parse_article(&html, LINK, "Tabor").unwrap();

        assert_eq!(article.link, LINK);
        assert_eq!(article.tag, "Tabor");
        assert_eq!(article.title, "Nowe tramwaje dla Krakowa");
        assert_eq!(article.lead, "Miasto podpisało umowę na dostawę tramwajów.");
        assert_eq!(article.author, "Jan Kowalski");
        assert_eq!(article.date, "18.07.2023, 12:05");
        assert_eq!(article.published_at.as_deref(), Some("2023-07-18T12:05:00"));
        assert_eq!(
            article.photo_url.as_deref(),
            Some("https://www.rynek-kolejowy.pl/foto/2023/tram.jpg")
        );
        assert_eq!(article.photo.as_deref(), Some("tram.jpg"));
    }

    #[test]
    fn test_parse_article_falls_back_to_gallery_photo() {
        let html = page(
            r#"<div id="main-1"><div class="slide"><img src="https://cdn.example.com/g/first.png"></div>
               <img src="https://cdn.example.com/g/second.png"></div>"#,
        );
        let article = parse_article(&html, LINK, "Tabor").unwrap();

        assert_eq!(article.photo.as_deref(), Some("first.png"));
    }

    #[test]
    fn test_parse_article_without_photo() {
        let html = page(r#"<iframe src="https://video.example.com/embed/1"></iframe>"#);
        let article = parse_article(&html, LINK, "Tabor").unwrap();

        assert!(article.photo_url.is_none());
        assert!(article.photo.is_none());
    }

    #[test]
    fn test_parse_article_missing_title() {
        let html = r#"<div class="WiadomoscLead">Lead</div><div class="wiadSzczegol">A ⚫ B</div>"#;
        let result = parse_article(html, LINK, "Tabor");

        assert!(matches!(result, Err(ParseError::MissingElement(name)) if name == "wiadTit"));
    }

    #[test]
    fn test_parse_article_details_without_separator() {
        let html = r#"<h1 class="wiadTit">T</h1><div class="WiadomoscLead">L</div>
                      <div class="wiadSzczegol">Jan Kowalski</div>"#;
        let result = parse_article(html, LINK, "Tabor");

        assert!(matches!(result, Err(ParseError::MalformedDetails(_))));
    }

    #[test]
    fn test_parse_published_formats() {
        assert_eq!(parse_published("18.07.2023").as_deref(), Some("2023-07-18"));
        assert_eq!(
            parse_published("18.07.2023 08:30").as_deref(),
            Some("2023-07-18T08:30:00")
        );
        assert_eq!(
            parse_published("2023-07-18 08:30").as_deref(),
            Some("2023-07-18T08:30:00")
        );
        assert_eq!(parse_published("wczoraj"), None);
    }

    #[test]
    fn test_parse_published_invalid_time_keeps_date() {
        assert_eq!(parse_published("18.07.2023 25:00").as_deref(), Some("2023-07-18"));
        assert_eq!(parse_published("2023-07-18 12:61").as_deref(), Some("2023-07-18"));
        assert_eq!(parse_published("31.02.2023"), None);
    }
}
