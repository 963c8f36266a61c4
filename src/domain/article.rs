use serde::{Deserialize, Serialize};

/// Fields extracted from one article page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<i64>,
    pub link: String,
    pub tag: String,
    pub title: String,
    pub lead: String,
    pub author: String,
    pub date: String,
    pub published_at: Option<String>,
    pub photo_url: Option<String>,
    pub photo: Option<String>,
    pub scraped_at: Option<String>,
}

impl Article {
    pub fn new(link: String, tag: String, title: String) -> Self {
        Self {
            id: None,
            link,
            tag,
            title,
            lead: String::new(),
            author: String::new(),
            date: String::new(),
            published_at: None,
            photo_url: None,
            photo: None,
            scraped_at: None,
        }
    }

    pub fn with_lead(mut self, lead: String) -> Self {
        self.lead = lead;
        self
    }

    pub fn with_byline(mut self, author: String, date: String) -> Self {
        self.author = author;
        self.date = date;
        self
    }

    pub fn with_published_at(mut self, published_at: Option<String>) -> Self {
        self.published_at = published_at;
        self
    }

    /// Sets the photo URL and derives the stored file name from its last path segment
    pub fn with_photo_url(mut self, photo_url: Option<String>) -> Self {
        self.photo = photo_url.as_deref().and_then(photo_file_name);
        self.photo_url = photo_url;
        self
    }
}

/// Last non-empty path segment of an image URL
pub fn photo_file_name(photo_url: &str) -> Option<String> {
    let path = match url::Url::parse(photo_url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => photo_url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_file_name_from_url() {
        assert_eq!(
            photo_file_name("https://example.com/img/2023/07/tram.jpg?w=640"),
            Some("tram.jpg".to_string())
        );
        assert_eq!(photo_file_name("https://example.com/"), None);
        assert_eq!(photo_file_name("/static/photo.png#top"), Some("photo.png".to_string()));
    }

    #[test]
    fn test_with_photo_url_sets_file_name() {
        let article = Article::new(
            "https://example.com/a.html".to_string(),
            "Tabor".to_string(),
            "New trams".to_string(),
        )
        .with_photo_url(Some("https://example.com/foto/tram.jpg".to_string()));

        assert_eq!(article.photo.as_deref(), Some("tram.jpg"));

        let article = article.with_photo_url(None);
        assert!(article.photo.is_none());
    }
}
