use thiserror::Error;

use crate::extract::ParseError;

#[derive(Error, Debug)]
pub enum ScraperError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("No page loaded in the browser session")]
    NoPageLoaded,

    // Extraction errors
    #[error("Extraction failed: {0}")]
    Extract(#[from] ParseError),

    #[error("Image download failed: {0}")]
    ImageDownload(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Article already exists: {0}")]
    ArticleAlreadyExists(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<thirtyfour::prelude::WebDriverError> for ScraperError {
    fn from(err: thirtyfour::prelude::WebDriverError) -> Self {
        ScraperError::Browser(err.to_string())
    }
}

impl From<url::ParseError> for ScraperError {
    fn from(err: url::ParseError) -> Self {
        ScraperError::InvalidUrl(err.to_string())
    }
}

pub type ScraperResult<T> = Result<T, ScraperError>;
