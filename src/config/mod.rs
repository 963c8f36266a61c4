use std::time::Duration;

use crate::errors::{ScraperError, ScraperResult};

pub const DEFAULT_BASE_URL: &str = "https://www.rynek-kolejowy.pl";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub images_dir: String,
    pub base_url: String,
    pub webdriver_url: String,
    pub user_agent: String,
    pub page_delay: Duration,
    pub page_timeout: Duration,
    pub headless: bool,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> ScraperResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        // Default db_path is relative to executable directory
        let default_db = exe_dir
            .map(|d| d.join("messages.db").to_string_lossy().into_owned())
            .unwrap_or_else(|| "./messages.db".to_string());

        Self::from_vars(|key| std::env::var(key).ok(), default_db)
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F, default_db: String) -> ScraperResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("RAILNEWS_DB_PATH").unwrap_or(default_db);
        let images_dir = lookup("RAILNEWS_IMAGES_DIR").unwrap_or_else(|| "images".to_string());

        let base_url = lookup("RAILNEWS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url)
            .map_err(|e| ScraperError::Config(format!("RAILNEWS_BASE_URL: {}", e)))?;

        let webdriver_url =
            lookup("WEBDRIVER_URL").unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string());
        let user_agent =
            lookup("RAILNEWS_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let page_delay = parse_secs(&lookup, "RAILNEWS_PAGE_DELAY", 3)?;
        let page_timeout = parse_secs(&lookup, "RAILNEWS_PAGE_TIMEOUT", 30)?;

        let headless = match lookup("RAILNEWS_HEADLESS") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ScraperError::Config(format!("RAILNEWS_HEADLESS: not a boolean: {}", value))
            })?,
            None => true,
        };

        Ok(Self {
            db_path,
            images_dir,
            base_url,
            webdriver_url,
            user_agent,
            page_delay,
            page_timeout,
            headless,
        })
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> ScraperResult<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ScraperError::Config(format!("{}: {}", key, e))),
        None => Ok(Duration::from_secs(default)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ScraperResult<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned(), "default.db".to_string())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.db_path, "default.db");
        assert_eq!(config.images_dir, "images");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.webdriver_url, DEFAULT_WEBDRIVER_URL);
        assert_eq!(config.page_delay, Duration::from_secs(3));
        assert_eq!(config.page_timeout, Duration::from_secs(30));
        assert!(config.headless);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RAILNEWS_DB_PATH", "/tmp/news.db"),
            ("RAILNEWS_PAGE_DELAY", "0"),
            ("RAILNEWS_HEADLESS", "no"),
            ("WEBDRIVER_URL", "http://127.0.0.1:9515"),
        ])
        .unwrap();

        assert_eq!(config.db_path, "/tmp/news.db");
        assert_eq!(config.page_delay, Duration::ZERO);
        assert!(!config.headless);
        assert_eq!(config.webdriver_url, "http://127.0.0.1:9515");
    }

    #[test]
    fn test_invalid_delay_rejected() {
        let result = config_from(&[("RAILNEWS_PAGE_DELAY", "soon")]);
        assert!(matches!(result, Err(ScraperError::Config(msg)) if msg.contains("RAILNEWS_PAGE_DELAY")));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = config_from(&[("RAILNEWS_BASE_URL", "not a url")]);
        assert!(matches!(result, Err(ScraperError::Config(_))));
    }
}
