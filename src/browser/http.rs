use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use url::Url;

use crate::browser::traits::Browser;
use crate::config::Config;
use crate::domain::SiteCookie;
use crate::errors::{ScraperError, ScraperResult};

struct LoadedPage {
    url: String,
    source: String,
}

/// Page loading over plain HTTP, without script execution
pub struct HttpSession {
    client: Client,
    jar: Arc<Jar>,
    page: Option<LoadedPage>,
    /// Navigation that failed and has not been retried successfully
    pending: Option<String>,
}

impl HttpSession {
    pub fn new(config: &Config) -> ScraperResult<Self> {
        Self::with_settings(&config.user_agent, config.page_timeout)
    }

    pub fn with_settings(user_agent: &str, timeout: Duration) -> ScraperResult<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            client,
            jar,
            page: None,
            pending: None,
        })
    }

    fn load(&mut self, url: &str) -> ScraperResult<()> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let final_url = response.url().to_string();
        let source = response.text()?;

        log::debug!("Loaded {} ({} bytes)", final_url, source.len());
        self.page = Some(LoadedPage {
            url: final_url,
            source,
        });
        Ok(())
    }

    fn loaded(&self) -> ScraperResult<&LoadedPage> {
        self.page.as_ref().ok_or(ScraperError::NoPageLoaded)
    }
}

impl Browser for HttpSession {
    fn open(&mut self, url: &str) -> ScraperResult<()> {
        self.pending = Some(url.to_string());
        self.load(url)?;
        self.pending = None;
        Ok(())
    }

    fn refresh(&mut self) -> ScraperResult<()> {
        let url = match &self.pending {
            Some(url) => url.clone(),
            None => self.loaded()?.url.clone(),
        };
        self.load(&url)?;
        self.pending = None;
        Ok(())
    }

    fn current_url(&self) -> ScraperResult<String> {
        Ok(self.loaded()?.url.clone())
    }

    fn page_source(&self) -> ScraperResult<String> {
        Ok(self.loaded()?.source.clone())
    }

    fn add_cookie(&mut self, cookie: &SiteCookie) -> ScraperResult<()> {
        let host = cookie.domain.trim_start_matches('.');
        let scheme = if cookie.secure { "https" } else { "http" };
        let url = Url::parse(&format!("{}://{}{}", scheme, host, cookie.path))?;

        self.jar.add_cookie_str(&cookie.to_header(), &url);
        Ok(())
    }

    fn close(&mut self) -> ScraperResult<()> {
        self.page = None;
        self.pending = None;
        Ok(())
    }
}
