use std::time::Duration;

use thirtyfour::prelude::*;
use thirtyfour::common::capabilities::firefox::{FirefoxCapabilities, FirefoxPreferences};
use thirtyfour::Cookie;
use tokio::runtime::Runtime;

use crate::browser::traits::Browser;
use crate::config::Config;
use crate::domain::SiteCookie;
use crate::errors::{ScraperError, ScraperResult};

/// Firefox driven through a running geckodriver instance.
///
/// The WebDriver client is async, so the session owns a small runtime and
/// blocks on every call.
pub struct WebDriverSession {
    runtime: Runtime,
    driver: Option<WebDriver>,
}

impl WebDriverSession {
    pub fn connect(config: &Config) -> ScraperResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let caps = firefox_capabilities(config)?;

        log::info!("Connecting to WebDriver at {}", config.webdriver_url);
        let driver = runtime.block_on(WebDriver::new(&config.webdriver_url, caps))?;

        // Dropping the session on error quits the browser
        let session = Self {
            runtime,
            driver: Some(driver),
        };
        let driver = session.driver()?;
        session
            .runtime
            .block_on(driver.set_page_load_timeout(config.page_timeout))?;

        Ok(session)
    }

    fn driver(&self) -> ScraperResult<&WebDriver> {
        self.driver.as_ref().ok_or(ScraperError::NoPageLoaded)
    }
}

/// Firefox options: headless unless disabled, with the configured user agent
fn firefox_capabilities(config: &Config) -> ScraperResult<FirefoxCapabilities> {
    let mut caps = DesiredCapabilities::firefox();
    if config.headless {
        caps.set_headless()?;
    }

    let mut prefs = FirefoxPreferences::new();
    prefs.set_user_agent(config.user_agent.clone())?;
    caps.set_preferences(prefs)?;

    Ok(caps)
}

impl Browser for WebDriverSession {
    fn open(&mut self, url: &str) -> ScraperResult<()> {
        let driver = self.driver()?;
        self.runtime.block_on(driver.goto(url))?;
        Ok(())
    }

    fn refresh(&mut self) -> ScraperResult<()> {
        let driver = self.driver()?;
        self.runtime.block_on(driver.refresh())?;
        Ok(())
    }

    fn current_url(&self) -> ScraperResult<String> {
        let driver = self.driver()?;
        let url = self.runtime.block_on(driver.current_url())?;
        Ok(url.to_string())
    }

    fn page_source(&self) -> ScraperResult<String> {
        let driver = self.driver()?;
        Ok(self.runtime.block_on(driver.source())?)
    }

    fn add_cookie(&mut self, cookie: &SiteCookie) -> ScraperResult<()> {
        let driver = self.driver()?;

        let mut wd_cookie = Cookie::new(cookie.name.clone(), cookie.value.clone());
        wd_cookie.set_domain(cookie.domain.clone());
        wd_cookie.set_path(cookie.path.clone());
        if cookie.secure {
            wd_cookie.set_secure(true);
        }

        self.runtime.block_on(driver.add_cookie(wd_cookie))?;
        Ok(())
    }

    fn close(&mut self) -> ScraperResult<()> {
        if let Some(driver) = self.driver.take() {
            self.runtime.block_on(driver.quit())?;
            log::info!("Browser session closed");
        }
        Ok(())
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            let quit = self
                .runtime
                .block_on(tokio::time::timeout(Duration::from_secs(10), driver.quit()));
            if !matches!(quit, Ok(Ok(()))) {
                log::warn!("Browser session did not shut down cleanly");
            }
        }
    }
}
