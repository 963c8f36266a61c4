use crate::domain::SiteCookie;
use crate::errors::ScraperResult;

/// A controllable page-loading session
#[cfg_attr(test, mockall::automock)]
pub trait Browser {
    /// Navigate to a URL and wait for the page to load
    fn open(&mut self, url: &str) -> ScraperResult<()>;

    /// Reload the current page, or retry the last navigation if it failed
    fn refresh(&mut self) -> ScraperResult<()>;

    /// URL the session ended up on after the last navigation
    fn current_url(&self) -> ScraperResult<String>;

    /// Source of the currently loaded page
    fn page_source(&self) -> ScraperResult<String>;

    fn add_cookie(&mut self, cookie: &SiteCookie) -> ScraperResult<()>;

    /// End the session; further calls fail
    fn close(&mut self) -> ScraperResult<()>;
}
