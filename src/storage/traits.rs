use crate::domain::{Article, Redirect};
use crate::errors::ScraperResult;

#[cfg_attr(test, mockall::automock)]
pub trait ArticleRepository: Send + Sync {
    fn add(&self, article: &Article) -> ScraperResult<i64>;
    fn exists(&self, link: &str) -> ScraperResult<bool>;
    fn existing_links(&self, links: &[String]) -> ScraperResult<Vec<String>>;
    fn list(&self, tag: Option<String>, limit: Option<usize>) -> ScraperResult<Vec<Article>>;
    fn count_by_tag(&self) -> ScraperResult<Vec<(String, i64)>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RedirectRepository: Send + Sync {
    fn add(&self, link: &str, target: Option<String>) -> ScraperResult<()>;
    fn exists(&self, link: &str) -> ScraperResult<bool>;
    fn existing_links(&self, links: &[String]) -> ScraperResult<Vec<String>>;
    fn list(&self) -> ScraperResult<Vec<Redirect>>;
}
