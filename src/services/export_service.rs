use crate::domain::Article;
use crate::errors::ScraperResult;
use crate::storage::traits::ArticleRepository;

pub struct ExportService<A: ArticleRepository> {
    repository: A,
}

impl<A: ArticleRepository> ExportService<A> {
    pub fn new(repository: A) -> Self {
        Self { repository }
    }

    /// Stored articles as pretty-printed JSON, newest first
    pub fn export_json(&self, tag: Option<String>) -> ScraperResult<String> {
        let articles: Vec<Article> = self.repository.list(tag, None)?;
        Ok(serde_json::to_string_pretty(&articles)?)
    }
}
