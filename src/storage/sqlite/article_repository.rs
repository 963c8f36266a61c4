use rusqlite::Row;

use crate::domain::Article;
use crate::errors::{ScraperError, ScraperResult};
use crate::storage::sqlite::connection::placeholders;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::ArticleRepository;

const COLUMNS: &str =
    "id, link, tag, title, lead, author, date, published_at, photo_url, photo, scraped_at";

pub struct SqliteArticleRepository {
    storage: SqliteStorage,
}

impl SqliteArticleRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Article> {
        Ok(Article {
            id: Some(row.get(0)?),
            link: row.get(1)?,
            tag: row.get(2)?,
            title: row.get(3)?,
            lead: row.get(4)?,
            author: row.get(5)?,
            date: row.get(6)?,
            published_at: row.get(7)?,
            photo_url: row.get(8)?,
            photo: row.get(9)?,
            scraped_at: row.get(10)?,
        })
    }
}

impl ArticleRepository for SqliteArticleRepository {
    fn add(&self, article: &Article) -> ScraperResult<i64> {
        let conn = self.storage.connection()?;

        // Check within the same connection to avoid deadlock
        let mut stmt = conn.prepare("SELECT EXISTS(SELECT 1 FROM articles WHERE link = ?1)")?;
        let exists: bool = stmt.query_row([&article.link], |row| row.get(0))?;
        drop(stmt);

        if exists {
            return Err(ScraperError::ArticleAlreadyExists(article.link.clone()));
        }

        conn.execute(
            "INSERT INTO articles (link, tag, title, lead, author, date, published_at, photo_url, photo)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            (
                &article.link,
                &article.tag,
                &article.title,
                &article.lead,
                &article.author,
                &article.date,
                &article.published_at,
                &article.photo_url,
                &article.photo,
            ),
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn exists(&self, link: &str) -> ScraperResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare("SELECT EXISTS(SELECT 1 FROM articles WHERE link = ?1)")?;
        let exists: bool = stmt.query_row([link], |row| row.get(0))?;
        Ok(exists)
    }

    fn existing_links(&self, links: &[String]) -> ScraperResult<Vec<String>> {
        if links.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.storage.connection()?;
        let query = format!(
            "SELECT link FROM articles WHERE link IN ({})",
            placeholders(links.len())
        );

        let mut stmt = conn.prepare(&query)?;
        let existing = stmt
            .query_map(rusqlite::params_from_iter(links.iter()), |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(existing)
    }

    fn list(&self, tag: Option<String>, limit: Option<usize>) -> ScraperResult<Vec<Article>> {
        let conn = self.storage.connection()?;
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let articles = match tag {
            Some(tag) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM articles WHERE tag = ?1 COLLATE NOCASE ORDER BY id DESC LIMIT ?2",
                    COLUMNS
                ))?;
                let rows = stmt.query_map((tag, limit), Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM articles ORDER BY id DESC LIMIT ?1",
                    COLUMNS
                ))?;
                let rows = stmt.query_map([limit], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(articles)
    }

    fn count_by_tag(&self) -> ScraperResult<Vec<(String, i64)>> {
        let conn = self.storage.connection()?;
        let mut stmt =
            conn.prepare("SELECT tag, COUNT(*) FROM articles GROUP BY tag ORDER BY tag")?;

        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(counts)
    }
}
