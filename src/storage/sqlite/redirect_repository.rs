use crate::domain::Redirect;
use crate::errors::ScraperResult;
use crate::storage::sqlite::connection::placeholders;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::RedirectRepository;

pub struct SqliteRedirectRepository {
    storage: SqliteStorage,
}

impl SqliteRedirectRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl RedirectRepository for SqliteRedirectRepository {
    fn add(&self, link: &str, target: Option<String>) -> ScraperResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT OR IGNORE INTO redirects (link, target) VALUES (?1, ?2)",
            (link, target),
        )?;
        Ok(())
    }

    fn exists(&self, link: &str) -> ScraperResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare("SELECT EXISTS(SELECT 1 FROM redirects WHERE link = ?1)")?;
        let exists: bool = stmt.query_row([link], |row| row.get(0))?;
        Ok(exists)
    }

    fn existing_links(&self, links: &[String]) -> ScraperResult<Vec<String>> {
        if links.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.storage.connection()?;
        let query = format!(
            "SELECT link FROM redirects WHERE link IN ({})",
            placeholders(links.len())
        );

        let mut stmt = conn.prepare(&query)?;
        let existing = stmt
            .query_map(rusqlite::params_from_iter(links.iter()), |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(existing)
    }

    fn list(&self) -> ScraperResult<Vec<Redirect>> {
        let conn = self.storage.connection()?;
        let mut stmt =
            conn.prepare("SELECT link, target, recorded_at FROM redirects ORDER BY id DESC")?;

        let redirects = stmt
            .query_map([], |row| {
                Ok(Redirect {
                    link: row.get(0)?,
                    target: row.get(1)?,
                    recorded_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(redirects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_repo() -> SqliteRedirectRepository {
        SqliteRedirectRepository::new(SqliteStorage::in_memory().unwrap())
    }

    #[test]
    fn test_add_and_check_redirect() {
        let repo = setup_repo();
        let link = "https://example.com/old.html";

        assert!(!repo.exists(link).unwrap());
        repo.add(link, Some("https://example.com/".to_string())).unwrap();
        assert!(repo.exists(link).unwrap());

        let all = repo.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].target.as_deref(), Some("https://example.com/"));
    }

    #[test]
    fn test_repeat_redirect_ignored() {
        let repo = setup_repo();
        let link = "https://example.com/old.html";

        repo.add(link, None).unwrap();
        repo.add(link, Some("https://example.com/new.html".to_string())).unwrap();

        let all = repo.list().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].target.is_none());
    }

    #[test]
    fn test_existing_links() {
        let repo = setup_repo();
        repo.add("key1", None).unwrap();

        let links = vec!["key1".to_string(), "key2".to_string()];
        assert_eq!(repo.existing_links(&links).unwrap(), vec!["key1"]);
    }
}
