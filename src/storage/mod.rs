pub mod traits;
pub mod sqlite;

pub use traits::{ArticleRepository, RedirectRepository};
pub use sqlite::{SqliteArticleRepository, SqliteRedirectRepository, SqliteStorage};
