mod connection;
mod article_repository;
mod redirect_repository;

pub use connection::SqliteStorage;
pub use article_repository::SqliteArticleRepository;
pub use redirect_repository::SqliteRedirectRepository;
