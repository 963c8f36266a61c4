pub mod export_service;
pub mod image_service;
pub mod scrape_service;

pub use export_service::ExportService;
pub use image_service::{ImageDownloader, ImageStore};
pub use scrape_service::{PageOutcome, RunReport, ScrapeOptions, ScrapeService, SectionReport};
