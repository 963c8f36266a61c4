use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::article::photo_file_name;
use crate::errors::{ScraperError, ScraperResult};

#[cfg_attr(test, mockall::automock)]
pub trait ImageStore {
    /// Store the image behind `photo_url` and return where it was written
    fn save(&self, photo_url: &str) -> ScraperResult<PathBuf>;
}

/// Downloads article photos into a local directory
pub struct ImageDownloader {
    client: Client,
    images_dir: PathBuf,
}

impl ImageDownloader {
    pub fn new<P: AsRef<Path>>(images_dir: P, user_agent: &str) -> ScraperResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .user_agent(user_agent.to_string())
            .build()?;

        Ok(Self {
            client,
            images_dir: images_dir.as_ref().to_path_buf(),
        })
    }

    pub fn target_path(&self, photo_url: &str) -> ScraperResult<PathBuf> {
        let file_name = photo_file_name(photo_url)
            .ok_or_else(|| ScraperError::ImageDownload(format!("No file name in {}", photo_url)))?;
        Ok(self.images_dir.join(file_name))
    }
}

impl ImageStore for ImageDownloader {
    fn save(&self, photo_url: &str) -> ScraperResult<PathBuf> {
        let path = self.target_path(photo_url)?;

        let response = self
            .client
            .get(photo_url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScraperError::ImageDownload(e.to_string()))?;
        let bytes = response
            .bytes()
            .map_err(|e| ScraperError::ImageDownload(e.to_string()))?;

        fs::create_dir_all(&self.images_dir)?;
        fs::write(&path, &bytes)?;

        log::info!("Image downloaded to {}", path.display());
        Ok(path)
    }
}
