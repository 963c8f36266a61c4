use std::collections::HashSet;
use std::time::{Duration, Instant};

use url::Url;

use crate::browser::Browser;
use crate::domain::{consent_cookies, Article, Section};
use crate::errors::{ScraperError, ScraperResult};
use crate::extract::{parse_article, parse_listing};
use crate::services::image_service::ImageStore;
use crate::storage::traits::{ArticleRepository, RedirectRepository};

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Pause after each navigation so scripted content can render
    pub page_delay: Duration,
    /// Extract everything but write nothing
    pub dry_run: bool,
    pub download_images: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_secs(3),
            dry_run: false,
            download_images: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionReport {
    pub tag: String,
    pub found: usize,
    pub duplicates: usize,
    pub scraped: usize,
    pub redirected: usize,
    pub failed: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub sections: Vec<SectionReport>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn total_scraped(&self) -> usize {
        self.sections.iter().map(|s| s.scraped).sum()
    }

    pub fn total_redirected(&self) -> usize {
        self.sections.iter().map(|s| s.redirected).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.sections.iter().map(|s| s.failed).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Scraped(Article),
    Redirected { target: String },
}

pub struct ScrapeService<B, A, R, I>
where
    B: Browser,
    A: ArticleRepository,
    R: RedirectRepository,
    I: ImageStore,
{
    browser: B,
    articles: A,
    redirects: R,
    images: Option<I>,
    options: ScrapeOptions,
    /// Links scraped or redirected during the current run
    handled: HashSet<String>,
}

impl<B, A, R, I> ScrapeService<B, A, R, I>
where
    B: Browser,
    A: ArticleRepository,
    R: RedirectRepository,
    I: ImageStore,
{
    pub fn new(browser: B, articles: A, redirects: R, images: Option<I>, options: ScrapeOptions) -> Self {
        Self {
            browser,
            articles,
            redirects,
            images,
            options,
            handled: HashSet::new(),
        }
    }

    /// Scrape every section, then close the browser whatever the outcome
    pub fn run(&mut self, base_url: &str, sections: &[Section]) -> ScraperResult<RunReport> {
        let start = Instant::now();
        self.handled.clear();

        let result = self.run_sections(base_url, sections);
        let closed = self.browser.close();

        let reports = result?;
        closed?;

        Ok(RunReport {
            sections: reports,
            elapsed: start.elapsed(),
        })
    }

    fn run_sections(&mut self, base_url: &str, sections: &[Section]) -> ScraperResult<Vec<SectionReport>> {
        self.prepare(base_url)?;

        let mut reports = Vec::with_capacity(sections.len());
        for section in sections {
            let report = match self.scrape_section(section) {
                Ok(report) => report,
                Err(e @ ScraperError::Database(_)) => return Err(e),
                Err(e) => {
                    log::error!("Section {} failed: {}", section.tag, e);
                    SectionReport {
                        tag: section.tag.clone(),
                        error: Some(e.to_string()),
                        ..Default::default()
                    }
                }
            };
            reports.push(report);
        }

        Ok(reports)
    }

    /// Open the site once and install the cookies that keep popups away
    pub fn prepare(&mut self, base_url: &str) -> ScraperResult<()> {
        self.browser.open(base_url)?;
        for cookie in consent_cookies(base_url)? {
            self.browser.add_cookie(&cookie)?;
        }
        self.browser.refresh()
    }

    /// Navigate, refreshing once if the first load fails
    fn navigate(&mut self, url: &str) -> ScraperResult<()> {
        if let Err(e) = self.browser.open(url) {
            log::warn!("Page {} has not loaded ({}), refreshing", url, e);
            self.browser.refresh()?;
        }

        if !self.options.page_delay.is_zero() {
            std::thread::sleep(self.options.page_delay);
        }
        Ok(())
    }

    pub fn collect_links(&mut self, section: &Section) -> ScraperResult<Vec<String>> {
        log::info!("Scraping article links for {}", section.url);
        self.navigate(&section.url)?;

        let source = self.browser.page_source()?;
        let page_url = self.browser.current_url()?;
        let links = parse_listing(&source, &page_url)?;

        log::info!("Found {} links in {}", links.len(), section.tag);
        Ok(links)
    }

    /// Drop links already stored as articles or redirects, or handled earlier in this run.
    /// Returns the new links and how many were dropped.
    pub fn filter_new(&self, links: Vec<String>) -> ScraperResult<(Vec<String>, usize)> {
        let mut known: HashSet<String> = self.articles.existing_links(&links)?.into_iter().collect();
        known.extend(self.redirects.existing_links(&links)?);

        let total = links.len();
        let new_links: Vec<String> = links
            .into_iter()
            .filter(|link| !known.contains(link) && !self.handled.contains(link))
            .collect();

        let duplicates = total - new_links.len();
        Ok((new_links, duplicates))
    }

    /// Load one article page and extract it, or report where it redirected
    pub fn scrape_page(&mut self, link: &str, tag: &str) -> ScraperResult<PageOutcome> {
        self.navigate(link)?;

        let current = self.browser.current_url()?;
        if !same_page(link, &current) {
            return Ok(PageOutcome::Redirected { target: current });
        }

        let source = self.browser.page_source()?;
        let article = parse_article(&source, link, tag)?;
        Ok(PageOutcome::Scraped(article))
    }

    pub fn scrape_section(&mut self, section: &Section) -> ScraperResult<SectionReport> {
        let links = self.collect_links(section)?;

        let mut report = SectionReport {
            tag: section.tag.clone(),
            found: links.len(),
            ..Default::default()
        };

        let (new_links, duplicates) = self.filter_new(links)?;
        report.duplicates = duplicates;
        log::info!("Total duplicates found: {}", duplicates);

        if new_links.is_empty() {
            log::info!("No new articles in {}", section.tag);
            return Ok(report);
        }

        for (counter, link) in new_links.iter().enumerate() {
            log::info!("Scraping page {} of {}: {}", counter + 1, new_links.len(), link);

            match self.scrape_page(link, &section.tag) {
                Ok(PageOutcome::Scraped(article)) => {
                    self.handled.insert(link.clone());
                    if self.store_article(&article)? {
                        report.scraped += 1;
                    } else {
                        report.duplicates += 1;
                    }
                }
                Ok(PageOutcome::Redirected { target }) => {
                    log::info!("Page {} was redirected to {}", link, target);
                    self.handled.insert(link.clone());
                    if !self.options.dry_run {
                        self.redirects.add(link, Some(target))?;
                    }
                    report.redirected += 1;
                }
                Err(e @ ScraperError::Database(_)) => return Err(e),
                Err(e) => {
                    log::error!("Failed to scrape {}: {}", link, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Persist an article and fetch its photo. Returns false if it was already stored.
    fn store_article(&self, article: &Article) -> ScraperResult<bool> {
        log::debug!("Extracted {:?}", article);

        if self.options.dry_run {
            return Ok(true);
        }

        match self.articles.add(article) {
            Ok(_) => {}
            Err(ScraperError::ArticleAlreadyExists(link)) => {
                log::debug!("Article {} already stored", link);
                return Ok(false);
            }
            Err(e) => return Err(e),
        }

        if self.options.download_images {
            if let (Some(images), Some(photo_url)) = (&self.images, &article.photo_url) {
                if let Err(e) = images.save(photo_url) {
                    log::warn!("Failed to download image {}: {}", photo_url, e);
                }
            }
        }

        Ok(true)
    }
}

/// Whether the browser landed on the requested page, ignoring fragments
fn same_page(requested: &str, current: &str) -> bool {
    match (Url::parse(requested), Url::parse(current)) {
        (Ok(mut requested), Ok(mut current)) => {
            requested.set_fragment(None);
            current.set_fragment(None);
            requested == current
        }
        _ => requested == current,
    }
}
