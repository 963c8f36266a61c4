use std::fs;
use std::time::Duration;

use clap::Parser;

use railnews::browser::{Browser, HttpSession, WebDriverSession};
use railnews::cli::{Cli, Commands};
use railnews::config::Config;
use railnews::domain::Section;
use railnews::errors::{ScraperError, ScraperResult};
use railnews::services::{ExportService, ImageDownloader, RunReport, ScrapeOptions, ScrapeService};
use railnews::storage::sqlite::{SqliteArticleRepository, SqliteRedirectRepository, SqliteStorage};
use railnews::storage::traits::{ArticleRepository, RedirectRepository};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.into())
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> ScraperResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    match cli.command.unwrap_or_default() {
        Commands::Run {
            sections,
            http,
            dry_run,
            skip_images,
            delay,
        } => {
            let options = ScrapeOptions {
                page_delay: delay.map(Duration::from_secs).unwrap_or(config.page_delay),
                dry_run,
                download_images: !skip_images,
            };
            cmd_run(&config, &sections, http, options)
        }
        Commands::Sections => cmd_sections(&config),
        Commands::List { tag, limit } => cmd_list(&config, tag, limit),
        Commands::Redirects => cmd_redirects(&config),
        Commands::Stats => cmd_stats(&config),
        Commands::Export { tag, output } => cmd_export(&config, tag, output),
    }
}

fn open_storage(config: &Config) -> ScraperResult<SqliteStorage> {
    SqliteStorage::new(&config.db_path)
}

/// Configured sections, narrowed to the requested tags
fn select_sections(config: &Config, tags: &[String]) -> ScraperResult<Vec<Section>> {
    let sections = Section::defaults(&config.base_url)?;

    if tags.is_empty() {
        return Ok(sections);
    }

    for tag in tags {
        if !sections.iter().any(|s| s.matches_tag(tag)) {
            return Err(ScraperError::InvalidInput(format!("Unknown section: {}", tag)));
        }
    }

    Ok(sections
        .into_iter()
        .filter(|s| tags.iter().any(|t| s.matches_tag(t)))
        .collect())
}

fn cmd_run(
    config: &Config,
    tags: &[String],
    http: bool,
    options: ScrapeOptions,
) -> ScraperResult<()> {
    let sections = select_sections(config, tags)?;

    if http {
        let browser = HttpSession::new(config)?;
        scrape_with(browser, config, &sections, options)
    } else {
        let browser = WebDriverSession::connect(config)?;
        scrape_with(browser, config, &sections, options)
    }
}

fn scrape_with<B: Browser>(
    browser: B,
    config: &Config,
    sections: &[Section],
    options: ScrapeOptions,
) -> ScraperResult<()> {
    let storage = open_storage(config)?;
    let article_repo = SqliteArticleRepository::new(storage.clone());
    let redirect_repo = SqliteRedirectRepository::new(storage);

    let images = if options.download_images && !options.dry_run {
        Some(ImageDownloader::new(&config.images_dir, &config.user_agent)?)
    } else {
        None
    };

    let dry_run = options.dry_run;
    if dry_run {
        println!("Dry run: nothing will be stored.\n");
    }

    let mut service = ScrapeService::new(browser, article_repo, redirect_repo, images, options);
    let report = service.run(&config.base_url, sections)?;

    print_report(&report, dry_run);
    Ok(())
}

fn print_report(report: &RunReport, dry_run: bool) {
    for section in &report.sections {
        match &section.error {
            Some(error) => println!("{}: FAILED: {}", section.tag, error),
            None if section.found == section.duplicates => {
                println!("{}: no new articles ({} found)", section.tag, section.found)
            }
            None => println!(
                "{}: {} found, {} duplicates, {} scraped, {} redirected, {} failed",
                section.tag,
                section.found,
                section.duplicates,
                section.scraped,
                section.redirected,
                section.failed
            ),
        }
    }

    println!();
    if dry_run {
        println!("Dry run complete. Would store {} articles.", report.total_scraped());
    } else {
        println!(
            "Stored {} articles, {} redirects, {} failures.",
            report.total_scraped(),
            report.total_redirected(),
            report.total_failed()
        );
    }
    println!(
        "Program was running for {:.2} seconds.",
        report.elapsed.as_secs_f64()
    );
}

fn cmd_sections(config: &Config) -> ScraperResult<()> {
    println!("Configured sections:\n");
    for section in Section::defaults(&config.base_url)? {
        println!("  {}", section.tag);
        println!("    URL: {}", section.url);
    }
    Ok(())
}

fn cmd_list(config: &Config, tag: Option<String>, limit: usize) -> ScraperResult<()> {
    let repo = SqliteArticleRepository::new(open_storage(config)?);
    let articles = repo.list(tag, Some(limit))?;

    if articles.is_empty() {
        println!("No articles stored.");
        return Ok(());
    }

    for article in articles {
        println!("  {} [{}]", article.title, article.tag);
        println!("    {} | {}", article.author, article.date);
        println!("    URL: {}", article.link);
        if let Some(photo) = &article.photo {
            println!("    Photo: {}", photo);
        }
        println!();
    }

    Ok(())
}

fn cmd_redirects(config: &Config) -> ScraperResult<()> {
    let repo = SqliteRedirectRepository::new(open_storage(config)?);
    let redirects = repo.list()?;

    if redirects.is_empty() {
        println!("No redirects recorded.");
        return Ok(());
    }

    for redirect in redirects {
        match &redirect.target {
            Some(target) => println!("  {} -> {}", redirect.link, target),
            None => println!("  {}", redirect.link),
        }
    }

    Ok(())
}

fn cmd_stats(config: &Config) -> ScraperResult<()> {
    let storage = open_storage(config)?;
    let counts = SqliteArticleRepository::new(storage.clone()).count_by_tag()?;
    let redirects = SqliteRedirectRepository::new(storage).list()?.len();

    let total: i64 = counts.iter().map(|(_, count)| count).sum();

    println!("Articles per tag:\n");
    for (tag, count) in &counts {
        println!("  {:<24} {}", tag, count);
    }
    println!();
    println!("Total articles: {}", total);
    println!("Total redirects: {}", redirects);

    Ok(())
}

fn cmd_export(config: &Config, tag: Option<String>, output: Option<String>) -> ScraperResult<()> {
    let service = ExportService::new(SqliteArticleRepository::new(open_storage(config)?));
    let json = service.export_json(tag)?;

    match output {
        Some(path) => {
            fs::write(&path, &json)?;
            println!("Exported articles to {}", path);
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}
