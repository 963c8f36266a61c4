use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "railnews")]
#[command(about = "Scrape rail-industry news articles into a SQLite database")]
#[command(version)]
pub struct Cli {
    /// Set the logging level
    #[arg(short = 'l', long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape all sections and store new articles
    Run {
        /// Only scrape sections with this tag (repeatable)
        #[arg(short, long = "section", value_name = "TAG")]
        sections: Vec<String>,

        /// Load pages over plain HTTP instead of driving Firefox
        #[arg(long)]
        http: bool,

        /// Extract articles but don't store them or download photos
        #[arg(long)]
        dry_run: bool,

        /// Don't download article photos
        #[arg(long)]
        skip_images: bool,

        /// Seconds to wait after each page load (overrides RAILNEWS_PAGE_DELAY)
        #[arg(long, value_name = "SECS")]
        delay: Option<u64>,
    },

    /// List the configured sections
    Sections,

    /// List stored articles, newest first
    List {
        /// Only show articles with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Maximum number of articles to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// List links that redirected instead of showing an article
    Redirects,

    /// Show article counts per tag
    Stats,

    /// Export stored articles as JSON
    Export {
        /// Only export articles with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            sections: Vec::new(),
            http: false,
            dry_run: false,
            skip_images: false,
            delay: None,
        }
    }
}
