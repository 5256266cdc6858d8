use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use feedsnap_core::NormalizeSettings;
use feedsnap_engine::FetchSettings;
use log::LevelFilter;

use crate::run::RunConfig;

#[derive(Debug, Parser)]
#[command(name = "feedsnap", version)]
#[command(about = "Fetch RSS/Atom feeds and write their latest entries as JSON")]
pub struct Cli {
    /// Feed URL or comma-separated list of URLs (defaults to $FEED_URLS, then $FEED_URL)
    pub urls: Option<String>,

    /// Where to write the JSON document
    #[arg(long, default_value = "feed-data.json")]
    pub output: PathBuf,

    /// Entries considered per feed
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Summary length limit in characters
    #[arg(long)]
    pub summary_chars: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn into_run_config(self, urls: Vec<String>) -> RunConfig {
        let mut fetch = FetchSettings::default();
        if let Some(secs) = self.timeout_secs {
            fetch.request_timeout = Duration::from_secs(secs);
        }
        if let Some(user_agent) = self.user_agent {
            fetch.user_agent = user_agent;
        }

        let mut normalize = NormalizeSettings::default();
        if let Some(max_items) = self.max_items {
            normalize.max_items = max_items;
        }
        if let Some(chars) = self.summary_chars {
            normalize.max_summary_chars = chars;
        }

        RunConfig {
            urls,
            output: self.output,
            fetch,
            normalize,
        }
    }
}
