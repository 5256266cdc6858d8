use std::io;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use feed_logging::feed_info;
use feedsnap_core::{NormalizeSettings, OutputDocument};
use feedsnap_engine::{
    collect_feeds, write_output, FetchSettings, OutputError, ReqwestFetcher, ScraperTextExtractor,
};
use thiserror::Error;

pub const EXIT_RUNTIME: u8 = 1;
pub const EXIT_NO_INPUT: u8 = 2;
pub const EXIT_NO_FEEDS: u8 = 3;
pub const EXIT_NO_ITEMS: u8 = 4;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub urls: Vec<String>,
    pub output: PathBuf,
    pub fetch: FetchSettings,
    pub normalize: NormalizeSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub feeds: usize,
    pub items: usize,
    pub output: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("no feeds were successfully fetched")]
    NoFeeds,
    #[error("feeds were fetched but none had usable items")]
    NoItems,
    #[error("failed to write output: {0}")]
    Output(#[from] OutputError),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::NoFeeds => EXIT_NO_FEEDS,
            RunError::NoItems | RunError::Output(OutputError::NoItems) => EXIT_NO_ITEMS,
            RunError::Runtime(_) | RunError::Output(_) => EXIT_RUNTIME,
        }
    }
}

/// Current UTC time, second precision, `Z`-suffixed.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Resolve every configured URL, then write one document. Nothing is written
/// unless at least one feed produced an item.
pub async fn run(config: &RunConfig, fetched_at: impl Fn() -> String) -> Result<RunSummary, RunError> {
    feed_info!("Processing {} feed(s)...", config.urls.len());

    let fetcher = ReqwestFetcher::new(config.fetch.clone());
    let feeds = collect_feeds(&fetcher, &config.urls, &config.normalize, &ScraperTextExtractor).await;
    if feeds.is_empty() {
        return Err(RunError::NoFeeds);
    }

    let document = OutputDocument::new(fetched_at(), feeds);
    if !document.has_items() {
        return Err(RunError::NoItems);
    }
    write_output(&config.output, &document)?;

    Ok(RunSummary {
        feeds: document.feeds.len(),
        items: document.item_count(),
        output: config.output.clone(),
    })
}
