use std::fmt;

use feed_logging::{feed_info, feed_warn};
use feedsnap_core::FeedParseResult;
use thiserror::Error;

use crate::{decode_html, discover_feed_links, parse_feed, FetchError, Fetcher};

const FEED_EXTENSIONS: &[&str] = &[".rss", ".xml", ".atom"];
const FALLBACK_SUFFIXES: &[&str] = &[".rss", ".xml"];

/// One way of turning a user-supplied URL into a parsed feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Fetch the URL and parse it as a feed.
    Direct,
    /// Append a feed extension to the URL and try that.
    Suffix(&'static str),
    /// Fetch the URL as HTML and follow its advertised feed links.
    LinkDiscovery,
}

impl Strategy {
    /// Strategies to try for `url`, in order.
    pub fn plan(url: &str) -> Vec<Strategy> {
        let mut plan = vec![Strategy::Direct];
        if !FEED_EXTENSIONS.iter().any(|ext| url.ends_with(ext)) {
            plan.extend(FALLBACK_SUFFIXES.iter().copied().map(Strategy::Suffix));
        }
        plan.push(Strategy::LinkDiscovery);
        plan
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Direct => write!(f, "direct fetch"),
            Strategy::Suffix(suffix) => write!(f, "{suffix} suffix"),
            Strategy::LinkDiscovery => write!(f, "feed link discovery"),
        }
    }
}

/// Why a single strategy attempt did not produce a feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("fetching {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("feed at {url} contains no entries")]
    Empty { url: String },
    #[error("feed at {url} could not be parsed: {message}")]
    Malformed { url: String, message: String },
    #[error("no feed links found in {url}")]
    NoFeedLinks { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub strategy: Strategy,
    pub error: AttemptError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no feed found for {url} ({} strategies failed)", .attempts.len())]
    NotFound {
        url: String,
        attempts: Vec<FailedAttempt>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFeed {
    pub parsed: FeedParseResult,
    /// The URL the feed was actually read from.
    pub final_url: String,
    pub strategy: Strategy,
}

/// Locates a feed with at least one entry behind a user-supplied URL.
pub struct FeedResolver<'a> {
    fetcher: &'a dyn Fetcher,
}

impl<'a> FeedResolver<'a> {
    pub fn new(fetcher: &'a dyn Fetcher) -> Self {
        Self { fetcher }
    }

    pub async fn resolve(&self, url: &str) -> Result<ResolvedFeed, ResolveError> {
        feed_info!("Fetching feed: {}", url);
        let mut attempts = Vec::new();

        for strategy in Strategy::plan(url) {
            match self.attempt(strategy, url).await {
                Ok(resolved) => {
                    feed_info!(
                        "Parsed {} via {} ({} entries)",
                        resolved.final_url,
                        strategy,
                        resolved.parsed.entries.len()
                    );
                    return Ok(resolved);
                }
                Err(error) => {
                    feed_warn!("{} failed for {}: {}", strategy, url, error);
                    attempts.push(FailedAttempt { strategy, error });
                }
            }
        }

        feed_warn!("All strategies failed for {}", url);
        Err(ResolveError::NotFound {
            url: url.to_string(),
            attempts,
        })
    }

    async fn attempt(&self, strategy: Strategy, url: &str) -> Result<ResolvedFeed, AttemptError> {
        let (parsed, final_url) = match strategy {
            Strategy::Direct => (self.fetch_feed(url).await?, url.to_string()),
            Strategy::Suffix(suffix) => {
                let candidate = format!("{}{suffix}", url.trim_end_matches('/'));
                (self.fetch_feed(&candidate).await?, candidate)
            }
            Strategy::LinkDiscovery => self.follow_feed_links(url).await?,
        };
        Ok(ResolvedFeed {
            parsed,
            final_url,
            strategy,
        })
    }

    async fn fetch_feed(&self, url: &str) -> Result<FeedParseResult, AttemptError> {
        let output = self.fetcher.fetch(url).await.map_err(|source| AttemptError::Fetch {
            url: url.to_string(),
            source,
        })?;
        accept(parse_feed(&output.bytes), url)
    }

    async fn follow_feed_links(&self, url: &str) -> Result<(FeedParseResult, String), AttemptError> {
        let page = self.fetcher.fetch(url).await.map_err(|source| AttemptError::Fetch {
            url: url.to_string(),
            source,
        })?;
        let html = decode_html(
            &page.bytes,
            page.metadata.content_type.as_deref(),
            Some(&page.metadata.final_url),
        );
        let links = discover_feed_links(&html, &page.metadata.final_url);

        let mut last_error = AttemptError::NoFeedLinks {
            url: url.to_string(),
        };
        for link in links {
            feed_info!("Found feed link: {}", link);
            match self.fetch_feed(&link).await {
                Ok(parsed) => return Ok((parsed, link)),
                Err(err) => {
                    feed_warn!("Linked feed {} failed: {}", link, err);
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
}

/// A parse result counts only if it carries entries; recovered entries from a
/// malformed document are accepted with a warning.
fn accept(parsed: FeedParseResult, url: &str) -> Result<FeedParseResult, AttemptError> {
    if parsed.has_entries() {
        if parsed.malformed {
            feed_warn!(
                "Feed at {} had parse errors, using recovered entries: {}",
                url,
                parsed.error.as_deref().unwrap_or("unknown parsing error")
            );
        }
        return Ok(parsed);
    }
    if parsed.malformed {
        return Err(AttemptError::Malformed {
            url: url.to_string(),
            message: parsed
                .error
                .unwrap_or_else(|| "unknown parsing error".to_string()),
        });
    }
    Err(AttemptError::Empty {
        url: url.to_string(),
    })
}
