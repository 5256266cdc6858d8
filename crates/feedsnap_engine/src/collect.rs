use feed_logging::{feed_info, feed_warn};
use feedsnap_core::{identify, normalize, source_title, FeedSource, NormalizeSettings, TextExtractor};

use crate::{FeedResolver, Fetcher, ResolvedFeed};

/// Resolve and normalize each URL in turn. URLs that resolve to no feed are
/// logged and left out; the result keeps input order.
pub async fn collect_feeds(
    fetcher: &dyn Fetcher,
    urls: &[String],
    settings: &NormalizeSettings,
    extractor: &dyn TextExtractor,
) -> Vec<FeedSource> {
    let resolver = FeedResolver::new(fetcher);
    let mut feeds = Vec::with_capacity(urls.len());

    for url in urls {
        match resolver.resolve(url).await {
            Ok(resolved) => {
                let source = build_source(url, resolved, settings, extractor);
                feed_info!("Extracted {} items from {}", source.items.len(), source.title);
                feeds.push(source);
            }
            Err(err) => feed_warn!("Skipping {}: {}", url, err),
        }
    }

    feeds
}

/// The identifier and fallback title come from the URL the user gave, not the
/// URL the feed was finally read from.
pub fn build_source(
    url: &str,
    resolved: ResolvedFeed,
    settings: &NormalizeSettings,
    extractor: &dyn TextExtractor,
) -> FeedSource {
    FeedSource {
        id: identify(url),
        title: source_title(resolved.parsed.title.as_deref(), url),
        items: normalize(&resolved.parsed.entries, settings, extractor),
        final_url: resolved.final_url,
    }
}
