use feed_logging::feed_warn;
use thiserror::Error;

use crate::{FeedItem, NormalizeSettings, RawEntry};

/// Converts an HTML fragment into plain text.
pub trait TextExtractor {
    fn to_plain_text(&self, html: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("entry '{title}' has no link")]
    MissingLink { title: String },
    #[error("entry '{title}' has an empty content list")]
    EmptyContent { title: String },
}

/// Normalize the leading `settings.max_items` entries of a feed.
///
/// Entries that fail to normalize are logged and dropped; they still use up
/// their slot, later entries are not pulled in to replace them.
pub fn normalize(
    entries: &[RawEntry],
    settings: &NormalizeSettings,
    extractor: &dyn TextExtractor,
) -> Vec<FeedItem> {
    entries
        .iter()
        .take(settings.max_items)
        .filter_map(|entry| match normalize_entry(entry, settings, extractor) {
            Ok(item) => Some(item),
            Err(err) => {
                feed_warn!("Skipping entry: {}", err);
                None
            }
        })
        .collect()
}

pub fn normalize_entry(
    entry: &RawEntry,
    settings: &NormalizeSettings,
    extractor: &dyn TextExtractor,
) -> Result<FeedItem, EntryError> {
    let title = entry
        .title
        .clone()
        .unwrap_or_else(|| settings.untitled_placeholder.clone());

    let link = match entry.link.as_deref() {
        Some(link) if !link.trim().is_empty() => link.trim().to_string(),
        _ => return Err(EntryError::MissingLink { title }),
    };

    let published = entry
        .published
        .as_deref()
        .or(entry.updated.as_deref())
        .or(entry.created.as_deref())
        .unwrap_or_default()
        .to_string();

    let summary = match summary_source(entry, &title)? {
        Some(html) => truncate_chars(&extractor.to_plain_text(html), settings.max_summary_chars),
        None => String::new(),
    };

    Ok(FeedItem {
        title,
        link,
        published,
        summary,
    })
}

/// First present of summary, description, then the first content block.
fn summary_source<'a>(entry: &'a RawEntry, title: &str) -> Result<Option<&'a str>, EntryError> {
    if let Some(summary) = entry.summary.as_deref() {
        return Ok(Some(summary));
    }
    if let Some(description) = entry.description.as_deref() {
        return Ok(Some(description));
    }
    match entry.content.as_deref() {
        None => Ok(None),
        Some([]) => Err(EntryError::EmptyContent {
            title: title.to_string(),
        }),
        Some([first, ..]) => Ok(Some(first.value.as_deref().unwrap_or_default())),
    }
}

/// Cut `text` to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
