use feed_logging::feed_debug;
use feed_rs::model::Entry;
use feed_rs::parser;
use feedsnap_core::{ContentBlock, FeedParseResult, RawEntry};
use roxmltree::{Document, Node, ParsingOptions};

const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// Parse RSS/Atom bytes into a [`FeedParseResult`].
///
/// Never fails. `feed-rs` does the lenient parse; a second strict XML pass
/// keeps each entry's date text as written and flags documents that are not
/// well-formed XML as malformed while keeping whatever `feed-rs` recovered.
pub fn parse_feed(bytes: &[u8]) -> FeedParseResult {
    let feed = match parser::parse(bytes) {
        Ok(feed) => feed,
        Err(err) => {
            return FeedParseResult {
                malformed: true,
                error: Some(err.to_string()),
                title: None,
                entries: Vec::new(),
            }
        }
    };

    let text = String::from_utf8_lossy(bytes);
    let (raw_dates, error) = match entry_dates(text.trim_start_matches('\u{feff}')) {
        Ok(dates) => (Some(dates), None),
        Err(err) => {
            feed_debug!("Feed is not well-formed XML: {}", err);
            (None, Some(err.to_string()))
        }
    };
    // Dates are matched by position; skip them if the two parsers disagree.
    let raw_dates = raw_dates.filter(|dates| dates.len() == feed.entries.len());

    let title = feed.title.map(|t| t.content);
    let entries = match raw_dates {
        Some(dates) => feed
            .entries
            .into_iter()
            .zip(dates)
            .map(|(entry, dates)| raw_entry(entry, dates))
            .collect(),
        None => feed
            .entries
            .into_iter()
            .map(|entry| raw_entry(entry, EntryDates::default()))
            .collect(),
    };

    FeedParseResult {
        malformed: error.is_some(),
        error,
        title,
        entries,
    }
}

/// Date text exactly as it appears in the document.
#[derive(Debug, Default)]
struct EntryDates {
    published: Option<String>,
    updated: Option<String>,
    created: Option<String>,
}

fn entry_dates(xml: &str) -> Result<Vec<EntryDates>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name("item") || node.has_tag_name("entry"))
        .map(|node| EntryDates {
            published: child_text(
                &node,
                &[
                    ("pubDate", None),
                    ("published", None),
                    ("issued", None),
                    ("date", Some(DC_NS)),
                ],
            ),
            updated: child_text(&node, &[("updated", None), ("modified", None)]),
            created: child_text(&node, &[("created", None)]),
        })
        .collect())
}

/// Text of the first child matching `names`, in preference order. A `None`
/// namespace matches any namespace.
fn child_text(node: &Node<'_, '_>, names: &[(&str, Option<&str>)]) -> Option<String> {
    names.iter().find_map(|(name, namespace)| {
        node.children()
            .filter(|child| child.is_element() && child.tag_name().name() == *name)
            .find(|child| namespace.is_none() || child.tag_name().namespace() == *namespace)
            .and_then(|child| child.text())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned)
    })
}

fn raw_entry(entry: Entry, dates: EntryDates) -> RawEntry {
    let link = pick_entry_link(&entry);
    let description = entry
        .media
        .iter()
        .find_map(|media| media.description.as_ref())
        .map(|text| text.content.clone());

    RawEntry {
        title: entry.title.map(|t| t.content),
        link,
        published: dates
            .published
            .or_else(|| entry.published.map(|d| d.to_rfc3339())),
        updated: dates
            .updated
            .or_else(|| entry.updated.map(|d| d.to_rfc3339())),
        created: dates.created,
        summary: entry.summary.map(|t| t.content),
        description,
        content: entry.content.map(|content| {
            vec![ContentBlock {
                value: content.body,
            }]
        }),
    }
}

fn pick_entry_link(entry: &Entry) -> Option<String> {
    entry
        .links
        .iter()
        .find(|l| l.rel.as_deref() == Some("alternate"))
        .or_else(|| entry.links.first())
        .map(|l| l.href.trim().to_string())
        .filter(|href| !href.is_empty())
}
