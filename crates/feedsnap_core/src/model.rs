use serde::{Deserialize, Serialize};

/// One block of entry content, as exposed by the feed parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBlock {
    pub value: Option<String>,
}

/// A feed entry as handed over by the parser, before normalization.
///
/// Date fields hold text; the normalizer does not interpret them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub created: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub content: Option<Vec<ContentBlock>>,
}

/// Result of handing a document to the feed parser.
///
/// `malformed` mirrors the parser's recoverable-error flag: entries may still
/// be present when it is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedParseResult {
    pub malformed: bool,
    pub error: Option<String>,
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

impl FeedParseResult {
    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub published: String,
    pub summary: String,
}

/// A resolved and normalized feed, one per input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub id: String,
    #[serde(rename = "source")]
    pub title: String,
    #[serde(rename = "url")]
    pub final_url: String,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub fetched_at: String,
    pub feeds: Vec<FeedSource>,
}

impl OutputDocument {
    pub fn new(fetched_at: impl Into<String>, feeds: Vec<FeedSource>) -> Self {
        Self {
            fetched_at: fetched_at.into(),
            feeds,
        }
    }

    pub fn item_count(&self) -> usize {
        self.feeds.iter().map(|feed| feed.items.len()).sum()
    }

    /// A document is only worth writing when some feed produced an item.
    pub fn has_items(&self) -> bool {
        self.item_count() > 0
    }
}
