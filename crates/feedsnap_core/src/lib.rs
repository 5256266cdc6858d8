//! Feedsnap core: pure data model, feed identification and item normalization.
mod identify;
mod model;
mod normalize;
mod settings;

pub use identify::{identify, source_title};
pub use model::{
    ContentBlock, FeedItem, FeedParseResult, FeedSource, OutputDocument, RawEntry,
};
pub use normalize::{normalize, normalize_entry, truncate_chars, EntryError, TextExtractor};
pub use settings::NormalizeSettings;
