//! Feedsnap engine: fetching, feed resolution and output persistence.
mod collect;
mod decode;
mod discover;
mod fetch;
mod output;
mod parse;
mod persist;
mod resolve;
mod text;
mod types;

pub use collect::{build_source, collect_feeds};
pub use decode::decode_html;
pub use discover::discover_feed_links;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use output::{render_document, write_output, OutputError};
pub use parse::parse_feed;
pub use persist::{atomic_write, ensure_output_dir, PersistError};
pub use resolve::{AttemptError, FailedAttempt, FeedResolver, ResolveError, ResolvedFeed, Strategy};
pub use text::ScraperTextExtractor;
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
