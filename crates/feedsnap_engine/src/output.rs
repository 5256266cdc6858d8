use std::path::Path;

use feed_logging::feed_info;
use feedsnap_core::OutputDocument;
use thiserror::Error;

use crate::{atomic_write, PersistError};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("refusing to write a document without any items")]
    NoItems,
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Pretty-printed JSON with a trailing newline; non-ASCII text is kept as is.
pub fn render_document(doc: &OutputDocument) -> Result<String, OutputError> {
    let mut json = serde_json::to_string_pretty(doc)?;
    json.push('\n');
    Ok(json)
}

/// Write `doc` to `path` in one go. Documents without items are rejected and
/// leave any existing file untouched.
pub fn write_output(path: &Path, doc: &OutputDocument) -> Result<(), OutputError> {
    if !doc.has_items() {
        return Err(OutputError::NoItems);
    }
    let json = render_document(doc)?;
    atomic_write(path, &json)?;
    feed_info!(
        "Wrote {} ({} feeds, {} items)",
        path.display(),
        doc.feeds.len(),
        doc.item_count()
    );
    Ok(())
}
