//! Persistence of the editor content in a key/value store.
//!
//! The document is serialized to JSON ([`raw`]) and kept under
//! [`CONTENT_KEY`]. Loading never fails: absent or malformed content means
//! there is nothing to restore.

pub mod raw;
mod store;

use tracing::{debug, warn};

use crate::document::Document;

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Key the document is stored under.
pub const CONTENT_KEY: &str = "editorContent";

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed content: {0}")]
    Malformed(String),
}

/// Serialize `doc` to its stored JSON text.
///
/// # Errors
/// Returns an error if JSON encoding fails.
pub fn encode(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string(&raw::to_raw(doc))?)
}

/// Parse stored JSON text back into a document.
///
/// # Errors
/// Returns an error for invalid JSON or structurally invalid content.
pub fn decode(text: &str) -> Result<Document> {
    let raw: raw::RawContent = serde_json::from_str(text)?;
    raw::from_raw(raw)
}

/// Write `doc` under [`CONTENT_KEY`].
///
/// # Errors
/// Returns an error if encoding or the store write fails.
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, doc: &Document) -> Result<()> {
    let text = encode(doc)?;
    store.set(CONTENT_KEY, &text)?;
    debug!(blocks = doc.block_count(), bytes = text.len(), "content saved");
    Ok(())
}

/// Drop the stored document; other keys in the store are kept.
///
/// # Errors
/// Returns an error if the store write fails.
pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
    store.remove(CONTENT_KEY)?;
    debug!("stored content cleared");
    Ok(())
}

/// Read the document under [`CONTENT_KEY`], if a valid one is stored.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Option<Document> {
    let text = match store.get(CONTENT_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            warn!(%err, "stored content unreadable, starting empty");
            return None;
        }
    };
    match decode(&text) {
        Ok(doc) => {
            debug!(blocks = doc.block_count(), "content restored");
            Some(doc)
        }
        Err(err) => {
            warn!(%err, "stored content malformed, starting empty");
            None
        }
    }
}
