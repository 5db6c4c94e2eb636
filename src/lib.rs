// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. storage::StorageError)
    clippy::module_name_repetitions
)]

//! # Stylepad
//!
//! A terminal rich-text editor whose text restyles itself as you type.
//!
//! Typing a marker at the start of a line formats the whole line:
//! - `# ` gives a header bar
//! - `* ` makes it bold
//! - `** ` makes it red
//! - `*** ` underlines it
//!
//! Content is kept in a JSON key/value store and restored on startup.
//!
//! ## Architecture
//!
//! Stylepad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions, each edit run through the autoformat engine
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Blocks, per-character styles and pure modifiers
//! - [`editor`]: Immutable editor snapshots
//! - [`autoformat`]: Prefix rules and the engine that applies them
//! - [`storage`]: Key/value stores and the JSON content format
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod autoformat;
pub mod config;
pub mod document;
pub mod editor;
pub mod storage;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::autoformat::{AutoformatEngine, AutoformatRule, RuleSet};
    pub use crate::document::{BlockType, Document, InlineStyle};
    pub use crate::editor::EditorState;
    pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
}
