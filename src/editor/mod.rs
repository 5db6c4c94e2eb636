//! Editor state snapshots for in-place rich-text editing.
//!
//! Provides an immutable [`EditorState`] (document + selection + last
//! change), designed for integration into the TEA architecture: each
//! keystroke produces a new snapshot that the autoformat engine may restyle.

mod state;

pub use state::{ChangeType, Direction, EditorState};
