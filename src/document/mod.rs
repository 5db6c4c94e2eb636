//! Rich-text document model.
//!
//! This module handles:
//! - Immutable document values (blocks with per-character inline styles)
//! - Selections expressed as anchor/focus positions
//! - Pure transformations producing new documents ([`modifier`])

pub mod modifier;
mod selection;
mod types;

pub use selection::{Position, Selection};
pub use types::{
    Block, BlockKey, BlockType, Document, InlineStyle, InvalidDocument, StyleRun, StyleSet,
};
