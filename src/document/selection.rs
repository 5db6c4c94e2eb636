//! Selection over a document: an anchor and a focus position.

use super::types::{BlockKey, Document};

/// A caret position: block key plus char offset in that block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub key: BlockKey,
    pub offset: usize,
}

impl Position {
    pub const fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// Anchor/focus pair. The anchor stays put while the focus moves when a
/// range is extended, so the anchor may come after the focus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    anchor: Position,
    focus: Position,
}

impl Selection {
    pub const fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// A caret at `position`.
    pub fn collapsed(position: Position) -> Self {
        Self {
            anchor: position.clone(),
            focus: position,
        }
    }

    /// The whole of one block, `start..end` in chars.
    pub fn within_block(key: &BlockKey, start: usize, end: usize) -> Self {
        Self::new(
            Position::new(key.clone(), start),
            Position::new(key.clone(), end),
        )
    }

    pub const fn anchor(&self) -> &Position {
        &self.anchor
    }

    pub const fn focus(&self) -> &Position {
        &self.focus
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Whether the focus sits before the anchor in document order.
    ///
    /// Positions on blocks missing from `doc` are treated as forward.
    pub fn is_backward(&self, doc: &Document) -> bool {
        match (
            doc.block_index(&self.anchor.key),
            doc.block_index(&self.focus.key),
        ) {
            (Some(a), Some(f)) => (f, self.focus.offset) < (a, self.anchor.offset),
            _ => false,
        }
    }

    /// The earlier of anchor and focus.
    pub fn start(&self, doc: &Document) -> &Position {
        if self.is_backward(doc) {
            &self.focus
        } else {
            &self.anchor
        }
    }

    /// The later of anchor and focus.
    pub fn end(&self, doc: &Document) -> &Position {
        if self.is_backward(doc) {
            &self.anchor
        } else {
            &self.focus
        }
    }

    /// Same anchor, new focus.
    #[must_use]
    pub fn with_focus(&self, focus: Position) -> Self {
        Self {
            anchor: self.anchor.clone(),
            focus,
        }
    }

    /// Clamp both ends onto `doc`: offsets to block length, unknown keys to
    /// the end of the last block.
    #[must_use]
    pub fn clamped_to(&self, doc: &Document) -> Self {
        Self {
            anchor: clamp_position(&self.anchor, doc),
            focus: clamp_position(&self.focus, doc),
        }
    }
}

fn clamp_position(position: &Position, doc: &Document) -> Position {
    doc.block(&position.key).map_or_else(
        || {
            let last = doc.last_block();
            Position::new(last.key().clone(), last.len())
        },
        |block| Position::new(position.key.clone(), position.offset.min(block.len())),
    )
}
