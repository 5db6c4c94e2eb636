//! Pure transformations over a [`Document`].
//!
//! Every function takes the current document by reference and returns a new
//! one. Functions that move text also return where the caret ends up.
//! Ranges referring to blocks that are not in the document leave it unchanged.

use super::selection::{Position, Selection};
use super::types::{Block, BlockType, Document, InlineStyle, StyleSet};

/// Resolved range: (start block index, start offset, end block index, end offset).
type Span = (usize, usize, usize, usize);

fn resolve(doc: &Document, range: &Selection) -> Option<Span> {
    let start = range.start(doc);
    let end = range.end(doc);
    let si = doc.block_index(&start.key)?;
    let ei = doc.block_index(&end.key)?;
    let so = start.offset.min(doc.blocks[si].len());
    let eo = end.offset.min(doc.blocks[ei].len());
    Some((si, so, ei, eo))
}

/// Set the block type of every block touched by `range`.
pub fn set_block_type(doc: &Document, range: &Selection, block_type: &BlockType) -> Document {
    let Some((si, _, ei, _)) = resolve(doc, range) else {
        return doc.clone();
    };
    let mut out = doc.clone();
    for block in &mut out.blocks[si..=ei] {
        block.block_type = block_type.clone();
    }
    out
}

/// Add `style` to every char covered by `range`.
pub fn apply_inline_style(doc: &Document, range: &Selection, style: &InlineStyle) -> Document {
    let Some((si, so, ei, eo)) = resolve(doc, range) else {
        return doc.clone();
    };
    let mut out = doc.clone();
    for idx in si..=ei {
        let block = &mut out.blocks[idx];
        let start = if idx == si { so } else { 0 };
        let end = if idx == ei { eo } else { block.len() };
        block.add_style(start..end, style);
    }
    out
}

/// Delete the text covered by `range`, joining the first and last block.
pub fn remove_range(doc: &Document, range: &Selection) -> (Document, Position) {
    let Some((si, so, ei, eo)) = resolve(doc, range) else {
        return (doc.clone(), range.focus().clone());
    };
    let mut out = doc.clone();
    if si == ei {
        out.blocks[si].remove(so..eo);
    } else {
        let (tail, tail_styles) = out.blocks[ei].split_off(eo);
        let first = &mut out.blocks[si];
        first.split_off(so);
        first.append(&tail, tail_styles);
        out.blocks.drain(si + 1..=ei);
    }
    let caret = Position::new(out.blocks[si].key.clone(), so);
    (out, caret)
}

/// Insert `text` at `at`; every inserted char carries `styles`.
///
/// Newlines split the block: text after the insertion point moves to the
/// last new block, new blocks are unstyled and get fresh keys.
pub fn insert_text(
    doc: &Document,
    at: &Position,
    text: &str,
    styles: &StyleSet,
) -> (Document, Position) {
    let Some(idx) = doc.block_index(&at.key) else {
        return (doc.clone(), at.clone());
    };
    let mut out = doc.clone();
    let offset = at.offset.min(out.blocks[idx].len());
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();

    if rest.is_empty() {
        out.blocks[idx].insert(offset, first, styles);
        let caret = Position::new(at.key.clone(), offset + first.chars().count());
        return (out, caret);
    }

    let (tail, tail_styles) = out.blocks[idx].split_off(offset);
    let end = out.blocks[idx].len();
    out.blocks[idx].insert(end, first, styles);

    let mut insert_at = idx + 1;
    for line in &rest {
        let key = out.generate_key();
        let mut block = Block::new(key, "");
        block.insert(0, line, styles);
        out.blocks.insert(insert_at, block);
        insert_at += 1;
    }

    let last = &mut out.blocks[insert_at - 1];
    let caret = Position::new(last.key.clone(), last.len());
    last.append(&tail, tail_styles);
    (out, caret)
}

/// Replace the text covered by `range` with `text`, styled with `styles`.
///
/// Replacing a span with its own text is how previous inline styles are
/// stripped without touching the characters.
pub fn replace_text(
    doc: &Document,
    range: &Selection,
    text: &str,
    styles: &StyleSet,
) -> (Document, Position) {
    let (removed, caret) = remove_range(doc, range);
    insert_text(&removed, &caret, text, styles)
}

/// Split the block at `at` (Enter).
pub fn split_block(doc: &Document, at: &Position) -> (Document, Position) {
    insert_text(doc, at, "\n", &StyleSet::new())
}
