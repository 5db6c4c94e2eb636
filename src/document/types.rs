//! Core document types.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// The set of inline styles carried by one character.
pub type StyleSet = BTreeSet<InlineStyle>;

/// Stable identifier of a block within its document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whole-block structural tag (`unstyled`, `header-one`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockType(Cow<'static, str>);

impl BlockType {
    pub const UNSTYLED: Self = Self(Cow::Borrowed("unstyled"));
    pub const HEADER_ONE: Self = Self(Cow::Borrowed("header-one"));
    pub const HEADER_TWO: Self = Self(Cow::Borrowed("header-two"));
    pub const BLOCKQUOTE: Self = Self(Cow::Borrowed("blockquote"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for BlockType {
    fn default() -> Self {
        Self::UNSTYLED
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Character-range-scoped style tag.
///
/// Names are free-form so styles written by other tools survive a
/// load/save cycle; the constants cover the styles this crate renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InlineStyle(Cow<'static, str>);

impl InlineStyle {
    pub const BOLD: Self = Self(Cow::Borrowed("BOLD"));
    pub const ITALIC: Self = Self(Cow::Borrowed("ITALIC"));
    pub const UNDERLINE: Self = Self(Cow::Borrowed("UNDERLINE"));
    pub const STRIKETHROUGH: Self = Self(Cow::Borrowed("STRIKETHROUGH"));
    pub const CODE: Self = Self(Cow::Borrowed("CODE"));
    pub const COLOR_RED: Self = Self(Cow::Borrowed("COLOR_RED"));
    pub const H1_STYLE: Self = Self(Cow::Borrowed("H1_STYLE"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A maximal run of characters sharing the same style set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRun {
    /// Char offsets within the block
    pub range: Range<usize>,
    pub styles: StyleSet,
}

/// One line/paragraph of the document.
///
/// Text offsets are char offsets. `styles` holds exactly one entry per char.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub(super) key: BlockKey,
    pub(super) block_type: BlockType,
    pub(super) depth: u8,
    pub(super) text: String,
    pub(super) styles: Vec<StyleSet>,
}

impl Block {
    /// Create an unstyled block.
    pub fn new(key: BlockKey, text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = vec![StyleSet::new(); text.chars().count()];
        Self {
            key,
            block_type: BlockType::UNSTYLED,
            depth: 0,
            text,
            styles,
        }
    }

    #[must_use]
    pub fn with_block_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self
    }

    #[must_use]
    pub const fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Add `style` to every char in `range` (clamped to the text).
    #[must_use]
    pub fn with_style(mut self, range: Range<usize>, style: &InlineStyle) -> Self {
        self.add_style(range, style);
        self
    }

    pub const fn key(&self) -> &BlockKey {
        &self.key
    }

    pub const fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    pub const fn depth(&self) -> u8 {
        self.depth
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Styles of the char at `offset`.
    pub fn styles_at(&self, offset: usize) -> Option<&StyleSet> {
        self.styles.get(offset)
    }

    /// Group the per-char styles into contiguous runs covering the text.
    pub fn style_runs(&self) -> Vec<StyleRun> {
        let mut runs: Vec<StyleRun> = Vec::new();
        for (idx, styles) in self.styles.iter().enumerate() {
            match runs.last_mut() {
                Some(run) if run.styles == *styles => run.range.end = idx + 1,
                _ => runs.push(StyleRun {
                    range: idx..idx + 1,
                    styles: styles.clone(),
                }),
            }
        }
        runs
    }

    /// Maximal ranges carrying `style`.
    pub fn ranges_with_style(&self, style: &InlineStyle) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for (idx, styles) in self.styles.iter().enumerate() {
            if !styles.contains(style) {
                continue;
            }
            match ranges.last_mut() {
                Some(range) if range.end == idx => range.end = idx + 1,
                _ => ranges.push(idx..idx + 1),
            }
        }
        ranges
    }

    /// Insert `text` at `offset`, every new char carrying `styles`.
    pub(super) fn insert(&mut self, offset: usize, text: &str, styles: &StyleSet) {
        let offset = offset.min(self.len());
        let at = byte_index(&self.text, offset);
        self.text.insert_str(at, text);
        let count = text.chars().count();
        self.styles
            .splice(offset..offset, std::iter::repeat_n(styles.clone(), count));
    }

    /// Remove the chars in `range` (clamped).
    pub(super) fn remove(&mut self, range: Range<usize>) {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        let byte_start = byte_index(&self.text, start);
        let byte_end = byte_index(&self.text, end);
        self.text.replace_range(byte_start..byte_end, "");
        self.styles.drain(start..end);
    }

    /// Split at `offset`, returning the tail text and its styles.
    pub(super) fn split_off(&mut self, offset: usize) -> (String, Vec<StyleSet>) {
        let offset = offset.min(self.len());
        let at = byte_index(&self.text, offset);
        let tail = self.text.split_off(at);
        let tail_styles = self.styles.split_off(offset);
        (tail, tail_styles)
    }

    pub(super) fn append(&mut self, text: &str, styles: Vec<StyleSet>) {
        self.text.push_str(text);
        self.styles.extend(styles);
    }

    pub(super) fn add_style(&mut self, range: Range<usize>, style: &InlineStyle) {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        for styles in &mut self.styles[start..end] {
            styles.insert(style.clone());
        }
    }
}

/// Reasons a block list cannot form a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDocument {
    #[error("document has no blocks")]
    Empty,
    #[error("duplicate block key: {0}")]
    DuplicateKey(BlockKey),
}

/// An immutable, ordered, non-empty sequence of blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(super) blocks: Vec<Block>,
}

impl Document {
    /// A document holding one empty unstyled block.
    pub fn empty() -> Self {
        Self {
            blocks: vec![Block::new(BlockKey::new("0"), "")],
        }
    }

    /// Build a document from blocks, rejecting empty lists and duplicate keys.
    ///
    /// # Errors
    /// Returns [`InvalidDocument`] when the blocks cannot form a document.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, InvalidDocument> {
        if blocks.is_empty() {
            return Err(InvalidDocument::Empty);
        }
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !seen.insert(&block.key) {
                return Err(InvalidDocument::DuplicateKey(block.key.clone()));
            }
        }
        Ok(Self { blocks })
    }

    /// One unstyled block per line of `text`.
    pub fn from_plain_text(text: &str) -> Self {
        let blocks: Vec<Block> = text
            .split('\n')
            .enumerate()
            .map(|(idx, line)| Block::new(BlockKey::new(encode_key(idx)), line))
            .collect();
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.key == key)
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| &b.key == key)
    }

    pub fn block_at(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn first_block(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    /// All block texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A key not used by any block of this document.
    pub fn generate_key(&self) -> BlockKey {
        let mut n = self.blocks.len();
        loop {
            let candidate = BlockKey::new(encode_key(n));
            if self.block(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

/// Base-36 rendering of a key counter.
fn encode_key(mut n: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::new();
    loop {
        out.push(DIGITS[n % 36]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Byte index of char `offset` in `text`, or `text.len()` past the end.
pub(super) fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices().nth(offset).map_or(text.len(), |(i, _)| i)
}
