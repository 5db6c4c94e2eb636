//! Serialized document layout.
//!
//! ```json
//! {"blocks":[{"key":"0","text":"* hi","type":"unstyled","depth":0,
//!   "inlineStyleRanges":[{"offset":0,"length":4,"style":"BOLD"}],
//!   "entityRanges":[],"data":{}}],"entityMap":{}}
//! ```
//!
//! Offsets and lengths count chars. Entity fields are written empty and
//! ignored on read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::{Block, BlockKey, BlockType, Document, InlineStyle};

use super::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: BlockKey,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

/// Convert a document to its serialized layout.
///
/// Each style is written as its maximal contiguous ranges, styles in order
/// of first appearance in the block.
pub fn to_raw(doc: &Document) -> RawContent {
    let blocks = doc.blocks().iter().map(raw_block).collect();
    RawContent {
        blocks,
        entity_map: Map::new(),
    }
}

fn raw_block(block: &Block) -> RawBlock {
    let mut seen: Vec<&InlineStyle> = Vec::new();
    for offset in 0..block.len() {
        for style in block.styles_at(offset).into_iter().flatten() {
            if !seen.contains(&style) {
                seen.push(style);
            }
        }
    }
    let inline_style_ranges = seen
        .into_iter()
        .flat_map(|style| {
            block
                .ranges_with_style(style)
                .into_iter()
                .map(move |range| RawInlineStyleRange {
                    offset: range.start,
                    length: range.len(),
                    style: style.clone(),
                })
        })
        .collect();
    RawBlock {
        key: block.key().clone(),
        text: block.text().to_owned(),
        block_type: block.block_type().clone(),
        depth: block.depth(),
        inline_style_ranges,
        entity_ranges: Vec::new(),
        data: Map::new(),
    }
}

/// Rebuild a document from its serialized layout.
///
/// # Errors
/// Returns [`StorageError::Malformed`] when there are no blocks, keys repeat,
/// or a style range runs past its block's text.
pub fn from_raw(raw: RawContent) -> Result<Document, StorageError> {
    let mut blocks = Vec::with_capacity(raw.blocks.len());
    for raw_block in raw.blocks {
        let len = raw_block.text.chars().count();
        let mut block = Block::new(raw_block.key, raw_block.text)
            .with_block_type(raw_block.block_type)
            .with_depth(raw_block.depth);
        for range in &raw_block.inline_style_ranges {
            let end = range.offset.checked_add(range.length);
            if end.is_none_or(|end| end > len) {
                return Err(StorageError::Malformed(format!(
                    "style {} at {}+{} exceeds block {} of length {len}",
                    range.style,
                    range.offset,
                    range.length,
                    block.key()
                )));
            }
            block = block.with_style(range.offset..range.offset + range.length, &range.style);
        }
        blocks.push(block);
    }
    Document::from_blocks(blocks).map_err(|err| StorageError::Malformed(err.to_string()))
}
