//! Style-name to terminal-style mapping.
//!
//! The table is built once at startup. Inline styles and block types are
//! looked up by name, so names the table does not know render unstyled.

use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};

use crate::document::{BlockType, InlineStyle, StyleSet};

/// Maps inline style names and block types to terminal styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMap {
    inline: HashMap<InlineStyle, Style>,
    blocks: HashMap<BlockType, Style>,
}

impl StyleMap {
    /// A table with no entries.
    pub fn new() -> Self {
        Self {
            inline: HashMap::new(),
            blocks: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_inline(mut self, name: InlineStyle, style: Style) -> Self {
        self.inline.insert(name, style);
        self
    }

    #[must_use]
    pub fn with_block(mut self, block_type: BlockType, style: Style) -> Self {
        self.blocks.insert(block_type, style);
        self
    }

    pub fn inline(&self, name: &InlineStyle) -> Option<Style> {
        self.inline.get(name).copied()
    }

    pub fn block(&self, block_type: &BlockType) -> Option<Style> {
        self.blocks.get(block_type).copied()
    }

    /// Every inline style in `styles` patched together.
    pub fn inline_style(&self, styles: &StyleSet) -> Style {
        Self::patch_all(Style::default(), styles.iter().filter_map(|name| self.inline(name)))
    }

    /// Block style patched with every inline style in `styles`.
    pub fn style_for(&self, block_type: &BlockType, styles: &StyleSet) -> Style {
        self.block(block_type)
            .unwrap_or_default()
            .patch(self.inline_style(styles))
    }

    fn patch_all(base: Style, styles: impl Iterator<Item = Style>) -> Style {
        styles.fold(base, Style::patch)
    }
}

impl Default for StyleMap {
    /// Built-in styles plus `COLOR_RED` and `H1_STYLE`.
    ///
    /// Terminals have one font size, so `H1_STYLE` is bold black text on a
    /// gray bar instead of large text.
    fn default() -> Self {
        Self::new()
            .with_inline(InlineStyle::BOLD, Style::new().add_modifier(Modifier::BOLD))
            .with_inline(InlineStyle::ITALIC, Style::new().add_modifier(Modifier::ITALIC))
            .with_inline(
                InlineStyle::UNDERLINE,
                Style::new().add_modifier(Modifier::UNDERLINED),
            )
            .with_inline(
                InlineStyle::STRIKETHROUGH,
                Style::new().add_modifier(Modifier::CROSSED_OUT),
            )
            .with_inline(
                InlineStyle::CODE,
                Style::new().bg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
            .with_inline(InlineStyle::COLOR_RED, Style::new().fg(Color::Red))
            .with_inline(
                InlineStyle::H1_STYLE,
                Style::new()
                    .fg(Color::Black)
                    .bg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )
            .with_block(
                BlockType::HEADER_ONE,
                Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .with_block(BlockType::HEADER_TWO, Style::new().add_modifier(Modifier::BOLD))
            .with_block(
                BlockType::BLOCKQUOTE,
                Style::new().fg(Color::Blue).add_modifier(Modifier::ITALIC),
            )
    }
}
