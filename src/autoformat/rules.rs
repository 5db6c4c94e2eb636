//! Prefix-triggered formatting rules.

use std::borrow::Cow;

use crate::document::{BlockType, InlineStyle};

/// What a matched rule applies across the triggering block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatTarget {
    /// Inline style over the whole text span
    Inline(InlineStyle),
    /// Block type of the whole block
    Block(BlockType),
}

/// A text prefix and the formatting it triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoformatRule {
    pub prefix: Cow<'static, str>,
    pub target: FormatTarget,
}

impl AutoformatRule {
    pub const fn inline(prefix: &'static str, style: InlineStyle) -> Self {
        Self {
            prefix: Cow::Borrowed(prefix),
            target: FormatTarget::Inline(style),
        }
    }

    pub const fn block(prefix: &'static str, block_type: BlockType) -> Self {
        Self {
            prefix: Cow::Borrowed(prefix),
            target: FormatTarget::Block(block_type),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        text.starts_with(self.prefix.as_ref())
    }
}

/// Ordered rule table. The first matching rule wins; rules are never
/// reordered, so a shorter prefix listed first shadows longer ones it
/// is a prefix of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<AutoformatRule>,
}

impl RuleSet {
    pub const fn new(rules: Vec<AutoformatRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[AutoformatRule] {
        &self.rules
    }

    /// First rule whose prefix starts `text`.
    pub fn match_text(&self, text: &str) -> Option<&AutoformatRule> {
        self.rules.iter().find(|rule| rule.matches(text))
    }
}

impl Default for RuleSet {
    /// `# `, `* `, `** `, `*** ` in that order.
    ///
    /// `"** x"` does not start with `"* "`, so the order does not shadow
    /// any of these four.
    fn default() -> Self {
        Self::new(vec![
            AutoformatRule::inline("# ", InlineStyle::H1_STYLE),
            AutoformatRule::inline("* ", InlineStyle::BOLD),
            AutoformatRule::inline("** ", InlineStyle::COLOR_RED),
            AutoformatRule::inline("*** ", InlineStyle::UNDERLINE),
        ])
    }
}
