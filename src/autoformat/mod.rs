//! Markdown-trigger autoformat.
//!
//! The engine looks at the block under the caret after every edit. When its
//! text starts with a rule's prefix, the whole block is restyled: block type
//! reset to `unstyled`, previous inline styles stripped, the rule's style
//! applied over the full span and the caret collapsed at the end of the
//! block. The text itself, marker included, is never changed.

mod rules;

use std::sync::LazyLock;

use tracing::{debug, warn};

use crate::document::{BlockType, Selection, StyleSet, modifier};
use crate::editor::{ChangeType, EditorState};

pub use rules::{AutoformatRule, FormatTarget, RuleSet};

static DEFAULT_ENGINE: LazyLock<AutoformatEngine> = LazyLock::new(AutoformatEngine::default);

/// Applies a [`RuleSet`] to editor snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoformatEngine {
    rules: RuleSet,
}

impl AutoformatEngine {
    pub const fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Restyle `new` if the block at its selection start matches a rule.
    ///
    /// The first argument is the snapshot before the host applied the raw
    /// edit; prefix rules only look at `new`. Returns `new` untouched when
    /// the selection is a range, its block is missing, no rule matches or
    /// the block already carries the rule's formatting.
    pub fn evaluate(&self, _old: &EditorState, new: EditorState) -> EditorState {
        let content = new.content();
        let start = new.selection().start(content);
        let (key, text) = match content.block(&start.key) {
            Some(block) => (block.key().clone(), block.text().to_owned()),
            None => {
                warn!(key = %start.key, "selection points at a missing block");
                return new;
            }
        };
        if !new.selection().is_collapsed() {
            return new;
        }
        let Some(rule) = self.rules.match_text(&text) else {
            return new;
        };
        debug!(prefix = %rule.prefix, block = %key, "autoformat rule matched");

        let span = Selection::within_block(&key, 0, text.chars().count());
        let reset = modifier::set_block_type(content, &span, &BlockType::UNSTYLED);
        let (cleared, end) = modifier::replace_text(&reset, &span, &text, &StyleSet::new());
        let (styled, change) = match &rule.target {
            FormatTarget::Inline(style) => (
                modifier::apply_inline_style(&cleared, &span, style),
                ChangeType::ChangeInlineStyle,
            ),
            FormatTarget::Block(block_type) => (
                modifier::set_block_type(&cleared, &span, block_type),
                ChangeType::ChangeBlockType,
            ),
        };
        // Already formatted: leave the caret where the user put it.
        if styled.block(&key) == content.block(&key) {
            return new;
        }
        new.push_with_caret(styled, end, change)
    }
}

/// [`AutoformatEngine::evaluate`] with the default rule table.
pub fn evaluate(old: &EditorState, new: EditorState) -> EditorState {
    DEFAULT_ENGINE.evaluate(old, new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, BlockKey, Document, InlineStyle, Position};
    use crate::editor::Direction;

    /// Type `text` into an empty editor one char at a time, running the
    /// engine after each keystroke like the host does.
    fn typed(text: &str) -> EditorState {
        let engine = AutoformatEngine::default();
        text.chars().fold(EditorState::create_empty(), |state, ch| {
            let next = state.insert_char(ch);
            engine.evaluate(&state, next)
        })
    }

    /// A snapshot with `text` in one block and a caret at its end,
    /// without running the engine.
    fn raw(text: &str) -> EditorState {
        EditorState::create_with_content(Document::from_plain_text(text)).move_end()
    }

    fn only_block(state: &EditorState) -> &Block {
        state.content().first_block()
    }

    #[test]
    fn test_h1_applied_over_full_span() {
        let s = raw("# Title");
        let out = evaluate(&s, s.clone());
        let block = only_block(&out);
        assert_eq!(block.ranges_with_style(&InlineStyle::H1_STYLE), vec![0..7]);
        assert_eq!(block.block_type(), &BlockType::UNSTYLED);
        assert_eq!(out.last_change(), ChangeType::ChangeInlineStyle);
    }

    #[test]
    fn test_single_star_applies_bold() {
        let s = raw("* bold");
        let out = evaluate(&s, s.clone());
        assert_eq!(only_block(&out).ranges_with_style(&InlineStyle::BOLD), vec![0..6]);
    }

    #[test]
    fn test_double_star_applies_red_not_bold() {
        let s = raw("** red");
        let out = evaluate(&s, s.clone());
        let block = only_block(&out);
        assert_eq!(block.ranges_with_style(&InlineStyle::COLOR_RED), vec![0..6]);
        assert!(block.ranges_with_style(&InlineStyle::BOLD).is_empty());
    }

    #[test]
    fn test_triple_star_applies_underline_only() {
        let s = raw("*** under");
        let out = evaluate(&s, s.clone());
        let block = only_block(&out);
        assert_eq!(block.ranges_with_style(&InlineStyle::UNDERLINE), vec![0..9]);
        assert!(block.ranges_with_style(&InlineStyle::BOLD).is_empty());
        assert!(block.ranges_with_style(&InlineStyle::COLOR_RED).is_empty());
    }

    #[test]
    fn test_marker_only_block_is_styled_and_kept() {
        let s = raw("* ");
        let out = evaluate(&s, s.clone());
        let block = only_block(&out);
        assert_eq!(block.text(), "* ");
        assert_eq!(block.ranges_with_style(&InlineStyle::BOLD), vec![0..2]);
    }

    #[test]
    fn test_empty_block_unchanged() {
        let s = EditorState::create_empty();
        assert_eq!(evaluate(&s, s.clone()), s);
    }

    #[test]
    fn test_plain_text_unchanged() {
        let s = raw("plain text");
        assert_eq!(evaluate(&s, s.clone()), s);
    }

    #[test]
    fn test_range_selection_unchanged() {
        let s = raw("# Title").extend_selection(Direction::Left);
        assert!(!s.selection().is_collapsed());
        assert_eq!(evaluate(&s, s.clone()), s);
    }

    #[test]
    fn test_missing_block_is_noop() {
        let s = raw("# Title").with_unchecked_selection(Selection::collapsed(Position::new(
            BlockKey::new("missing"),
            0,
        )));
        assert_eq!(evaluate(&s, s.clone()), s);
    }

    #[test]
    fn test_previous_rule_style_is_replaced() {
        // "* x" is bold; inserting a second star turns it into "** x"
        let bold = evaluate(&raw("* x"), raw("* x"));
        let retyped = bold.move_home().insert_char('*');
        let out = evaluate(&bold, retyped);
        let block = only_block(&out);
        assert_eq!(block.text(), "** x");
        assert_eq!(block.ranges_with_style(&InlineStyle::COLOR_RED), vec![0..4]);
        assert!(block.ranges_with_style(&InlineStyle::BOLD).is_empty());
    }

    #[test]
    fn test_block_type_reset_to_unstyled() {
        let doc = Document::from_blocks(vec![
            Block::new(BlockKey::new("a"), "* item").with_block_type(BlockType::BLOCKQUOTE),
        ])
        .unwrap();
        let s = EditorState::create_with_content(doc).move_end();
        let out = evaluate(&s, s.clone());
        assert_eq!(only_block(&out).block_type(), &BlockType::UNSTYLED);
    }

    #[test]
    fn test_caret_moves_to_block_end_after_match() {
        let s = raw("# Title").move_to(0, 3);
        let out = evaluate(&s, s.clone());
        assert!(out.selection().is_collapsed());
        assert_eq!(out.caret_position(), (0, 7));
    }

    #[test]
    fn test_formatted_block_keeps_caret() {
        let styled = evaluate(&raw("# Title"), raw("# Title"));
        let moved = styled.move_to(0, 3);
        let out = evaluate(&styled, moved.clone());
        assert_eq!(out, moved);
        assert_eq!(out.caret_position(), (0, 3));
    }

    #[test]
    fn test_only_caret_block_is_restyled() {
        let s = EditorState::create_with_content(Document::from_plain_text("* one\n* two"))
            .move_to(1, 5);
        let out = evaluate(&s, s.clone());
        assert!(
            out.content().block_at(0).unwrap().ranges_with_style(&InlineStyle::BOLD).is_empty()
        );
        assert_eq!(
            out.content().block_at(1).unwrap().ranges_with_style(&InlineStyle::BOLD),
            vec![0..5]
        );
    }

    #[test]
    fn test_typing_sequence_styles_line() {
        let out = typed("# Hello");
        let block = only_block(&out);
        assert_eq!(block.text(), "# Hello");
        assert_eq!(block.ranges_with_style(&InlineStyle::H1_STYLE), vec![0..7]);
    }

    #[test]
    fn test_typing_before_marker_completes_leaves_plain() {
        let out = typed("#");
        assert!(only_block(&out).style_runs().iter().all(|r| r.styles.is_empty()));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        for text in ["# Title", "* bold", "** red", "*** under", "* "] {
            let s = raw(text);
            let once = evaluate(&s, s.clone());
            let twice = evaluate(&once, once.clone());
            assert_eq!(once, twice, "second pass changed {text:?}");
        }
    }

    #[test]
    fn test_block_target_sets_block_type() {
        let engine = AutoformatEngine::with_rules(RuleSet::new(vec![AutoformatRule::block(
            "> ",
            BlockType::BLOCKQUOTE,
        )]));
        let s = raw("> quoted");
        let out = engine.evaluate(&s, s.clone());
        assert_eq!(only_block(&out).block_type(), &BlockType::BLOCKQUOTE);
        assert_eq!(out.last_change(), ChangeType::ChangeBlockType);
        assert!(only_block(&out).style_runs().iter().all(|r| r.styles.is_empty()));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn starts_with_trigger(text: &str) -> bool {
            RuleSet::default().match_text(text).is_some()
        }

        proptest! {
            #[test]
            fn non_trigger_text_is_unchanged(text in "[^\n]{0,24}") {
                prop_assume!(!starts_with_trigger(&text));
                let s = raw(&text);
                prop_assert_eq!(evaluate(&s, s.clone()), s);
            }

            #[test]
            fn range_selection_is_unchanged(
                marker in prop::sample::select(vec!["", "# ", "* ", "** ", "*** "]),
                body in "[a-z ]{1,16}",
            ) {
                let text = format!("{marker}{body}");
                let s = raw(&text).extend_selection(Direction::Left);
                prop_assert_eq!(evaluate(&s, s.clone()), s);
            }

            #[test]
            fn matched_block_has_exactly_one_style(
                marker in prop::sample::select(vec!["# ", "* ", "** ", "*** "]),
                body in "[a-z ]{0,16}",
            ) {
                let text = format!("{marker}{body}");
                let s = raw(&text);
                let out = evaluate(&s, s.clone());
                let runs = only_block(&out).style_runs();
                prop_assert_eq!(runs.len(), 1);
                prop_assert_eq!(runs[0].range.clone(), 0..text.chars().count());
                prop_assert_eq!(runs[0].styles.len(), 1);
            }
        }
    }
}
