use crate::document::modifier;
use crate::document::{Block, Document, Position, Selection, StyleSet};

/// Direction for caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Tag describing the edit that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    /// Freshly created or restored from storage
    Initial,
    InsertCharacters,
    RemoveRange,
    SplitBlock,
    ChangeInlineStyle,
    ChangeBlockType,
    /// Only the selection moved
    SelectionOnly,
}

/// An immutable editor snapshot: content, selection and the last change tag.
///
/// Every operation returns a new snapshot; the receiver is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    content: Document,
    selection: Selection,
    last_change: ChangeType,
}

impl EditorState {
    /// An empty document with the caret in its only block.
    pub fn create_empty() -> Self {
        Self::create_with_content(Document::empty())
    }

    /// Wrap `content` with the caret at the start of the first block.
    pub fn create_with_content(content: Document) -> Self {
        let caret = Position::new(content.first_block().key().clone(), 0);
        Self {
            content,
            selection: Selection::collapsed(caret),
            last_change: ChangeType::Initial,
        }
    }

    pub const fn content(&self) -> &Document {
        &self.content
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn last_change(&self) -> ChangeType {
        self.last_change
    }

    /// Block index and char offset of the focus.
    pub fn caret_position(&self) -> (usize, usize) {
        let focus = self.selection.focus();
        let index = self.content.block_index(&focus.key).unwrap_or(0);
        (index, focus.offset)
    }

    /// Replace the content, keeping the selection (clamped onto the new content).
    #[must_use]
    pub fn push(&self, content: Document, change: ChangeType) -> Self {
        let selection = self.selection.clamped_to(&content);
        Self {
            content,
            selection,
            last_change: change,
        }
    }

    /// Replace the content and collapse the caret at `caret`.
    #[must_use]
    pub fn push_with_caret(&self, content: Document, caret: Position, change: ChangeType) -> Self {
        Self {
            selection: Selection::collapsed(caret).clamped_to(&content),
            content,
            last_change: change,
        }
    }

    /// Replace the selection without touching the content.
    #[must_use]
    pub fn with_selection(&self, selection: Selection) -> Self {
        Self {
            content: self.content.clone(),
            selection: selection.clamped_to(&self.content),
            last_change: ChangeType::SelectionOnly,
        }
    }

    /// Type `text` at the caret, replacing any selected range.
    ///
    /// Inserted chars inherit the styles of the char before the caret.
    #[must_use]
    pub fn insert_text(&self, text: &str) -> Self {
        if text.is_empty() {
            return self.clone();
        }
        let (content, caret) = self.remove_selected();
        let styles = inherited_styles(&content, &caret);
        let (content, caret) = modifier::insert_text(&content, &caret, text, &styles);
        self.push_with_caret(content, caret, ChangeType::InsertCharacters)
    }

    #[must_use]
    pub fn insert_char(&self, ch: char) -> Self {
        let mut buf = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut buf))
    }

    /// Split the block at the caret (Enter).
    #[must_use]
    pub fn split_block(&self) -> Self {
        let (content, caret) = self.remove_selected();
        let (content, caret) = modifier::split_block(&content, &caret);
        self.push_with_caret(content, caret, ChangeType::SplitBlock)
    }

    /// Delete the selection, or the char before the caret (Backspace).
    ///
    /// At the start of a block the block is joined onto the previous one.
    #[must_use]
    pub fn delete_backward(&self) -> Self {
        if !self.selection.is_collapsed() {
            let (content, caret) = self.remove_selected();
            return self.push_with_caret(content, caret, ChangeType::RemoveRange);
        }
        let caret = self.selection.focus();
        let target = self.step(caret, Direction::Left);
        if &target == caret {
            return self.clone();
        }
        let (content, caret) =
            modifier::remove_range(&self.content, &Selection::new(target, caret.clone()));
        self.push_with_caret(content, caret, ChangeType::RemoveRange)
    }

    /// Delete the selection, or the char after the caret (Delete).
    #[must_use]
    pub fn delete_forward(&self) -> Self {
        if !self.selection.is_collapsed() {
            let (content, caret) = self.remove_selected();
            return self.push_with_caret(content, caret, ChangeType::RemoveRange);
        }
        let caret = self.selection.focus();
        let target = self.step(caret, Direction::Right);
        if &target == caret {
            return self.clone();
        }
        let (content, caret) =
            modifier::remove_range(&self.content, &Selection::new(caret.clone(), target));
        self.push_with_caret(content, caret, ChangeType::RemoveRange)
    }

    /// Move the caret, collapsing any selection.
    ///
    /// Left/Right on a range collapse it to its start/end.
    #[must_use]
    pub fn move_caret(&self, direction: Direction) -> Self {
        let target = match direction {
            Direction::Left if !self.selection.is_collapsed() => {
                self.selection.start(&self.content).clone()
            }
            Direction::Right if !self.selection.is_collapsed() => {
                self.selection.end(&self.content).clone()
            }
            _ => self.step(self.selection.focus(), direction),
        };
        self.with_selection(Selection::collapsed(target))
    }

    /// Move only the focus, growing or shrinking the selected range.
    #[must_use]
    pub fn extend_selection(&self, direction: Direction) -> Self {
        let focus = self.step(self.selection.focus(), direction);
        self.with_selection(self.selection.with_focus(focus))
    }

    /// Caret to the start of the focused block (Home).
    #[must_use]
    pub fn move_home(&self) -> Self {
        let key = self.selection.focus().key.clone();
        self.with_selection(Selection::collapsed(Position::new(key, 0)))
    }

    /// Caret to the end of the focused block (End).
    #[must_use]
    pub fn move_end(&self) -> Self {
        let key = self.selection.focus().key.clone();
        let len = self.content.block(&key).map_or(0, Block::len);
        self.with_selection(Selection::collapsed(Position::new(key, len)))
    }

    /// Caret to block `index`, char `offset`, both clamped.
    #[must_use]
    pub fn move_to(&self, index: usize, offset: usize) -> Self {
        let index = index.min(self.content.block_count() - 1);
        let block = &self.content.blocks()[index];
        let caret = Position::new(block.key().clone(), offset.min(block.len()));
        self.with_selection(Selection::collapsed(caret))
    }

    /// Selection set verbatim, even if it points outside the content.
    #[cfg(test)]
    pub(crate) fn with_unchecked_selection(&self, selection: Selection) -> Self {
        Self {
            content: self.content.clone(),
            selection,
            last_change: self.last_change,
        }
    }

    // --- Private helpers ---

    /// Content with the selected range removed, plus the caret left behind.
    fn remove_selected(&self) -> (Document, Position) {
        if self.selection.is_collapsed() {
            return (
                self.content.clone(),
                self.selection.focus().clone(),
            );
        }
        modifier::remove_range(&self.content, &self.selection)
    }

    /// One step from `from` in `direction`; stays put at document edges.
    fn step(&self, from: &Position, direction: Direction) -> Position {
        let Some(index) = self.content.block_index(&from.key) else {
            return from.clone();
        };
        let blocks = self.content.blocks();
        let block = &blocks[index];
        let offset = from.offset.min(block.len());
        match direction {
            Direction::Left if offset > 0 => Position::new(from.key.clone(), offset - 1),
            Direction::Left if index > 0 => {
                let prev = &blocks[index - 1];
                Position::new(prev.key().clone(), prev.len())
            }
            Direction::Right if offset < block.len() => Position::new(from.key.clone(), offset + 1),
            Direction::Right if index + 1 < blocks.len() => {
                Position::new(blocks[index + 1].key().clone(), 0)
            }
            Direction::Up if index > 0 => {
                let prev = &blocks[index - 1];
                Position::new(prev.key().clone(), offset.min(prev.len()))
            }
            Direction::Down if index + 1 < blocks.len() => {
                let next = &blocks[index + 1];
                Position::new(next.key().clone(), offset.min(next.len()))
            }
            _ => Position::new(from.key.clone(), offset),
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}

/// Styles typed text picks up at `at`: the char before the caret, the first
/// char at the start of a non-empty block, otherwise the last char of the
/// nearest non-empty block above.
fn inherited_styles(content: &Document, at: &Position) -> StyleSet {
    let Some(index) = content.block_index(&at.key) else {
        return StyleSet::new();
    };
    let blocks = content.blocks();
    let block = &blocks[index];
    let styles = if at.offset > 0 {
        block.styles_at(at.offset - 1)
    } else if !block.is_empty() {
        block.styles_at(0)
    } else {
        blocks[..index]
            .iter()
            .rev()
            .find(|prev| !prev.is_empty())
            .and_then(|prev| prev.styles_at(prev.len() - 1))
    };
    styles.cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockKey, BlockType, InlineStyle};

    fn state(text: &str) -> EditorState {
        EditorState::create_with_content(Document::from_plain_text(text))
    }

    fn line(state: &EditorState, idx: usize) -> &str {
        state.content().block_at(idx).map_or("", Block::text)
    }

    // --- Construction ---

    #[test]
    fn test_create_empty_has_caret_at_origin() {
        let s = EditorState::create_empty();
        assert_eq!(s.caret_position(), (0, 0));
        assert!(s.selection().is_collapsed());
        assert_eq!(s.last_change(), ChangeType::Initial);
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_advances_caret() {
        let s = EditorState::create_empty().insert_char('#').insert_char(' ');
        assert_eq!(line(&s, 0), "# ");
        assert_eq!(s.caret_position(), (0, 2));
        assert_eq!(s.last_change(), ChangeType::InsertCharacters);
    }

    #[test]
    fn test_insert_does_not_modify_receiver() {
        let before = state("abc");
        let _after = before.insert_char('x');
        assert_eq!(line(&before, 0), "abc");
    }

    #[test]
    fn test_insert_inherits_previous_char_styles() {
        let doc = Document::from_blocks(vec![
            Block::new(BlockKey::new("a"), "bo").with_style(0..2, &InlineStyle::BOLD),
        ])
        .unwrap();
        let s = EditorState::create_with_content(doc).move_end().insert_char('d');
        let block = s.content().first_block();
        assert_eq!(block.ranges_with_style(&InlineStyle::BOLD), vec![0..3]);
    }

    #[test]
    fn test_insert_at_block_start_takes_first_char_styles() {
        let doc = Document::from_blocks(vec![
            Block::new(BlockKey::new("a"), "bo").with_style(0..2, &InlineStyle::BOLD),
        ])
        .unwrap();
        let s = EditorState::create_with_content(doc).insert_char('x');
        assert_eq!(s.content().first_block().ranges_with_style(&InlineStyle::BOLD), vec![0..3]);
    }

    #[test]
    fn test_insert_in_empty_block_continues_style_above() {
        let doc = Document::from_blocks(vec![
            Block::new(BlockKey::new("a"), "red").with_style(0..3, &InlineStyle::COLOR_RED),
            Block::new(BlockKey::new("b"), ""),
            Block::new(BlockKey::new("c"), ""),
        ])
        .unwrap();
        let s = EditorState::create_with_content(doc).move_to(2, 0).insert_char('x');
        let block = s.content().block_at(2).unwrap();
        assert_eq!(block.ranges_with_style(&InlineStyle::COLOR_RED), vec![0..1]);
    }

    #[test]
    fn test_insert_into_empty_document_is_unstyled() {
        let s = EditorState::create_empty().insert_char('x');
        assert!(s.content().first_block().style_runs().iter().all(|r| r.styles.is_empty()));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let s = state("hello world")
            .move_to(0, 6)
            .extend_selection(Direction::Right)
            .extend_selection(Direction::Right)
            .insert_text("W");
        assert_eq!(line(&s, 0), "hello Wrld");
        assert_eq!(s.caret_position(), (0, 7));
    }

    #[test]
    fn test_insert_text_with_newline_splits() {
        let s = state("ab").move_to(0, 1).insert_text("x\ny");
        assert_eq!(line(&s, 0), "ax");
        assert_eq!(line(&s, 1), "yb");
        assert_eq!(s.caret_position(), (1, 1));
    }

    #[test]
    fn test_insert_empty_text_is_noop() {
        let s = state("ab");
        assert_eq!(s.insert_text(""), s);
    }

    // --- Splitting ---

    #[test]
    fn test_split_block_at_end() {
        let s = state("hello").move_end().split_block();
        assert_eq!(s.content().block_count(), 2);
        assert_eq!(line(&s, 1), "");
        assert_eq!(s.caret_position(), (1, 0));
        assert_eq!(s.last_change(), ChangeType::SplitBlock);
    }

    #[test]
    fn test_split_block_new_block_is_unstyled() {
        let doc = Document::from_blocks(vec![
            Block::new(BlockKey::new("a"), "title").with_block_type(BlockType::HEADER_ONE),
        ])
        .unwrap();
        let s = EditorState::create_with_content(doc).move_end().split_block();
        assert_eq!(s.content().block_at(1).unwrap().block_type(), &BlockType::UNSTYLED);
    }

    // --- Deletion ---

    #[test]
    fn test_delete_backward_at_origin_is_noop() {
        let s = state("hello");
        assert_eq!(s.delete_backward(), s);
    }

    #[test]
    fn test_delete_backward_removes_char() {
        let s = state("hello").move_end().delete_backward();
        assert_eq!(line(&s, 0), "hell");
        assert_eq!(s.caret_position(), (0, 4));
        assert_eq!(s.last_change(), ChangeType::RemoveRange);
    }

    #[test]
    fn test_delete_backward_joins_blocks() {
        let s = state("hello\nworld").move_to(1, 0).delete_backward();
        assert_eq!(s.content().block_count(), 1);
        assert_eq!(line(&s, 0), "helloworld");
        assert_eq!(s.caret_position(), (0, 5));
    }

    #[test]
    fn test_delete_backward_multibyte() {
        let s = state("café").move_end().delete_backward();
        assert_eq!(line(&s, 0), "caf");
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let s = state("hello").move_end();
        assert_eq!(s.delete_forward(), s);
    }

    #[test]
    fn test_delete_forward_joins_blocks() {
        let s = state("hello\nworld").move_to(0, 5).delete_forward();
        assert_eq!(line(&s, 0), "helloworld");
        assert_eq!(s.caret_position(), (0, 5));
    }

    #[test]
    fn test_delete_removes_selection() {
        let s = state("hello\nworld")
            .move_to(0, 3)
            .extend_selection(Direction::Down)
            .delete_forward();
        assert_eq!(line(&s, 0), "helld");
        assert_eq!(s.caret_position(), (0, 3));
    }

    // --- Movement ---

    #[test]
    fn test_move_left_wraps_to_previous_block() {
        let s = state("hello\nworld").move_to(1, 0).move_caret(Direction::Left);
        assert_eq!(s.caret_position(), (0, 5));
        assert_eq!(s.last_change(), ChangeType::SelectionOnly);
    }

    #[test]
    fn test_move_right_wraps_to_next_block() {
        let s = state("hello\nworld").move_to(0, 5).move_caret(Direction::Right);
        assert_eq!(s.caret_position(), (1, 0));
    }

    #[test]
    fn test_move_up_clamps_to_shorter_block() {
        let s = state("hi\nhello").move_to(1, 4).move_caret(Direction::Up);
        assert_eq!(s.caret_position(), (0, 2));
    }

    #[test]
    fn test_move_down_at_last_block_is_noop() {
        let s = state("hello\nworld").move_to(1, 2).move_caret(Direction::Down);
        assert_eq!(s.caret_position(), (1, 2));
    }

    #[test]
    fn test_move_left_collapses_range_to_start() {
        let s = state("hello")
            .move_to(0, 1)
            .extend_selection(Direction::Right)
            .extend_selection(Direction::Right)
            .move_caret(Direction::Left);
        assert!(s.selection().is_collapsed());
        assert_eq!(s.caret_position(), (0, 1));
    }

    #[test]
    fn test_extend_selection_keeps_anchor() {
        let s = state("hello").move_to(0, 2).extend_selection(Direction::Left);
        assert!(!s.selection().is_collapsed());
        assert_eq!(s.selection().anchor().offset, 2);
        assert_eq!(s.selection().focus().offset, 1);
    }

    #[test]
    fn test_move_home_and_end() {
        let s = state("hello").move_to(0, 3);
        assert_eq!(s.move_home().caret_position(), (0, 0));
        assert_eq!(s.move_end().caret_position(), (0, 5));
    }

    #[test]
    fn test_move_to_clamps() {
        let s = state("hello").move_to(9, 99);
        assert_eq!(s.caret_position(), (0, 5));
    }

    // --- push ---

    #[test]
    fn test_push_keeps_selection_and_tags_change() {
        let s = state("hello").move_to(0, 4);
        let pushed = s.push(Document::from_plain_text("hi"), ChangeType::ChangeInlineStyle);
        assert_eq!(pushed.caret_position(), (0, 2));
        assert_eq!(pushed.last_change(), ChangeType::ChangeInlineStyle);
    }
}
