use crate::app::Model;
use crate::editor::{Direction, EditorState};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the caret
    InsertChar(char),
    /// Insert pasted text at the caret
    InsertText(String),
    /// Delete the selection or the character before the caret (Backspace)
    DeleteBack,
    /// Delete the selection or the character at the caret (Delete)
    DeleteForward,
    /// Split the block at the caret (Enter)
    SplitBlock,

    // Caret
    /// Move the caret one step
    MoveCaret(Direction),
    /// Move the selection focus one step (Shift+arrow)
    ExtendSelection(Direction),
    /// Move the caret to the start of its block
    MoveHome,
    /// Move the caret to the end of its block
    MoveEnd,
    /// Place the caret at (block index, char offset), e.g. from a mouse click
    MoveTo(usize, usize),

    // Persistence
    /// Write the content to the store now
    Save,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,
    /// Quit application
    Quit,
}

impl Message {
    /// Whether this message can change the document.
    pub const fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::InsertText(_)
                | Self::DeleteBack
                | Self::DeleteForward
                | Self::SplitBlock
        )
    }

    /// Whether this message only moves the caret or selection.
    pub const fn is_caret(&self) -> bool {
        matches!(
            self,
            Self::MoveCaret(_)
                | Self::ExtendSelection(_)
                | Self::MoveHome
                | Self::MoveEnd
                | Self::MoveTo(..)
        )
    }
}

/// Pure function that computes the next state from the current state and a message.
///
/// Every edit and caret move is passed through the model's autoformat engine
/// before it becomes the current snapshot. Saving happens in side effects, not here.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::InsertChar(ch) => model.apply_edit(|editor| editor.insert_char(ch)),
        Message::InsertText(text) => {
            // Terminals send CRLF line ends in pastes.
            let text = text.replace("\r\n", "\n").replace('\r', "\n");
            model.apply_edit(|editor| editor.insert_text(&text));
        }
        Message::DeleteBack => model.apply_edit(|editor| editor.delete_backward()),
        Message::DeleteForward => model.apply_edit(|editor| editor.delete_forward()),
        Message::SplitBlock => model.apply_edit(|editor| editor.split_block()),

        Message::MoveCaret(direction) => {
            model.apply_selection(|editor| editor.move_caret(direction));
        }
        Message::ExtendSelection(direction) => {
            model.apply_selection(|editor| editor.extend_selection(direction));
        }
        Message::MoveHome => model.apply_selection(EditorState::move_home),
        Message::MoveEnd => model.apply_selection(EditorState::move_end),
        Message::MoveTo(index, offset) => {
            model.apply_selection(|editor| editor.move_to(index, offset));
        }

        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
        }

        // Handled in side effects / the event loop
        Message::Save | Message::Redraw => {}

        Message::Quit => {
            model.should_quit = true;
        }
    }
    model.ensure_caret_visible();
    model
}
