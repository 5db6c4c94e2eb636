use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::ui::{layout, offset_for_column, point_in_rect};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Some(Message::InsertText(text.clone())),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let caret = |direction| {
            if shift {
                Message::ExtendSelection(direction)
            } else {
                Message::MoveCaret(direction)
            }
        };
        match key.code {
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('c' | 'q') if ctrl => Some(Message::Quit),
            KeyCode::Char('l') if ctrl => Some(Message::Redraw),
            KeyCode::Esc => Some(Message::Quit),

            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }
            KeyCode::Enter => Some(Message::SplitBlock),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),

            KeyCode::Left => Some(caret(Direction::Left)),
            KeyCode::Right => Some(caret(Direction::Right)),
            KeyCode::Up => Some(caret(Direction::Up)),
            KeyCode::Down => Some(caret(Direction::Down)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let screen = layout(Rect::new(0, 0, model.width, model.height));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if point_in_rect(mouse.column, mouse.row, screen.save_button) {
                    return Some(Message::Save);
                }
                if point_in_rect(mouse.column, mouse.row, screen.text_box) {
                    return Some(caret_for_click(model, screen.text_area, mouse));
                }
                None
            }
            MouseEventKind::ScrollUp => Some(Message::MoveCaret(Direction::Up)),
            MouseEventKind::ScrollDown => Some(Message::MoveCaret(Direction::Down)),
            _ => None,
        }
    }
}

/// Caret position under a click in the text box. Clicks below the last
/// block land at its end; clicks on the border snap to the nearest cell.
fn caret_for_click(model: &Model, text_area: Rect, mouse: MouseEvent) -> Message {
    let content = model.editor.content();
    let row = usize::from(mouse.row.saturating_sub(text_area.y));
    let index = model.scroll_offset + row;
    if index >= content.block_count() {
        return Message::MoveTo(content.block_count() - 1, content.last_block().len());
    }
    let column = model.column_offset + usize::from(mouse.column.saturating_sub(text_area.x));
    let offset = content
        .block_at(index)
        .map_or(0, |block| offset_for_column(block.text(), column));
    Message::MoveTo(index, offset)
}
