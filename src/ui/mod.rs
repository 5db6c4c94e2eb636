//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`style`]: Style-name to terminal-style table
//! - Screen layout shared by rendering and mouse hit-testing
//! - Conversions between char offsets and display columns

pub mod style;

mod render;
mod status;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthChar;

pub use render::render;

pub const SAVE_LABEL: &str = "[ Save ]";
pub const TITLE: &str = "Demo editor";

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub save_button: Rect,
    pub text_box: Rect,
    /// Text box without its border
    pub text_area: Rect,
    pub toast: Rect,
    pub status: Rect,
}

/// Split the terminal into header, bordered text box, toast and status rows.
pub fn layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    let header = rows[0];
    let label_width = u16::try_from(SAVE_LABEL.len()).unwrap_or(u16::MAX);
    let save_width = label_width.min(header.width);
    let save_button = Rect {
        x: header.x + header.width.saturating_sub(save_width + 1),
        width: save_width,
        ..header
    };
    let text_box = rows[1];
    let text_area = Rect {
        x: text_box.x.saturating_add(1),
        y: text_box.y.saturating_add(1),
        width: text_box.width.saturating_sub(2),
        height: text_box.height.saturating_sub(2),
    };
    ScreenLayout {
        header,
        save_button,
        text_box,
        text_area,
        toast: rows[2],
        status: rows[3],
    }
}

pub const fn point_in_rect(column: u16, row: u16, rect: Rect) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Display columns taken by the first `offset` chars of `text`.
pub fn column_for_offset(text: &str, offset: usize) -> usize {
    text.chars()
        .take(offset)
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

/// Char offset of the char drawn at display `column`, or the text length
/// when the column is past the end.
pub fn offset_for_column(text: &str, column: usize) -> usize {
    let mut used = 0;
    for (idx, ch) in text.chars().enumerate() {
        used += ch.width().unwrap_or(0);
        if used > column {
            return idx;
        }
    }
    text.chars().count()
}
