use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let (line, offset) = model.editor.caret_position();
    let block_type = model
        .editor
        .content()
        .block_at(line)
        .map_or("unstyled", |block| block.block_type().name());
    let state = if model.dirty { " [modified]" } else { "" };
    let autosave = if model.autosave { "on" } else { "off" };
    let store = model
        .store_label
        .as_deref()
        .map(|label| format!("  {label}"))
        .unwrap_or_default();

    let status = format!(
        " Ln {}, Col {}  {}{}  autosave:{}{}  Ctrl+S:save Esc:quit",
        line + 1,
        offset + 1,
        block_type,
        state,
        autosave,
        store
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::Green).fg(Color::Black),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
