use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Block as Border, Borders, Clear, Paragraph};

use crate::app::Model;
use crate::document::{Block, Document};
use crate::ui::style::StyleMap;

use super::{SAVE_LABEL, TITLE, column_for_offset, layout, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let screen = layout(frame.area());

    render_header(frame, screen.header, screen.save_button);
    render_text_box(model, frame, screen.text_box, screen.text_area);

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, screen.toast);
    }
    status::render_status_bar(model, frame, screen.status);
}

fn render_header(frame: &mut Frame, area: Rect, save_button: Rect) {
    let title = Paragraph::new(format!(" {TITLE}"))
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, area);
    let button = Paragraph::new(SAVE_LABEL)
        .style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(button, save_button);
}

fn render_text_box(model: &Model, frame: &mut Frame, area: Rect, text_area: Rect) {
    let content = model.editor.content();
    let selected = selected_ranges(model);

    let visible = usize::from(text_area.height);
    let lines: Vec<Line> = content
        .blocks()
        .iter()
        .enumerate()
        .skip(model.scroll_offset)
        .take(visible)
        .map(|(index, block)| {
            let range = selected.get(index).cloned().flatten();
            block_line(block, &model.styles, range)
        })
        .collect();

    frame.render_widget(Clear, area);
    let column_offset = u16::try_from(model.column_offset).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(lines)
            .block(Border::default().borders(Borders::ALL))
            .scroll((0, column_offset)),
        area,
    );

    let (line, offset) = model.editor.caret_position();
    if let Some(row) = line.checked_sub(model.scroll_offset)
        && row < visible
        && let Some(block) = content.block_at(line)
    {
        let column = column_for_offset(block.text(), offset).saturating_sub(model.column_offset);
        let max_x = usize::from(text_area.width.saturating_sub(1));
        let x = text_area.x + u16::try_from(column.min(max_x)).unwrap_or(0);
        let y = text_area.y + u16::try_from(row).unwrap_or(0);
        frame.set_cursor_position((x, y));
    }
}

/// One line of styled spans. Consecutive chars with the same terminal
/// style share a span; selected chars are drawn reversed.
fn block_line(block: &Block, styles: &StyleMap, selected: Option<Range<usize>>) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (idx, ch) in block.text().chars().enumerate() {
        let mut style = block
            .styles_at(idx)
            .map_or_else(Style::default, |set| styles.inline_style(set));
        if selected.as_ref().is_some_and(|range| range.contains(&idx)) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    let block_style = styles.block(block.block_type()).unwrap_or_default();
    Line::from(spans).style(block_style)
}

/// Selected char range of every block, indexed like the document.
fn selected_ranges(model: &Model) -> Vec<Option<Range<usize>>> {
    let content: &Document = model.editor.content();
    let selection = model.editor.selection();
    let mut ranges = vec![None; content.block_count()];
    if selection.is_collapsed() {
        return ranges;
    }
    let start = selection.start(content);
    let end = selection.end(content);
    let (Some(first), Some(last)) = (
        content.block_index(&start.key),
        content.block_index(&end.key),
    ) else {
        return ranges;
    };
    for (index, block) in content.blocks().iter().enumerate().take(last + 1).skip(first) {
        let from = if index == first { start.offset } else { 0 };
        let to = if index == last { end.offset } else { block.len() };
        ranges[index] = Some(from..to);
    }
    ranges
}
