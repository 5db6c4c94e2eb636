use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::autoformat::AutoformatEngine;
use crate::editor::EditorState;
use crate::ui::style::StyleMap;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Current editor snapshot
    pub editor: EditorState,
    /// Rules run after every edit
    pub engine: AutoformatEngine,
    /// Style-name to terminal-style table
    pub styles: StyleMap,
    /// First block shown in the text box
    pub scroll_offset: usize,
    /// First display column shown in the text box
    pub column_offset: usize,
    /// Terminal width
    pub width: u16,
    /// Terminal height
    pub height: u16,
    /// Save after every content change
    pub autosave: bool,
    /// Content changed since the last successful save
    pub dirty: bool,
    /// Where content is stored, shown in the status bar
    pub store_label: Option<String>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// Create a model around an editor snapshot for a terminal of `size`.
    pub fn new(editor: EditorState, size: (u16, u16)) -> Self {
        Self {
            editor,
            width: size.0,
            height: size.1,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_engine(mut self, engine: AutoformatEngine) -> Self {
        self.engine = engine;
        self
    }

    #[must_use]
    pub const fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    #[must_use]
    pub fn with_store_label(mut self, label: impl Into<String>) -> Self {
        self.store_label = Some(label.into());
        self
    }

    /// Run `edit` on the current snapshot, then let the engine restyle it.
    pub(super) fn apply_edit(&mut self, edit: impl FnOnce(&EditorState) -> EditorState) {
        let next = edit(&self.editor);
        let next = self.engine.evaluate(&self.editor, next);
        if next.content() != self.editor.content() {
            self.dirty = true;
        }
        self.editor = next;
    }

    /// Move the selection with `step`. The engine still runs, so a
    /// trigger line the caret lands on gets formatted.
    pub(super) fn apply_selection(&mut self, step: impl FnOnce(&EditorState) -> EditorState) {
        self.apply_edit(step);
    }

    /// Rows of text visible inside the text box.
    pub fn text_rows(&self) -> usize {
        usize::from(self.text_area().height)
    }

    /// Display columns visible inside the text box.
    pub fn text_columns(&self) -> usize {
        usize::from(self.text_area().width)
    }

    fn text_area(&self) -> Rect {
        crate::ui::layout(Rect::new(0, 0, self.width, self.height)).text_area
    }

    /// Scroll so the caret is inside the text box, both ways.
    pub(super) fn ensure_caret_visible(&mut self) {
        let rows = self.text_rows().max(1);
        let (line, offset) = self.editor.caret_position();
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + rows {
            self.scroll_offset = line + 1 - rows;
        }
        let max_offset = self.editor.content().block_count().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(max_offset);

        let columns = self.text_columns().max(1);
        let column = self
            .editor
            .content()
            .block_at(line)
            .map_or(0, |block| crate::ui::column_for_offset(block.text(), offset));
        if column < self.column_offset {
            self.column_offset = column;
        } else if column >= self.column_offset + columns {
            self.column_offset = column + 1 - columns;
        }
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self {
            editor: EditorState::create_empty(),
            engine: AutoformatEngine::default(),
            styles: StyleMap::default(),
            scroll_offset: 0,
            column_offset: 0,
            width: 80,
            height: 24,
            autosave: true,
            dirty: false,
            store_label: None,
            toast: None,
            should_quit: false,
        }
    }
}
