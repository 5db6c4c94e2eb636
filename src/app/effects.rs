use tracing::{debug, warn};

use crate::app::{App, Message, Model, ToastLevel};
use crate::storage;

impl App {
    /// Run the I/O a message implies after `update` has produced the new model.
    pub(super) fn handle_message_side_effects(&mut self, model: &mut Model, msg: &Message) {
        match msg {
            Message::Save => self.save_now(model),
            msg if (msg.is_edit() || msg.is_caret()) && model.autosave && model.dirty => {
                self.autosave(model);
            }
            _ => {}
        }
    }

    fn save_now(&mut self, model: &mut Model) {
        match storage::save(self.store.as_mut(), model.editor.content()) {
            Ok(()) => {
                model.dirty = false;
                model.show_toast(ToastLevel::Info, "Content saved!");
            }
            Err(err) => {
                warn!(%err, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }

    /// Save after an edit. On failure the model stays dirty so the next
    /// edit tries again.
    fn autosave(&mut self, model: &mut Model) {
        match storage::save(self.store.as_mut(), model.editor.content()) {
            Ok(()) => {
                model.dirty = false;
                debug!("autosaved");
            }
            Err(err) => {
                warn!(%err, "autosave failed");
                model.show_toast(ToastLevel::Warning, format!("Autosave failed: {err}"));
            }
        }
    }
}
