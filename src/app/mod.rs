//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Saving to the store is the only side effect; it runs after `update` in
//! [`App::dispatch`].

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use crate::autoformat::AutoformatEngine;
use crate::editor::EditorState;
use crate::storage::{self, KeyValueStore};

/// Main application struct that owns the store and runs the event loop.
pub struct App {
    store: Box<dyn KeyValueStore>,
    autosave: bool,
    engine: AutoformatEngine,
    store_label: Option<String>,
}

impl App {
    /// Create an application persisting to `store`.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            autosave: true,
            engine: AutoformatEngine::default(),
            store_label: None,
        }
    }

    /// Enable or disable saving after every edit.
    #[must_use]
    pub const fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    /// Replace the default autoformat rules.
    #[must_use]
    pub fn with_engine(mut self, engine: AutoformatEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Describe the store in the status bar.
    #[must_use]
    pub fn with_store_label(mut self, label: impl Into<String>) -> Self {
        self.store_label = Some(label.into());
        self
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Model for a terminal of `size`, restored from the store when it
    /// holds valid content and empty otherwise.
    pub fn initial_model(&self, size: (u16, u16)) -> Model {
        let editor = storage::load(self.store.as_ref())
            .map_or_else(EditorState::create_empty, EditorState::create_with_content);
        let model = Model::new(editor, size)
            .with_engine(self.engine.clone())
            .with_autosave(self.autosave);
        match &self.store_label {
            Some(label) => model.with_store_label(label.clone()),
            None => model,
        }
    }

    /// Apply `msg` to `model` and run its side effects.
    pub fn dispatch(&mut self, model: Model, msg: Message) -> Model {
        let mut model = update(model, msg.clone());
        self.handle_message_side_effects(&mut model, &msg);
        model
    }
}
