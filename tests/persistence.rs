use stylepad::app::{App, Message};
use stylepad::document::{BlockType, InlineStyle};
use stylepad::storage::{self, CONTENT_KEY, FileStore, KeyValueStore};

fn type_text(app: &mut App, model: stylepad::app::Model, text: &str) -> stylepad::app::Model {
    text.chars().fold(model, |model, ch| {
        let msg = if ch == '\n' {
            Message::SplitBlock
        } else {
            Message::InsertChar(ch)
        };
        app.dispatch(model, msg)
    })
}

#[test]
fn test_typed_content_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut app = App::new(Box::new(FileStore::new(&path)));
    let model = app.initial_model((80, 24));
    type_text(&mut app, model, "# Title\nplain\n** warm\n*** under");

    let app = App::new(Box::new(FileStore::new(&path)));
    let model = app.initial_model((80, 24));
    let doc = model.editor.content();
    assert_eq!(doc.block_count(), 4);

    let title = doc.block_at(0).unwrap();
    assert_eq!(title.text(), "# Title");
    assert_eq!(title.ranges_with_style(&InlineStyle::H1_STYLE), vec![0..7]);
    assert_eq!(title.block_type(), &BlockType::UNSTYLED);

    // A line typed under the heading continues its style.
    let plain = doc.block_at(1).unwrap();
    assert_eq!(plain.text(), "plain");
    assert_eq!(plain.ranges_with_style(&InlineStyle::H1_STYLE), vec![0..5]);

    let warm = doc.block_at(2).unwrap();
    assert_eq!(warm.ranges_with_style(&InlineStyle::COLOR_RED), vec![0..7]);
    assert!(warm.ranges_with_style(&InlineStyle::BOLD).is_empty());

    let under = doc.block_at(3).unwrap();
    assert_eq!(under.ranges_with_style(&InlineStyle::UNDERLINE), vec![0..9]);
}

#[test]
fn test_store_file_is_json_object_with_content_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut app = App::new(Box::new(FileStore::new(&path)));
    let model = app.initial_model((80, 24));
    type_text(&mut app, model, "* hi");

    let text = std::fs::read_to_string(&path).unwrap();
    let outer: serde_json::Value = serde_json::from_str(&text).unwrap();
    let stored = outer[CONTENT_KEY].as_str().unwrap();
    let raw: serde_json::Value = serde_json::from_str(stored).unwrap();
    let block = &raw["blocks"][0];
    assert_eq!(block["text"], "* hi");
    assert_eq!(block["type"], "unstyled");
    assert_eq!(block["inlineStyleRanges"][0]["style"], "BOLD");
    assert_eq!(block["inlineStyleRanges"][0]["offset"], 0);
    assert_eq!(block["inlineStyleRanges"][0]["length"], 4);
}

#[test]
fn test_explicit_save_without_autosave() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut app = App::new(Box::new(FileStore::new(&path))).with_autosave(false);
    let model = app.initial_model((80, 24));
    let model = type_text(&mut app, model, "draft");
    assert!(!path.exists());

    app.dispatch(model, Message::Save);
    let store = FileStore::new(&path);
    let doc = storage::load(&store).unwrap();
    assert_eq!(doc.plain_text(), "draft");
}

#[test]
fn test_corrupt_store_is_kept_aside_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let mut app = App::new(Box::new(FileStore::new(&path)));
    let model = app.initial_model((80, 24));
    assert_eq!(model.editor.content().plain_text(), "");

    let model = type_text(&mut app, model, "fresh");
    assert!(model.active_toast().is_none());
    let store = FileStore::new(&path);
    assert!(store.get(CONTENT_KEY).unwrap().is_some());
    assert_eq!(storage::load(&store).unwrap().plain_text(), "fresh");

    let backup = dir.path().join("storage.json.bak");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ this is not json");
}

#[test]
fn test_reset_clears_stored_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut app = App::new(Box::new(FileStore::new(&path)));
    let model = app.initial_model((80, 24));
    type_text(&mut app, model, "gone soon");

    let mut store = FileStore::new(&path);
    storage::clear(&mut store).unwrap();
    let app = App::new(Box::new(store));
    let model = app.initial_model((80, 24));
    assert_eq!(model.editor.content().plain_text(), "");
}
