//! Stylepad - a terminal rich-text editor with typed autoformat shortcuts.
//!
//! # Usage
//!
//! ```bash
//! stylepad
//! stylepad --store notes.json
//! stylepad --no-autosave --log-file stylepad.log
//! stylepad --reset
//! ```

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stylepad::app::App;
use stylepad::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, resolve_log_path, resolve_store_path, save_config_flags, ConfigFlags,
};
use stylepad::storage::{self, FileStore};

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "STYLEPAD_LOG";

/// A terminal rich-text editor with typed autoformat shortcuts
#[derive(Parser, Debug)]
#[command(name = "stylepad", version, about, long_about = None)]
struct Cli {
    /// JSON file the content is stored in
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Only save on Ctrl+S or the Save button
    #[arg(long)]
    no_autosave: bool,

    /// Write logs here instead of the default state-dir log file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Discard the stored content and start with an empty document
    #[arg(long)]
    reset: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Log to `path`, or nowhere. ratatui owns the terminal while the editor
/// runs, so stderr output would be drawn over the text.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let Some(path) = path else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
        return Ok(());
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log dir {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(resolve_log_path(&effective).as_deref())?;

    let store_path = resolve_store_path(&effective);
    tracing::info!(store = %store_path.display(), "using store");

    let mut store = FileStore::new(&store_path);
    if cli.reset {
        storage::clear(&mut store)
            .with_context(|| format!("Failed to reset {}", store_path.display()))?;
    }

    let mut app = App::new(Box::new(store))
        .with_autosave(!effective.no_autosave)
        .with_store_label(store_path.display().to_string());

    app.run().context("Application error")
}
