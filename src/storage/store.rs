//! Key/value stores backing persistence.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Result, StorageError};

/// A string-keyed store of string values.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop `key`; missing keys are not an error.
    ///
    /// # Errors
    /// Returns an error when the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// All entries in one JSON object on disk.
///
/// A missing file reads as an empty store. Writes go through a temp file
/// in the same directory and a rename, so a crash never leaves half a file.
/// A file that holds something other than a JSON object is never
/// overwritten: the first write moves it to `<name>.bak`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Entries to start a write from. A file that is not a JSON object of
    /// strings is moved aside to a `.bak` sibling first; read errors are
    /// returned.
    fn entries_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.read_entries() {
            Err(StorageError::Json(err)) => {
                let backup = self.backup_path();
                fs::rename(&self.path, &backup)?;
                tracing::warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    %err,
                    "store is not a JSON object, moved aside"
                );
                Ok(BTreeMap::new())
            }
            entries => entries,
        }
    }

    /// First of `<name>.bak`, `<name>.bak.1`, ... that does not exist yet.
    fn backup_path(&self) -> PathBuf {
        let first = self.sibling(".bak");
        if !first.exists() {
            return first;
        }
        (1..)
            .map(|n| self.sibling(&format!(".bak.{n}")))
            .find(|path| !path.exists())
            .unwrap_or(first)
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.sibling(".tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut entries = self.entries_for_write()?;
        entries.remove(key);
        self.write_entries(&entries)
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
