//! Session state store
//!
//! A [`SessionStore`] is a flat map of string keys to JSON values that the
//! navigator (and anything else in a session) writes its persistent state
//! into. Where the values end up is decided by a [`StorageBackend`]:
//!
//! - [`MemoryStorage`] keeps them for the life of the process (tests,
//!   embedding hosts with their own persistence)
//! - [`FileStorage`] writes a JSON file atomically (temp file + rename)
//!
//! # File format
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "entries": {
//!     "granularity": 5
//!   }
//! }
//! ```
//!
//! A file with a different `format_version` is ignored with a warning.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorType, NavError, Result};

/// Stored entries, ordered by key
pub type Entries = BTreeMap<String, Value>;

/// Key/value state for one navigation session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    entries: Entries,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read all entries from a backend
    pub fn load(backend: &dyn StorageBackend) -> Result<Self> {
        let entries = backend.load_all()?;
        tracing::debug!(backend = backend.name(), entries = entries.len(), "loaded session store");
        Ok(SessionStore { entries })
    }

    /// Write all entries to a backend, replacing what it held
    pub fn save(&self, backend: &dyn StorageBackend) -> Result<()> {
        backend.save_all(&self.entries)?;
        tracing::debug!(backend = backend.name(), entries = self.entries.len(), "saved session store");
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Where session state is kept between sessions
pub trait StorageBackend {
    /// Human-readable backend name for logs
    fn name(&self) -> &str;

    /// Load every stored entry; a backend with nothing stored yields an empty map
    fn load_all(&self) -> Result<Entries>;

    /// Replace the stored entries
    fn save_all(&self, entries: &Entries) -> Result<()>;

    /// Remove everything stored
    fn clear(&self) -> Result<()>;
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<Entries>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: Entries) -> Self {
        MemoryStorage {
            entries: RefCell::new(entries),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn load_all(&self) -> Result<Entries> {
        Ok(self.entries.borrow().clone())
    }

    fn save_all(&self, entries: &Entries) -> Result<()> {
        *self.entries.borrow_mut() = entries.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StateFile {
    format_version: u32,
    #[serde(default)]
    entries: Entries,
}

impl StateFile {
    const FORMAT_VERSION: u32 = 1;
}

/// JSON file storage
///
/// The file need not exist; it is created (with its parent directories)
/// on the first save. Saves write `<path>.tmp`, sync it, then rename it
/// over the target so a crash never leaves a half-written file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileStorage {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl StorageBackend for FileStorage {
    fn name(&self) -> &str {
        "FileStorage"
    }

    fn load_all(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let state: StateFile = serde_json::from_reader(reader).map_err(|e| {
            NavError::new(
                ErrorType::Store,
                "STORE_PARSE_ERROR",
                format!("Failed to parse {}: {e}", self.path.display()),
            )
        })?;

        if state.format_version != StateFile::FORMAT_VERSION {
            tracing::warn!(
                stored = state.format_version,
                expected = StateFile::FORMAT_VERSION,
                "state file format version mismatch, ignoring stored state"
            );
            return Ok(Entries::new());
        }
        Ok(state.entries)
    }

    fn save_all(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let state = StateFile {
            format_version: StateFile::FORMAT_VERSION,
            entries: entries.clone(),
        };

        let tmp_path = self.temp_path();
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, &state).map_err(|e| {
                NavError::new(
                    ErrorType::Store,
                    "STORE_WRITE_ERROR",
                    format!("Failed to serialize session state: {e}"),
                )
            })?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "wrote state file");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
