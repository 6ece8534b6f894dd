//! A raw store persisted as a single JSON document on disk.
//!
//! The native counterpart of browser localStorage: values survive the
//! process, and every chain pointed at the same path sees the same entries.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use prefstore_core::{RawStore, Result, StoreError};
use tracing::debug;

/// Environment variable overriding [`FileStore::default_path`].
pub const STORE_PATH_ENV: &str = "PREFSTORE_PATH";

type Entries = BTreeMap<String, String>;

/// Stores every entry in one JSON object file: `{ "<key>": "<value>", ... }`.
///
/// There is no cache. Reads load the file each time and writes rewrite it, so
/// changes made by another process are picked up on the next read. Writes go
/// to a uniquely named sibling temp file that is then renamed over the
/// original, so a crash never leaves a half-written document behind and a
/// failed write leaves no temp file. Concurrent writers from different
/// processes race; the last rename wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// A store backed by `path`. The file is not touched until first use; a
    /// missing file reads as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// A store at [`FileStore::default_path`].
    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    /// Where the per-user store lives:
    ///
    /// 1. `$PREFSTORE_PATH`, if set and non-empty.
    /// 2. `<config dir>/prefstore/storage.json` (e.g. `~/.config` on Linux).
    /// 3. `prefstore.json` in the working directory.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(STORE_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|dir| dir.join("prefstore").join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("prefstore.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            StoreError::backend(format!("corrupt store file {}: {e}", self.path.display()))
        })
    }

    fn save(&self, entries: &Entries) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::backend(format!("failed to encode store file: {e}")))?;

        // Removed on drop if anything below fails.
        let mut tmp = tempfile::Builder::new()
            .prefix(".prefstore-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(io::Error::from)?;

        debug!(path = %self.path.display(), entries = entries.len(), "store file written");
        Ok(())
    }

    /// Load, apply `edit`, and save only if `edit` reports a change.
    fn update(&self, edit: impl FnOnce(&mut Entries) -> bool) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        if edit(&mut entries) {
            self.save(&entries)?;
        }
        Ok(())
    }
}

impl RawStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.into_keys().collect())
    }
}
