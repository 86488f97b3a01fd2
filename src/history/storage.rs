//! Persistent key-value storage backends.
//!
//! # Responsibilities
//! - String-keyed, string-valued get/set/remove
//! - Whole-value writes (no partial updates)
//!
//! # Design Decisions
//! - Synchronous: a single owner reads and writes, nothing to await
//! - `FileStorage` rereads the file on every access so writes from another
//!   process are visible; concurrent writers race and the last one wins
//! - `MemoryStorage` can enforce a byte quota to model a full store

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "storage quota exceeded writing '{key}': {requested} bytes requested, quota is {quota}"
    )]
    QuotaExceeded {
        key: String,
        requested: usize,
        quota: usize,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value store holding string values.
pub trait Storage {
    /// Value under `key`, or `None` if the key is absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Absent keys are not an error.
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

/// In-process storage, optionally bounded by total bytes of keys and values.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes pushing the total size past `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// Total bytes of all keys and values.
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota {
            let existing = self.items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let requested = self.used_bytes() - existing + key.len() + value.len();
            if requested > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    quota,
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage persisted as a single JSON object file.
///
/// A backing file that exists but is not a JSON object of strings is never
/// overwritten: every call fails with [`StorageError::Corrupt`] until the file
/// is repaired or removed.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Write through a sibling temp file and rename it over the target.
    fn write_all(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let result = write_json(&tmp_path, items)
            .and_then(|()| fs::rename(&tmp_path, &self.path).map_err(StorageError::from));
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result?;

        tracing::trace!(path = ?self.path, keys = items.len(), "Storage file written");
        Ok(())
    }
}

fn write_json(path: &Path, items: &BTreeMap<String, String>) -> StorageResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, items).map_err(std::io::Error::from)?;
    writer.flush()?;
    Ok(())
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}
