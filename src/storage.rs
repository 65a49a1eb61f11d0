//! Durable key-value slots.
//!
//! Each record kind keeps its whole collection as one serialized string under
//! a slot key. The [`SlotStorage`] trait is the only thing collection stores
//! talk to, so tests can swap the file backend for [`MemoryStorage`].

use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, error, trace};
use tempfile::NamedTempFile;

use crate::{Result, ShelfError};

/// Read/write access to named durable slots.
pub trait SlotStorage {
    /// Returns the slot's text, or `None` if nothing has been written yet.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the slot's text wholesale.
    fn write(&mut self, key: &str, text: &str) -> Result<()>;
}

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a file backend rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            debug!("Data directory does not exist, creating: {}", dir.display());
            fs::create_dir_all(&dir).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                ShelfError::DirectoryError { path: dir.clone() }
            })?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Helper method to get the file path for a slot
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SlotStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        trace!("Reading slot {} from {}", key, path.display());
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read slot file {}: {}", path.display(), e);
                Err(ShelfError::Io(e))
            }
        }
    }

    /// Writes through a temporary file in the same directory and renames it
    /// over the slot, so readers never see a partial write.
    fn write(&mut self, key: &str, text: &str) -> Result<()> {
        let path = self.slot_path(key);
        debug!("Writing slot {} to {}", key, path.display());

        let mut temp_file = NamedTempFile::new_in(&self.dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            ShelfError::Io(e)
        })?;

        temp_file.write_all(text.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            ShelfError::Io(e)
        })?;

        temp_file.flush()?;

        temp_file.persist(&path).map_err(|e| {
            error!("Failed to persist file {}: {}", path.display(), e.error);
            ShelfError::Io(e.error)
        })?;

        trace!("Slot {} written ({} bytes)", key, text.len());
        Ok(())
    }
}

/// In-process slots. Clones share the same map, so a test can keep a handle
/// and inspect what a store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, e.g. with hand-written or corrupt content.
    pub fn with_slot(self, key: &str, text: &str) -> Self {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, text: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
        Ok(())
    }
}
