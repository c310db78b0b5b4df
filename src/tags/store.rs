use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock
};

use super::{Category, Tag, TagRepository, TagSnapshot};
use crate::error::{
    AppResult, file_read_error, file_write_error, json_parse_error, serialization_error,
    store_lock_error
};

/// Process-local tag store
#[derive(Debug, Default)]
pub struct MemoryTagStore {
    state: RwLock<TagSnapshot>
}

impl MemoryTagStore {
    /// Store pre-filled with the given tags; categories are seeded lazily
    pub fn with_tags(tags: Vec<Tag>) -> Self {
        Self {
            state: RwLock::new(TagSnapshot {
                tags: Some(tags),
                ..Default::default()
            })
        }
    }

    /// Store holding a copy of `snapshot`, nothing is written anywhere else
    pub fn from_snapshot(snapshot: TagSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot)
        }
    }
}

impl TagRepository for MemoryTagStore {
    fn load_tags(&self) -> AppResult<Vec<Tag>> {
        let state = self.state.read().map_err(|_| store_lock_error())?;
        Ok(state.tags.clone().unwrap_or_default())
    }

    fn save_tags(&self, tags: &[Tag]) -> AppResult<()> {
        let mut state = self.state.write().map_err(|_| store_lock_error())?;
        state.tags = Some(tags.to_vec());
        Ok(())
    }

    fn load_categories(&self) -> AppResult<Option<Vec<Category>>> {
        let state = self.state.read().map_err(|_| store_lock_error())?;
        Ok(state.categories.clone())
    }

    fn save_categories(&self, categories: &[Category]) -> AppResult<()> {
        let mut state = self.state.write().map_err(|_| store_lock_error())?;
        state.categories = Some(categories.to_vec());
        Ok(())
    }
}

/// Tag store persisted as one JSON document on disk.
///
/// A missing file reads as an empty store. Every save rewrites the whole
/// document; the lock serializes writers within one process.
#[derive(Debug)]
pub struct JsonFileTagStore {
    path: PathBuf,
    lock: RwLock<()>
}

impl JsonFileTagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(())
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> AppResult<TagSnapshot> {
        if !self.path.exists() {
            return Ok(TagSnapshot::default());
        }
        let display = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).map_err(|e| file_read_error(&display, e))?;
        if content.trim().is_empty() {
            return Ok(TagSnapshot::default());
        }
        serde_json::from_str(&content).map_err(|e| json_parse_error(&e))
    }

    fn write_snapshot(&self, snapshot: &TagSnapshot) -> AppResult<()> {
        let display = self.path.display().to_string();
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| file_write_error(&display, e))?;
        }
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| serialization_error(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| file_write_error(&display, e))
    }

    fn modify(&self, change: impl FnOnce(&mut TagSnapshot)) -> AppResult<()> {
        let _guard = self.lock.write().map_err(|_| store_lock_error())?;
        let mut snapshot = self.read_snapshot()?;
        change(&mut snapshot);
        snapshot.exported_at = None;
        self.write_snapshot(&snapshot)
    }
}

impl TagRepository for JsonFileTagStore {
    fn load_tags(&self) -> AppResult<Vec<Tag>> {
        let _guard = self.lock.read().map_err(|_| store_lock_error())?;
        Ok(self.read_snapshot()?.tags.unwrap_or_default())
    }

    fn save_tags(&self, tags: &[Tag]) -> AppResult<()> {
        self.modify(|snapshot| snapshot.tags = Some(tags.to_vec()))
    }

    fn load_categories(&self) -> AppResult<Option<Vec<Category>>> {
        let _guard = self.lock.read().map_err(|_| store_lock_error())?;
        Ok(self.read_snapshot()?.categories)
    }

    fn save_categories(&self, categories: &[Category]) -> AppResult<()> {
        self.modify(|snapshot| snapshot.categories = Some(categories.to_vec()))
    }
}
