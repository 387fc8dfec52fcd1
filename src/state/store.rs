//! Application state: settings, handled images and memory history (persisted),
//! plus image notes and the last scan (session only).

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::Memory;

use super::LocalStorage;

/// Keys of the persisted values.
pub struct StateKeys;

impl StateKeys {
    pub const SOURCE_PATH: &'static str = "sourcePath";
    pub const DESTINATION_PATH: &'static str = "destinationPath";
    pub const HANDLED_IMAGES: &'static str = "handledImages";
    pub const MEMORIES: &'static str = "memories";
}

/// Explicit state object: loaded once, passed by reference, flushed to storage on every mutation.
#[derive(Debug, Default)]
pub struct StateStore {
    storage: LocalStorage,
    source_path: Option<PathBuf>,
    destination_path: Option<PathBuf>,
    handled_images: Vec<String>,
    handled_set: HashSet<String>,
    memories: Vec<Memory>,
    image_notes: HashMap<String, String>,
    scanned_images: Vec<String>,
}

impl StateStore {
    /// Load state from the file at `path` (missing file = empty state).
    /// Unparseable `handledImages` / `memories` values are logged and skipped.
    pub fn open(path: &Path) -> Result<Self> {
        let storage = LocalStorage::open(path)?;
        Ok(Self::from_storage(storage))
    }

    /// State with no backing file.
    pub fn in_memory() -> Self {
        Self::from_storage(LocalStorage::in_memory())
    }

    fn from_storage(storage: LocalStorage) -> Self {
        let source_path = storage.get_item(StateKeys::SOURCE_PATH).map(PathBuf::from);
        let destination_path = storage
            .get_item(StateKeys::DESTINATION_PATH)
            .map(PathBuf::from);
        let handled: Vec<String> =
            load_json_item(&storage, StateKeys::HANDLED_IMAGES).unwrap_or_default();
        let memories: Vec<Memory> =
            load_json_item(&storage, StateKeys::MEMORIES).unwrap_or_default();

        let mut store = Self {
            storage,
            source_path,
            destination_path,
            memories,
            ..Self::default()
        };
        store.extend_handled(handled);
        debug!(
            "State loaded: {} handled images, {} memories",
            store.handled_images.len(),
            store.memories.len()
        );
        store
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.storage.path()
    }

    // ---- Settings ----

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn destination_path(&self) -> Option<&Path> {
        self.destination_path.as_deref()
    }

    pub fn set_source_path(&mut self, dir: &Path) -> Result<()> {
        self.storage
            .set_item(StateKeys::SOURCE_PATH, utf8_path(dir)?)?;
        self.source_path = Some(dir.to_path_buf());
        Ok(())
    }

    pub fn set_destination_path(&mut self, dir: &Path) -> Result<()> {
        self.storage
            .set_item(StateKeys::DESTINATION_PATH, utf8_path(dir)?)?;
        self.destination_path = Some(dir.to_path_buf());
        Ok(())
    }

    // ---- Handled images ----

    /// Images included in some export, oldest first.
    pub fn handled_images(&self) -> &[String] {
        &self.handled_images
    }

    pub fn is_handled(&self, image: &str) -> bool {
        self.handled_set.contains(image)
    }

    /// Mark `images` as handled (already handled ones are not repeated) and persist the list.
    pub fn remember_handled_images<S: AsRef<str>>(&mut self, images: &[S]) -> Result<()> {
        self.extend_handled(images.iter().map(|s| s.as_ref().to_string()));
        let json = serde_json::to_string(&self.handled_images).context("serialize handled images")?;
        self.storage.set_item(StateKeys::HANDLED_IMAGES, json)
    }

    fn extend_handled<I: IntoIterator<Item = String>>(&mut self, images: I) {
        for image in images {
            if self.handled_set.insert(image.clone()) {
                self.handled_images.push(image);
            }
        }
    }

    // ---- Memories ----

    /// Memory history, oldest first.
    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    pub fn remember_memory(&mut self, memory: Memory) -> Result<()> {
        self.memories.push(memory);
        let json = serde_json::to_string(&self.memories).context("serialize memories")?;
        self.storage.set_item(StateKeys::MEMORIES, json)
    }

    // ---- Session-only state ----

    pub fn image_notes(&self) -> &HashMap<String, String> {
        &self.image_notes
    }

    pub fn image_note(&self, image: &str) -> Option<&str> {
        self.image_notes.get(image).map(String::as_str)
    }

    /// Attach a caption to `image` for the next gallery. A blank note clears it.
    pub fn set_image_note(&mut self, image: &str, note: &str) {
        if note.trim().is_empty() {
            self.image_notes.remove(image);
        } else {
            self.image_notes.insert(image.to_string(), note.to_string());
        }
    }

    pub fn scanned_images(&self) -> &[String] {
        &self.scanned_images
    }

    pub fn set_scanned_images(&mut self, images: Vec<String>) {
        self.scanned_images = images;
    }

    /// Scanned images not yet handled, in scan order.
    pub fn unhandled_images(&self) -> Vec<String> {
        self.scanned_images
            .iter()
            .filter(|i| !self.is_handled(i))
            .cloned()
            .collect()
    }
}

/// Folders are stored as text; a path that is not UTF-8 cannot round-trip.
fn utf8_path(dir: &Path) -> Result<&str> {
    dir.to_str()
        .ok_or_else(|| anyhow!("folder path is not valid UTF-8: {}", dir.display()))
}

fn load_json_item<T: DeserializeOwned>(storage: &LocalStorage, key: &str) -> Option<T> {
    let raw = storage.get_item(key)?;
    serde_json::from_str(raw)
        .map_err(|e| warn!("Unable to parse stored {}: {}", key, e))
        .ok()
}

