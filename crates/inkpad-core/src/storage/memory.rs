//! In-memory storage implementation.

use super::naming::{claim_unique_name, unix_millis};
use super::{
    IMAGE_PREFIX, STROKE_EXTENSION, SavedDrawing, Storage, StorageError, StorageResult, THUMBNAIL_PREFIX,
    stroke_key_for, thumbnail_key_for,
};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries (thumbnails, stroke files and exports).
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw bytes stored under `key`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn insert_new(&self, prefix: &str, bytes: &[u8]) -> StorageResult<String> {
        let mut entries = self.entries.write().map_err(|e| {
            StorageError::Other(format!("Lock error: {}", e))
        })?;
        let (name, ()) = claim_unique_name(prefix, ".png", unix_millis, |name| {
            Ok((!entries.contains_key(name)).then_some(()))
        })?;
        entries.insert(name.clone(), bytes.to_vec());
        Ok(name)
    }

    fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let entries = self.entries.read().map_err(|e| {
            StorageError::Other(format!("Lock error: {}", e))
        })?;
        entries.get(key).cloned().ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}

impl Storage for MemoryStorage {
    fn save_drawing(&self, strokes: &str, thumbnail_png: &[u8]) -> StorageResult<SavedDrawing> {
        let thumbnail_key = self.insert_new(THUMBNAIL_PREFIX, thumbnail_png)?;
        let stroke_key = stroke_key_for(&thumbnail_key);
        let mut entries = self.entries.write().map_err(|e| {
            StorageError::Other(format!("Lock error: {}", e))
        })?;
        entries.insert(stroke_key.clone(), strokes.as_bytes().to_vec());
        Ok(SavedDrawing {
            stroke_key,
            thumbnail_key,
        })
    }

    fn save_image(&self, png: &[u8]) -> StorageResult<String> {
        self.insert_new(IMAGE_PREFIX, png)
    }

    fn load_strokes(&self, stroke_key: &str) -> StorageResult<String> {
        let bytes = self.read(stroke_key)?;
        String::from_utf8(bytes).map_err(|e| StorageError::Other(e.to_string()))
    }

    fn load_thumbnail(&self, stroke_key: &str) -> StorageResult<Vec<u8>> {
        let thumbnail_key =
            thumbnail_key_for(stroke_key).ok_or_else(|| StorageError::NotFound(stroke_key.to_string()))?;
        self.read(thumbnail_key)
    }

    fn delete(&self, stroke_key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|e| {
            StorageError::Other(format!("Lock error: {}", e))
        })?;
        entries.remove(stroke_key);
        if let Some(thumbnail_key) = thumbnail_key_for(stroke_key) {
            entries.remove(thumbnail_key);
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let entries = self.entries.read().map_err(|e| {
            StorageError::Other(format!("Lock error: {}", e))
        })?;
        Ok(entries
            .keys()
            .filter(|key| key.ends_with(STROKE_EXTENSION))
            .cloned()
            .collect())
    }
}
