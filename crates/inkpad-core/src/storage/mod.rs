//! Storage abstraction for saved drawings.
//!
//! A saved drawing is a pair: a PNG thumbnail named `thumbnail-<millis>.png`
//! and the stroke text stored next to it as `thumbnail-<millis>.png.stroke`.
//! Full-size exports are standalone `image-<millis>.png` files.

mod memory;
mod naming;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;
pub use naming::{MAX_NAME_ATTEMPTS, NAME_RETRY_DELAY, claim_unique_name, unix_millis};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::surface::SurfaceError;
use thiserror::Error;

/// Extension of stroke files.
pub const STROKE_EXTENSION: &str = ".stroke";

/// Name prefix of drawing thumbnails.
pub const THUMBNAIL_PREFIX: &str = "thumbnail-";

/// Name prefix of full-size exports.
pub const IMAGE_PREFIX: &str = "image-";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Drawing not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("No free file name for prefix {0:?}")]
    NameExhausted(String),
    #[error("Render error: {0}")]
    Render(#[from] SurfaceError),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Keys of a saved drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDrawing {
    /// Stroke text; pass to [`Storage::load_strokes`].
    pub stroke_key: String,
    /// PNG thumbnail shown in galleries.
    pub thumbnail_key: String,
}

/// Thumbnail key belonging to a stroke key.
pub fn thumbnail_key_for(stroke_key: &str) -> Option<&str> {
    stroke_key.strip_suffix(STROKE_EXTENSION)
}

/// Stroke key belonging to a thumbnail key.
pub fn stroke_key_for(thumbnail_key: &str) -> String {
    format!("{thumbnail_key}{STROKE_EXTENSION}")
}

/// Trait for drawing storage backends.
///
/// All operations are synchronous; the host decides which thread runs them.
pub trait Storage {
    /// Store a new drawing under fresh unique names.
    fn save_drawing(&self, strokes: &str, thumbnail_png: &[u8]) -> StorageResult<SavedDrawing>;

    /// Store a full-size export under a fresh unique name and return its key.
    fn save_image(&self, png: &[u8]) -> StorageResult<String>;

    /// Read the stroke text of a drawing.
    fn load_strokes(&self, stroke_key: &str) -> StorageResult<String>;

    /// Read the thumbnail PNG of a drawing.
    fn load_thumbnail(&self, stroke_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a drawing's stroke file and thumbnail.
    fn delete(&self, stroke_key: &str) -> StorageResult<()>;

    /// Stroke keys of every saved drawing, sorted.
    fn list(&self) -> StorageResult<Vec<String>>;
}
