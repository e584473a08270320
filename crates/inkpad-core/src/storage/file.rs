//! File-based storage implementation for native platforms.

use super::naming::{claim_unique_name, unix_millis};
use super::{
    IMAGE_PREFIX, STROKE_EXTENSION, SavedDrawing, Storage, StorageError, StorageResult, THUMBNAIL_PREFIX,
    stroke_key_for, thumbnail_key_for,
};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Keys are file names inside the base directory.
pub struct FileStorage {
    /// Directory holding thumbnails, stroke files and exports.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        if !base_path.is_dir() {
            return Err(StorageError::Io(format!("Not a directory: {}", base_path.display())));
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/inkpad/drawings/`
    /// On Windows: `%LOCALAPPDATA%\inkpad\drawings\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(drawings_dir(&base))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Absolute path of a key.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let is_plain_name = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\']);
        if !is_plain_name {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(self.base_path.join(key))
    }

    /// Create `<prefix><millis>.png` exclusively and write `png` to it.
    fn write_new_png(&self, prefix: &str, png: &[u8]) -> StorageResult<String> {
        let (name, mut file) = claim_unique_name(prefix, ".png", unix_millis, |name| {
            create_new(&self.base_path.join(name))
        })?;
        let path = self.base_path.join(&name);
        let written = file.write_all(png).and_then(|()| file.sync_all());
        drop(file);
        if let Err(e) = written {
            let _ = fs::remove_file(&path);
            return Err(StorageError::Io(format!("Failed to write {}: {}", path.display(), e)));
        }
        Ok(name)
    }

    /// Write the stroke file paired with a freshly claimed thumbnail.
    ///
    /// The name is claimed exclusively; an existing file is never overwritten.
    fn write_stroke_file(&self, stroke_key: &str, strokes: &str) -> StorageResult<()> {
        let path = self.base_path.join(stroke_key);
        let Some(mut file) = create_new(&path)? else {
            return Err(StorageError::Io(format!("{} already exists", path.display())));
        };
        let written = file.write_all(strokes.as_bytes()).and_then(|()| file.sync_all());
        drop(file);
        if let Err(e) = written {
            let _ = fs::remove_file(&path);
            return Err(StorageError::Io(format!("Failed to write {}: {}", path.display(), e)));
        }
        Ok(())
    }

    fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.path_for(key)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
            _ => StorageError::Io(format!("Failed to read {}: {}", path.display(), e)),
        })
    }
}

/// Drawing directory under a platform data directory.
fn drawings_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("inkpad").join("drawings")
}

/// Open `path` only if it does not exist yet.
fn create_new(path: &Path) -> StorageResult<Option<File>> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(StorageError::Io(format!("Failed to create {}: {}", path.display(), e))),
    }
}

impl Storage for FileStorage {
    fn save_drawing(&self, strokes: &str, thumbnail_png: &[u8]) -> StorageResult<SavedDrawing> {
        let thumbnail_key = self.write_new_png(THUMBNAIL_PREFIX, thumbnail_png)?;
        let stroke_key = stroke_key_for(&thumbnail_key);

        if let Err(e) = self.write_stroke_file(&stroke_key, strokes) {
            log::error!("failed to write stroke file {stroke_key}: {e}");
            let _ = fs::remove_file(self.base_path.join(&thumbnail_key));
            return Err(e);
        }

        Ok(SavedDrawing {
            stroke_key,
            thumbnail_key,
        })
    }

    fn save_image(&self, png: &[u8]) -> StorageResult<String> {
        self.write_new_png(IMAGE_PREFIX, png)
    }

    fn load_strokes(&self, stroke_key: &str) -> StorageResult<String> {
        let bytes = self.read(stroke_key)?;
        String::from_utf8(bytes)
            .map_err(|e| StorageError::Other(format!("Stroke file {} is not UTF-8: {}", stroke_key, e)))
    }

    fn load_thumbnail(&self, stroke_key: &str) -> StorageResult<Vec<u8>> {
        let thumbnail_key =
            thumbnail_key_for(stroke_key).ok_or_else(|| StorageError::NotFound(stroke_key.to_string()))?;
        self.read(thumbnail_key)
    }

    fn delete(&self, stroke_key: &str) -> StorageResult<()> {
        let mut paths = vec![self.path_for(stroke_key)?];
        if let Some(thumbnail_key) = thumbnail_key_for(stroke_key) {
            paths.push(self.path_for(thumbnail_key)?);
        }

        for path in paths {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            StorageError::Io(format!("Failed to read directory: {}", e))
        })?;

        let mut keys: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(STROKE_EXTENSION))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_drawing() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let saved = storage.save_drawing("-1\n", b"png-bytes").unwrap();
        assert!(saved.thumbnail_key.starts_with("thumbnail-"));
        assert!(saved.thumbnail_key.ends_with(".png"));
        assert_eq!(saved.stroke_key, format!("{}.stroke", saved.thumbnail_key));

        assert_eq!(storage.load_strokes(&saved.stroke_key).unwrap(), "-1\n");
        assert_eq!(storage.load_thumbnail(&saved.stroke_key).unwrap(), b"png-bytes");
        assert!(dir.path().join(&saved.thumbnail_key).is_file());
    }

    #[test]
    fn test_saves_never_collide() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let first = storage.save_drawing("1\n", b"a").unwrap();
        let second = storage.save_drawing("2\n", b"b").unwrap();
        assert_ne!(first.stroke_key, second.stroke_key);
        assert_eq!(storage.load_strokes(&first.stroke_key).unwrap(), "1\n");
        assert_eq!(storage.load_strokes(&second.stroke_key).unwrap(), "2\n");
    }

    #[test]
    fn test_list_only_stroke_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let drawing = storage.save_drawing("-1\n", b"thumb").unwrap();
        storage.save_image(b"image").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(storage.list().unwrap(), vec![drawing.stroke_key]);
    }

    #[test]
    fn test_delete_removes_both_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let saved = storage.save_drawing("-1\n", b"thumb").unwrap();
        storage.delete(&saved.stroke_key).unwrap();

        assert!(!dir.path().join(&saved.stroke_key).exists());
        assert!(!dir.path().join(&saved.thumbnail_key).exists());
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert!(matches!(storage.load_strokes("missing.stroke"), Err(StorageError::NotFound(_))));
        assert!(matches!(storage.load_thumbnail("missing.stroke"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert!(matches!(storage.load_strokes("../secret.stroke"), Err(StorageError::NotFound(_))));
        assert!(matches!(storage.delete(".."), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_stroke_file_never_overwritten() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let key = "thumbnail-1.png.stroke";
        fs::write(dir.path().join(key), "leftover").unwrap();

        assert!(matches!(storage.write_stroke_file(key, "-1\n"), Err(StorageError::Io(_))));
        assert_eq!(fs::read_to_string(dir.path().join(key)).unwrap(), "leftover");

        storage.write_stroke_file("thumbnail-2.png.stroke", "-1\n").unwrap();
        assert_eq!(storage.load_strokes("thumbnail-2.png.stroke").unwrap(), "-1\n");
    }

    #[test]
    fn test_base_path_and_default_layout() {
        let dir = tempdir().unwrap();
        let base = drawings_dir(dir.path());
        assert!(base.ends_with("inkpad/drawings"));

        let storage = FileStorage::new(base.clone()).unwrap();
        assert_eq!(storage.base_path(), base.as_path());
        assert!(base.is_dir());
        assert_eq!(storage.path_for("a.stroke").unwrap(), base.join("a.stroke"));
    }

    #[test]
    fn test_new_rejects_regular_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("plain");
        fs::write(&file_path, "x").unwrap();
        assert!(matches!(FileStorage::new(file_path), Err(StorageError::Io(_))));
    }
}
