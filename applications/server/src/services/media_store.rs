/// Media blob store - audio bytes on disk
///
/// Blobs live under `{base}/{owner_id}/{file_name}`; the relative path is the
/// opaque token stored in the `files` table. Storing under a name the same
/// owner already used silently overwrites the previous bytes.
use crate::error::{Result, ServerError};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct MediaStore {
    base_path: PathBuf,
}

impl MediaStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Initialize the base storage directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Relative path for an owner's blob: `{owner_id}/{file_name}`
    pub fn blob_path(owner_id: i64, file_name: &str) -> String {
        format!("{owner_id}/{file_name}")
    }

    /// Store bytes under a relative path, creating the owner directory as
    /// needed. Returns the absolute path written.
    pub async fn store(&self, rel_path: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.resolve(rel_path)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        Ok(path)
    }

    /// Open a stored blob for reading, or `None` if it is absent
    pub async fn open(&self, rel_path: &str) -> Result<Option<tokio::fs::File>> {
        let path = self.resolve(rel_path)?;

        match tokio::fs::File::open(&path).await {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Absolute path plus size of a stored blob, or `None` if absent
    pub async fn stat(&self, rel_path: &str) -> Result<Option<(PathBuf, u64)>> {
        let path = self.resolve(rel_path)?;

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some((path, meta.len()))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a stored blob. Returns whether anything was removed.
    pub async fn remove(&self, rel_path: &str) -> Result<bool> {
        let path = self.resolve(rel_path)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a relative token to an absolute path, rejecting any component
    /// that would escape the base directory.
    fn resolve(&self, rel_path: &str) -> Result<PathBuf> {
        let rel = Path::new(rel_path);

        for component in rel.components() {
            match component {
                Component::Normal(_) => {}
                _ => {
                    return Err(ServerError::Unauthorized(
                        "Path traversal attempt detected".to_string(),
                    ))
                }
            }
        }

        Ok(self.base_path.join(rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_open_remove() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(temp_dir.path().to_path_buf());
        store.initialize().await.unwrap();

        let rel = MediaStore::blob_path(7, "song.mp3");
        assert_eq!(rel, "7/song.mp3");

        store.store(&rel, b"audio bytes").await.unwrap();
        assert!(store.open(&rel).await.unwrap().is_some());

        let (path, size) = store.stat(&rel).await.unwrap().unwrap();
        assert!(path.ends_with("7/song.mp3"));
        assert_eq!(size, 11);

        assert!(store.remove(&rel).await.unwrap());
        assert!(store.open(&rel).await.unwrap().is_none());
        assert!(!store.remove(&rel).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_name_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(temp_dir.path().to_path_buf());
        store.initialize().await.unwrap();

        let rel = MediaStore::blob_path(1, "track.mp3");
        store.store(&rel, b"first").await.unwrap();
        store.store(&rel, b"second").await.unwrap();

        let (_, size) = store.stat(&rel).await.unwrap().unwrap();
        assert_eq!(size, 6);
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(temp_dir.path().to_path_buf());
        store.initialize().await.unwrap();

        assert!(store.open("../etc/passwd").await.is_err());
        assert!(store.store("1/../../escape.mp3", b"x").await.is_err());
    }
}
