use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;

pub const MEDIA_URL_PREFIX: &str = "/media";

/// Blob storage for pictures and posters. References are opaque strings;
/// only the endpoint layer calls this.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store(&self, container: &str, file_name: &str, data: &[u8]) -> AppResult<String>;

    /// Replaces the blob behind `old_reference` (tolerating a missing
    /// file) and stores the new one.
    async fn edit(
        &self,
        old_reference: Option<&str>,
        container: &str,
        file_name: &str,
        data: &[u8],
    ) -> AppResult<String>;

    async fn delete(&self, reference: &str, container: &str) -> AppResult<()>;
}

/// Disk-backed storage under a media root; stored files are served
/// statically under `/media`.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn disk_path(&self, reference: &str) -> Option<PathBuf> {
        let relative = reference.strip_prefix(MEDIA_URL_PREFIX)?.trim_start_matches('/');
        let relative = Path::new(relative);
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, container: &str, file_name: &str, data: &[u8]) -> AppResult<String> {
        let extension =
            Path::new(file_name).extension().and_then(|e| e.to_str()).unwrap_or("bin");
        let stored_name = format!("{}.{extension}", Uuid::new_v4());

        let dir = self.root.join(container);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&stored_name), data).await?;

        Ok(format!("{MEDIA_URL_PREFIX}/{container}/{stored_name}"))
    }

    async fn edit(
        &self,
        old_reference: Option<&str>,
        container: &str,
        file_name: &str,
        data: &[u8],
    ) -> AppResult<String> {
        if let Some(old) = old_reference {
            self.delete(old, container).await?;
        }
        self.store(container, file_name, data).await
    }

    async fn delete(&self, reference: &str, _container: &str) -> AppResult<()> {
        let Some(path) = self.disk_path(reference) else {
            tracing::warn!(reference, "ignoring malformed file reference");
            return Ok(());
        };
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_root() -> PathBuf {
        std::env::temp_dir().join(format!("kinoteka-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn store_edit_delete_round_trip() {
        let root = scratch_root();
        let storage = LocalFileStorage::new(&root);

        let reference = storage.store("actors", "face.jpg", b"old").await.unwrap();
        assert!(reference.starts_with("/media/actors/"));
        assert!(reference.ends_with(".jpg"));

        let replaced =
            storage.edit(Some(&reference), "actors", "face.png", b"new").await.unwrap();
        assert_ne!(replaced, reference);
        let on_disk = storage.disk_path(&replaced).unwrap();
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"new");
        // The old blob is gone.
        assert!(!storage.disk_path(&reference).unwrap().exists());

        storage.delete(&replaced, "actors").await.unwrap();
        assert!(!on_disk.exists());
        // Deleting twice is fine.
        storage.delete(&replaced, "actors").await.unwrap();

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[test]
    fn traversal_references_are_rejected() {
        let storage = LocalFileStorage::new("media");
        assert!(storage.disk_path("/media/../etc/passwd").is_none());
        assert!(storage.disk_path("not-a-reference").is_none());
    }
}
