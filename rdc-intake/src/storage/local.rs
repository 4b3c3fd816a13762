//! Local filesystem storage (development mode)

use super::ImageStore;
use async_trait::async_trait;
use rdc_common::{Error, Result};
use std::path::PathBuf;

/// Writes image bytes under a local upload root; the same root is served
/// statically at `/api/images` in development
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ImageStore for LocalStore {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<()> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Storage(format!("create {}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::Storage(format!("write {}: {}", path.display(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_bytes_at_the_key_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store
            .put("p1/skin1/skin1-123.png", b"pixels", "image/png")
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("p1/skin1/skin1-123.png")).unwrap();
        assert_eq!(written, b"pixels");
    }

    #[tokio::test]
    async fn put_overwrites_an_existing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store.put("p1/hair1/a.png", b"one", "image/png").await.unwrap();
        store.put("p1/hair1/a.png", b"two", "image/png").await.unwrap();

        let written = std::fs::read(dir.path().join("p1/hair1/a.png")).unwrap();
        assert_eq!(written, b"two");
    }
}
