//! File store implementations
//!
//! The core only ever keeps the returned URL reference; swapping in a
//! cloud bucket later only means another `FileStore` implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use crate::domain::{DomainError, DomainResult, FileStore};

/// Stores uploads on the local filesystem under a configured root and
/// serves them from a configured public base URL.
pub struct LocalFileStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> DomainResult<String> {
        // Uploads land strictly below the root
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(|seg| seg == "..") {
            return Err(DomainError::Validation(format!(
                "Invalid upload path: {}",
                path
            )));
        }

        let target = self.root.join(relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Upstream(format!("File store: {}", e)))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| DomainError::Upstream(format!("File store: {}", e)))?;

        debug!("Stored {} bytes at {}", bytes.len(), target.display());
        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            relative
        ))
    }
}

/// Keeps uploads in memory; used by service-level tests.
#[derive(Default)]
pub struct InMemoryFileStore {
    files: DashMap<String, Vec<u8>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> DomainResult<String> {
        self.files.insert(path.to_string(), bytes.to_vec());
        Ok(format!("mem://{}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_store_writes_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path(), "http://localhost:8080/files");

        let url = store
            .upload("signatures/r-1/handover.png", b"png-bytes")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8080/files/signatures/r-1/handover.png");
        let written = std::fs::read(dir.path().join("signatures/r-1/handover.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn local_store_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path(), "http://localhost:8080/files");

        let err = store.upload("../outside.png", b"x").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = InMemoryFileStore::new();
        let url = store.upload("licenses/c-1.png", b"img").await.unwrap();
        assert_eq!(url, "mem://licenses/c-1.png");
        assert!(store.contains("licenses/c-1.png"));
    }
}
