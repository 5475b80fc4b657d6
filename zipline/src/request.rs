//! Validation of incoming archive requests against the storage directory.
//!
//! An archive key arrives as a single URL path segment. It is accepted only if
//! it names a direct child directory of the configured storage directory:
//! traversal components and separators are rejected outright, and the resolved
//! path must exist and be a directory. Validation happens before any archiver
//! process is launched, so a rejected request leaks nothing.

use std::path::{Path, PathBuf};

use crate::error::{ArchiveError, Result};

/// A validated archive download request.
///
/// Holds the archive key and the storage directory it was resolved against.
/// Construction goes through [`ArchiveRequest::resolve`]; an instance existing
/// means the key points at a real directory under the storage root.
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    key: String,
    storage_dir: PathBuf,
}

impl ArchiveRequest {
    /// Resolve `key` under `storage_dir`.
    ///
    /// Fails with [`ArchiveError::NotFound`] when the key contains traversal
    /// components or does not name an existing directory. A key naming a plain
    /// file is rejected the same way.
    pub async fn resolve(storage_dir: &Path, key: &str) -> Result<Self> {
        if !is_safe_key(key) {
            log::warn!("Rejected unsafe archive key {:?}", key);
            return Err(ArchiveError::not_found(key));
        }

        match tokio::fs::metadata(storage_dir.join(key)).await {
            Ok(metadata) if metadata.is_dir() => Ok(Self {
                key: key.to_string(),
                storage_dir: storage_dir.to_path_buf(),
            }),
            _ => Err(ArchiveError::not_found(key)),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// File name the client should save the download as.
    pub fn attachment_name(&self) -> String {
        format!("{}.zip", self.key)
    }
}

/// A key is safe when it can only name a direct child of the storage
/// directory.
fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains('/')
        && !key.contains('\\')
        && !key.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_key_rejects_traversal() {
        assert!(is_safe_key("vacation"));
        assert!(is_safe_key("photos-2024"));
        assert!(!is_safe_key(""));
        assert!(!is_safe_key("."));
        assert!(!is_safe_key(".."));
        assert!(!is_safe_key("../etc"));
        assert!(!is_safe_key("a/b"));
        assert!(!is_safe_key("a\\b"));
    }

    #[tokio::test]
    async fn test_resolve_existing_directory() {
        let storage = tempfile::tempdir().unwrap();
        std::fs::create_dir(storage.path().join("vacation")).unwrap();

        let request = ArchiveRequest::resolve(storage.path(), "vacation")
            .await
            .unwrap();
        assert_eq!(request.key(), "vacation");
        assert_eq!(request.storage_dir(), storage.path());
        assert_eq!(request.attachment_name(), "vacation.zip");
    }

    #[tokio::test]
    async fn test_resolve_missing_directory() {
        let storage = tempfile::tempdir().unwrap();

        let result = ArchiveRequest::resolve(storage.path(), "missing").await;
        assert!(matches!(result, Err(ArchiveError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_rejects_plain_file() {
        let storage = tempfile::tempdir().unwrap();
        std::fs::write(storage.path().join("notes.txt"), "hello").unwrap();

        let result = ArchiveRequest::resolve(storage.path(), "notes.txt").await;
        assert!(matches!(result, Err(ArchiveError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal_key() {
        let storage = tempfile::tempdir().unwrap();

        let result = ArchiveRequest::resolve(storage.path(), "../..").await;
        assert!(matches!(result, Err(ArchiveError::NotFound(_))));
    }
}
