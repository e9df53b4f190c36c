//! File system utilities for cleaning and bundling.
//!
//! Removal helpers treat a missing target as success so the cleaner stays
//! idempotent; every other failure keeps its path for the diagnostic.

use crate::bundler::error::{Error, Result};
use std::{io, path::Path};
use tokio::fs;

/// Removes the directory and its contents if it exists.
///
/// Returns `true` if something was removed.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false), // Idempotent
        Err(e) => Err(Error::Cleanup {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Removes a single file if it exists.
///
/// Returns `true` if something was removed.
pub async fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Cleanup {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Removes whatever sits at `path`, file or directory.
///
/// Symlinks are removed, never followed.
pub async fn remove_path(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => remove_dir_all(path).await,
        Ok(_) => remove_file(path).await,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Cleanup {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// True if `path` exists and is a regular file.
pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removal_of_missing_targets_is_success() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!remove_dir_all(&tmp.path().join("build")).await.unwrap());
        assert!(!remove_file(&tmp.path().join("old.spec")).await.unwrap());
        assert!(!remove_path(&tmp.path().join("dist")).await.unwrap());
    }

    #[tokio::test]
    async fn remove_path_handles_files_and_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("dist");
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("nested/app"), b"bin").unwrap();
        let file = tmp.path().join("App.spec");
        std::fs::write(&file, b"spec").unwrap();

        assert!(remove_path(&dir).await.unwrap());
        assert!(remove_path(&file).await.unwrap());
        assert!(!dir.exists());
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn is_file_rejects_directories() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!is_file(tmp.path()).await);
        let file = tmp.path().join("sc_monitor.py");
        std::fs::write(&file, b"print('hi')").unwrap();
        assert!(is_file(&file).await);
    }
}
