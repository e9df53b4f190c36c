//! Artifact checksum calculation.
//!
//! SHA-256 over a one-file executable, or over a whole one-dir bundle tree.

use crate::{bail, bundler::Result, bundler::error::ErrorExt};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 checksum of an artifact.
///
/// Returns the hex-encoded digest (64 characters). A one-dir artifact is
/// hashed as a tree.
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;

    if metadata.is_file() {
        calculate_file_sha256(path).await
    } else if metadata.is_dir() {
        calculate_directory_sha256(path).await
    } else {
        bail!("Path is neither file nor directory: {}", path.display())
    }
}

/// Hashes a single file in 8KB chunks.
async fn calculate_file_sha256(file_path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening artifact for hashing", file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading artifact for hashing", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Hashes a one-dir bundle tree.
///
/// Files are visited in sorted path order and each contributes its relative
/// path followed by its content, so the digest is stable across runs.
async fn calculate_directory_sha256(dir_path: &Path) -> Result<String> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            entries.push(entry);
        }
    }

    // Sort by path for deterministic ordering
    entries.sort_by_key(|e| e.path().to_path_buf());

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    for entry in entries {
        if let Ok(rel_path) = entry.path().strip_prefix(dir_path) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }

        let mut file = tokio::fs::File::open(entry.path())
            .await
            .fs_context("opening file for hashing", entry.path())?;

        loop {
            let n = file
                .read(&mut buffer)
                .await
                .fs_context("reading file for hash calculation", entry.path())?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_digest_is_hex_sha256() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("StarCitizenMonitor");
        std::fs::write(&path, b"bundle").unwrap();

        let digest = calculate_sha256(&path).await.unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, format!("{:x}", Sha256::digest(b"bundle")));
    }

    #[tokio::test]
    async fn directory_digest_depends_on_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        for dir in [&a, &b] {
            std::fs::create_dir_all(dir.join("_internal")).unwrap();
            std::fs::write(dir.join("StarCitizenMonitor"), b"exe").unwrap();
        }
        std::fs::write(a.join("_internal/base_library.zip"), b"zip").unwrap();
        std::fs::write(b.join("_internal/other.zip"), b"zip").unwrap();

        let first = calculate_sha256(&a).await.unwrap();
        assert_eq!(first, calculate_sha256(&a).await.unwrap());
        assert_ne!(first, calculate_sha256(&b).await.unwrap());
    }

    #[tokio::test]
    async fn missing_artifact_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(calculate_sha256(&tmp.path().join("nope")).await.is_err());
    }
}
