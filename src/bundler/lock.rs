//! Advisory workspace lock.
//!
//! One bundler process owns a workspace for the whole clean → build sequence.
//! A second process fails fast with [`Error::WorkspaceLocked`] instead of
//! racing on `build/` and `dist/`. The lock is released when the guard drops.
//! Non-unix hosts get a guard that locks nothing.

#[cfg_attr(not(unix), allow(unused_imports))]
use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Held for as long as the workspace is owned.
pub struct WorkspaceLock {
    path: PathBuf,
    #[cfg(unix)]
    _file: nix::fcntl::Flock<std::fs::File>,
}

impl std::fmt::Debug for WorkspaceLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceLock")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl WorkspaceLock {
    /// Takes the lock at `path` without blocking.
    #[cfg(unix)]
    pub fn acquire(path: &Path) -> Result<Self> {
        use nix::errno::Errno;
        use nix::fcntl::{Flock, FlockArg};

        let file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .fs_context("opening workspace lock", path)?;

        match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
            Ok(file) => {
                log::debug!("Acquired workspace lock {}", path.display());
                Ok(Self {
                    path: path.to_path_buf(),
                    _file: file,
                })
            }
            Err((_, Errno::EWOULDBLOCK)) => Err(Error::WorkspaceLocked(path.to_path_buf())),
            Err((_, errno)) => Err(Error::Fs {
                context: "locking workspace",
                path: path.to_path_buf(),
                error: std::io::Error::from(errno),
            }),
        }
    }

    /// Takes the lock at `path` without blocking.
    #[cfg(not(unix))]
    pub fn acquire(path: &Path) -> Result<Self> {
        log::debug!("Workspace locking unavailable on this platform");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Lock file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
