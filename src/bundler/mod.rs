//! Clean-and-bundle pipeline for the StarCitizenMonitor desktop application.
//!
//! The pipeline has two strictly sequential steps:
//!
//! 1. the [`cleaner`] removes `build/`, `dist/` and stale `*.spec` files;
//! 2. the [`Bundler`] runs the packaging tool (PyInstaller) once per
//!    [`BuildProfile`], producing one self-contained executable each.
//!
//! # Example
//!
//! ```no_run
//! use sc_monitor_bundler::bundler::{BuildProfile, Bundler, DataEntry, HiddenImports, SettingsBuilder};
//!
//! # async fn example() -> sc_monitor_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .workspace(".")
//!     .entry_script("sc_monitor.py")
//!     .data(vec![DataEntry::at_root("sc_monitor_config.json")])
//!     .hidden_imports(HiddenImports::from_names(["tkinter", "requests", "lxml.html"])?)
//!     .profile(BuildProfile::new("release", "StarCitizenMonitor", "logoStar.ico"))
//!     .build()?;
//!
//! let artifacts = Bundler::new(settings).bundle(&["release"]).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod audit;
mod builder;
pub mod cleaner;
mod error;
mod lock;
mod settings;
mod utils;

// Public re-exports
pub use builder::{BuildState, Bundler, checksum, invocation, tool_detection};
pub use cleaner::CleanReport;
pub use error::{Context, Error, ErrorExt, InputKind, Result};
pub use lock::WorkspaceLock;
pub use settings::{
    BuildProfile, BundleMode, DATA_SEPARATOR, DataEntry, HiddenImports,
    MANIFEST_VERSION, ModuleRef, Settings, SettingsBuilder, ToolCommand,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// A produced artifact with the metadata needed to publish it.
///
/// # Fields
///
/// - `profile`: the build profile that produced it
/// - `path`: the executable (or one-dir bundle) under `dist/`
/// - `size`: total size in bytes
/// - `checksum`: SHA-256 for integrity verification
/// - `built_at`: completion time
#[derive(Debug, Clone, Serialize)]
pub struct BundledArtifact {
    /// Profile name.
    pub profile: String,

    /// Artifact location.
    pub path: PathBuf,

    /// Total size in bytes.
    pub size: u64,

    /// Hex-encoded SHA-256 of the artifact.
    pub checksum: String,

    /// When the artifact was verified.
    pub built_at: DateTime<Utc>,
}
