//! Clean-and-bundle build orchestration for StarCitizenMonitor
//!
//! This library provides the two pipeline steps behind the CLI:
//! - the workspace cleaner (`build/`, `dist/`, stale `*.spec` files)
//! - the bundle builder driving PyInstaller once per build profile
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod manifest;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
