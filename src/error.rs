//! Top-level error types for the command line.
//!
//! [`BundlerError`] wraps pipeline failures ([`crate::bundler::Error`]) along
//! with argument, manifest and output errors so `main` has one type to report.

use thiserror::Error;

/// Result type alias for command-line operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all command-line operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Clean or build pipeline errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error;

        match self {
            BundlerError::Bundler(Error::Cleanup { .. }) => vec![
                "Close any running StarCitizenMonitor instance that may hold files in dist/".into(),
                "Check permissions on build/ and dist/".into(),
            ],
            BundlerError::Bundler(Error::MissingInput { .. }) => vec![
                "Run the bundler from the directory containing sc_monitor.py, or pass --workspace"
                    .into(),
            ],
            BundlerError::Bundler(Error::ToolNotFound(_)) => vec![
                "Install PyInstaller: pip install pyinstaller".into(),
                "Or point at it explicitly: --tool python --tool-arg -m --tool-arg PyInstaller"
                    .into(),
            ],
            BundlerError::Bundler(Error::WorkspaceLocked(_)) => {
                vec!["Wait for the other bundler process to finish".into()]
            }
            BundlerError::Bundler(Error::InvalidOutputDir { .. }) => {
                vec!["Use a subdirectory name such as \"build\" or \"dist\" in bundle.toml".into()]
            }
            BundlerError::Toml(_) => vec!["Check bundle.toml against the documented layout".into()],
            _ => Vec::new(),
        }
    }
}
