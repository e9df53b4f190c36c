//! Error types for cleaning and bundling operations.
//!
//! Every failure in the clean → build sequence is fatal. Nothing here is
//! retried; variants carry enough context (paths, tool names, exit codes) for
//! the CLI to surface the failing step's diagnostic verbatim.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of input a build depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The entry-point script handed to the packaging tool.
    EntryScript,
    /// The icon attached to the produced executable.
    Icon,
    /// A file embedded into the bundle.
    DataFile,
}

impl Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InputKind::EntryScript => "entry script",
            InputKind::Icon => "icon",
            InputKind::DataFile => "data file",
        };
        f.write_str(label)
    }
}

/// Errors raised by the cleaner, the builder and settings validation.
#[derive(Debug, Error)]
pub enum Error {
    /// Removing a stale build artifact failed for a reason other than absence.
    #[error("failed to remove {path}: {source}")]
    Cleanup {
        /// Path that could not be removed.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// A required build input is absent.
    #[error("missing {kind}: {path}")]
    MissingInput {
        /// What the input is used for.
        kind: InputKind,
        /// Expected location.
        path: PathBuf,
    },

    /// The packaging tool could not be located.
    #[error("packaging tool `{0}` not found (install PyInstaller or pass --tool)")]
    ToolNotFound(String),

    /// The packaging tool ran and reported failure.
    #[error("`{tool}` exited with {}", exit_status(.code))]
    ToolFailed {
        /// Program that was run.
        tool: String,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
    },

    /// Spawning a command failed.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command name.
        command: String,
        /// Spawn error.
        #[source]
        error: io::Error,
    },

    /// The tool reported success but the expected artifact is absent.
    #[error("packaging finished but no artifact was produced at {0}")]
    ArtifactMissing(PathBuf),

    /// The build state machine was driven out of order.
    #[error("invalid build state transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: &'static str,
        /// Requested state.
        to: &'static str,
    },

    /// A profile definition is malformed or unknown.
    #[error("invalid profile `{name}`: {reason}")]
    InvalidProfile {
        /// Profile name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A build or distribution directory would let the cleaner delete
    /// something other than build output.
    #[error("invalid {role} directory `{}`: {reason}", .path.display())]
    InvalidOutputDir {
        /// `build` or `dist`.
        role: &'static str,
        /// Directory as configured.
        path: PathBuf,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Two profiles would write the same artifact.
    #[error("profiles `{first}` and `{second}` both produce `{output_name}`")]
    DuplicateOutputName {
        /// Shared output name.
        output_name: String,
        /// First profile using it.
        first: String,
        /// Second profile using it.
        second: String,
    },

    /// A forced-include module identifier is malformed.
    #[error("invalid module reference `{module}`: {reason}")]
    InvalidModule {
        /// Offending identifier.
        module: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A forced-include module is not importable in the build environment.
    #[error("module `{0}` is not importable in the build environment")]
    UnresolvedModule(String),

    /// The manifest declares a version this crate does not understand.
    #[error("unsupported manifest version {found} (expected {expected})")]
    UnsupportedManifestVersion {
        /// Version found in the manifest.
        found: u32,
        /// Version supported by this build.
        expected: u32,
    },

    /// Another bundler process owns the workspace.
    #[error("workspace is locked by another bundler process ({0})")]
    WorkspaceLocked(PathBuf),

    /// Filesystem operation failed with context.
    #[error("{context} {path}: {error}")]
    Fs {
        /// What was being done.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        error: io::Error,
    },

    /// IO error without path context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Glob pattern error.
    #[error("{0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Directory traversal error.
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Catch-all error with a message.
    #[error("{0}")]
    GenericError(String),
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "a signal".to_string(),
    }
}

/// Adds filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Attach what was being done and the path involved.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Converts options and foreign errors into bundler errors with a message.
pub trait Context<T> {
    /// Attach a message describing the failed operation.
    fn context<C: Display + Send + Sync + 'static>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display + Send + Sync + 'static>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display + Send + Sync + 'static>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Return early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failed_message_includes_status() {
        let err = Error::ToolFailed {
            tool: "pyinstaller".into(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "`pyinstaller` exited with status 2");

        let err = Error::ToolFailed {
            tool: "pyinstaller".into(),
            code: None,
        };
        assert_eq!(err.to_string(), "`pyinstaller` exited with a signal");
    }

    #[test]
    fn fs_context_keeps_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = res.fs_context("removing", "/tmp/build").unwrap_err();
        assert_eq!(err.to_string(), "removing /tmp/build: denied");
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let value: Option<u8> = None;
        let err = value.context("entry script is required").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "entry script is required"));
    }
}
