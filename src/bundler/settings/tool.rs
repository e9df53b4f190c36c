//! Packaging tool invocation target.

use std::ffi::OsString;
use std::path::PathBuf;

/// Program used to package the entry script, plus leading arguments.
///
/// `pyinstaller` on its own, or `python -m PyInstaller` for an interpreter
/// that has the tool installed as a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Default for ToolCommand {
    fn default() -> Self {
        Self::new("pyinstaller")
    }
}

impl ToolCommand {
    /// Tool run as `program` with no leading arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds leading arguments placed before the generated ones.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program to spawn.
    pub fn program(&self) -> &std::path::Path {
        &self.program
    }

    /// Leading arguments.
    pub fn leading_args(&self) -> &[OsString] {
        &self.args
    }

    /// Short label for diagnostics.
    pub fn display_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}
