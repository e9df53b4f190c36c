//! Build profiles and data-embedding entries.

use super::ModuleRef;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Separator the packaging tool expects between source and destination in
/// `--add-data` (it follows the host's `PATH` separator).
pub const DATA_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Shape of the produced artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleMode {
    /// One self-contained executable (`--onefile`).
    #[default]
    OneFile,
    /// A directory holding the executable and its dependencies (`--onedir`).
    OneDir,
}

impl BundleMode {
    /// Command-line flag selecting this mode.
    pub fn flag(self) -> &'static str {
        match self {
            BundleMode::OneFile => "--onefile",
            BundleMode::OneDir => "--onedir",
        }
    }
}

/// A non-code file embedded into the bundle and extracted at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataEntry {
    /// File on disk, relative to the workspace.
    pub source: PathBuf,
    /// Location inside the bundle; `.` is the bundle root.
    #[serde(default = "bundle_root")]
    pub destination: PathBuf,
}

fn bundle_root() -> PathBuf {
    PathBuf::from(".")
}

impl DataEntry {
    /// Entry mapping `source` to `destination` inside the bundle.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Entry mapping `source` to the bundle root.
    pub fn at_root(source: impl Into<PathBuf>) -> Self {
        Self::new(source, bundle_root())
    }

    /// `--add-data` value with the source resolved against `workspace`.
    pub fn tool_arg(&self, workspace: &Path) -> String {
        format!(
            "{}{}{}",
            workspace.join(&self.source).display(),
            DATA_SEPARATOR,
            self.destination.display()
        )
    }
}

/// One parameterized build configuration.
///
/// Release and debug differ only in data: name, icon, console visibility and
/// debug instrumentation. The shared data entries and forced-include modules
/// are merged in when [`SettingsBuilder`](super::SettingsBuilder) builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildProfile {
    name: String,
    output_name: String,
    icon: PathBuf,
    console: bool,
    debug: bool,
    mode: BundleMode,
    hidden_imports: Vec<ModuleRef>,
    data: Vec<DataEntry>,
}

impl BuildProfile {
    /// Windowed, non-debug, one-file profile.
    pub fn new(
        name: impl Into<String>,
        output_name: impl Into<String>,
        icon: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            output_name: output_name.into(),
            icon: icon.into(),
            console: false,
            debug: false,
            mode: BundleMode::OneFile,
            hidden_imports: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Show a console window when the artifact runs.
    pub fn console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Enable full debug instrumentation in the bootloader.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the artifact shape.
    pub fn mode(mut self, mode: BundleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Modules to force-include for this profile only.
    pub fn hidden_imports(mut self, modules: Vec<ModuleRef>) -> Self {
        self.hidden_imports = modules;
        self
    }

    /// Data files to embed for this profile only.
    pub fn data(mut self, data: Vec<DataEntry>) -> Self {
        self.data = data;
        self
    }

    /// Profile name (`release`, `debug`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base name of the produced artifact.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Icon path relative to the workspace.
    pub fn icon(&self) -> &Path {
        &self.icon
    }

    /// Whether the artifact opens a console window.
    pub fn is_console(&self) -> bool {
        self.console
    }

    /// Whether debug instrumentation is enabled.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Artifact shape.
    pub fn bundle_mode(&self) -> BundleMode {
        self.mode
    }

    /// Forced-include modules (shared set first once settings are built).
    pub fn modules(&self) -> &[ModuleRef] {
        &self.hidden_imports
    }

    /// Data-embedding entries (shared entries first once settings are built).
    pub fn data_entries(&self) -> &[DataEntry] {
        &self.data
    }

    /// Replaces modules and data with the merged definition-time sets.
    pub(super) fn with_merged(mut self, modules: Vec<ModuleRef>, data: Vec<DataEntry>) -> Self {
        self.hidden_imports = modules;
        self.data = data;
        self
    }
}
