//! Bundle manifest (`bundle.toml`) loading.
//!
//! The manifest declares the entry script, the data files to embed, the
//! versioned forced-include module set and the build profiles. A workspace
//! without a manifest gets the built-in StarCitizenMonitor definition.

use crate::bundler::{
    BuildProfile, BundleMode, DataEntry, HiddenImports, MANIFEST_VERSION, ModuleRef,
    SettingsBuilder,
};
use crate::error::{BundlerError, CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Conventional manifest file name at the workspace root.
pub const MANIFEST_FILE: &str = "bundle.toml";

/// Parsed bundle manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleManifest {
    /// Entry-point script, relative to the workspace.
    pub entry_script: PathBuf,

    /// Intermediate build directory name.
    #[serde(default)]
    pub build_dir: Option<PathBuf>,

    /// Distribution output directory name.
    #[serde(default)]
    pub dist_dir: Option<PathBuf>,

    /// Files embedded by every profile.
    #[serde(default)]
    pub data: Vec<DataEntry>,

    /// Modules the packaging tool cannot discover statically.
    #[serde(default)]
    pub hidden_imports: HiddenImportsSection,

    /// Build profiles in declaration order.
    #[serde(rename = "profile")]
    pub profiles: Vec<ProfileSection>,
}

/// `[hidden_imports]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HiddenImportsSection {
    /// Manifest format version.
    pub version: u32,
    /// Dotted module identifiers.
    #[serde(default)]
    pub modules: Vec<ModuleRef>,
}

impl Default for HiddenImportsSection {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            modules: Vec::new(),
        }
    }
}

/// One `[[profile]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileSection {
    /// Profile name used on the command line.
    pub name: String,
    /// Artifact base name.
    pub output_name: String,
    /// Icon path, relative to the workspace.
    pub icon: PathBuf,
    /// Show a console window.
    #[serde(default)]
    pub console: bool,
    /// Enable full debug instrumentation.
    #[serde(default)]
    pub debug: bool,
    /// Artifact shape.
    #[serde(default)]
    pub mode: BundleMode,
    /// Profile-specific forced-include modules.
    #[serde(default)]
    pub hidden_imports: Vec<ModuleRef>,
    /// Profile-specific data files.
    #[serde(default)]
    pub data: Vec<DataEntry>,
}

impl From<ProfileSection> for BuildProfile {
    fn from(section: ProfileSection) -> Self {
        BuildProfile::new(section.name, section.output_name, section.icon)
            .console(section.console)
            .debug(section.debug)
            .mode(section.mode)
            .hidden_imports(section.hidden_imports)
            .data(section.data)
    }
}

impl BundleManifest {
    /// The built-in StarCitizenMonitor definition.
    ///
    /// Both profiles are windowed and embed the JSON configuration and the
    /// window icon at the bundle root, where the application looks them up at
    /// runtime. The GUI toolkit widgets, the HTTP client and the HTML parser
    /// are loaded lazily by the application and must be forced in.
    pub fn starcitizen_monitor() -> Self {
        let modules = [
            "tkinter",
            "tkinter.ttk",
            "tkinter.scrolledtext",
            "tkinter.messagebox",
            "tkinter.filedialog",
            "requests",
            "lxml",
            "lxml.html",
        ]
        .into_iter()
        .filter_map(|m| ModuleRef::parse(m).ok())
        .collect();

        let profile = |name: &str, output: &str, icon: &str, debug: bool| ProfileSection {
            name: name.into(),
            output_name: output.into(),
            icon: icon.into(),
            console: false,
            debug,
            mode: BundleMode::OneFile,
            hidden_imports: Vec::new(),
            data: Vec::new(),
        };

        Self {
            entry_script: "sc_monitor.py".into(),
            build_dir: None,
            dist_dir: None,
            data: vec![
                DataEntry::at_root("sc_monitor_config.json"),
                DataEntry::at_root("logoStar.ico"),
            ],
            hidden_imports: HiddenImportsSection {
                version: MANIFEST_VERSION,
                modules,
            },
            profiles: vec![
                profile("release", "StarCitizenMonitor", "logoStar.ico", false),
                profile("debug", "StarCitizenMonitor_Debug", "icon.ico", true),
            ],
        }
    }

    /// Parses manifest text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(text)?;

        if manifest.profiles.is_empty() {
            return Err(BundlerError::Cli(CliError::InvalidArguments {
                reason: format!("{} declares no [[profile]] entries", MANIFEST_FILE),
            }));
        }

        Ok(manifest)
    }

    /// Loads the manifest for `workspace`.
    ///
    /// An explicit path must exist. Otherwise `bundle.toml` at the workspace
    /// root is used when present, falling back to the built-in definition.
    pub fn load(workspace: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    workspace.join(path)
                };
                if !path.is_file() {
                    return Err(BundlerError::Cli(CliError::InvalidArguments {
                        reason: format!("Manifest not found: {}", path.display()),
                    }));
                }
                path
            }
            None => {
                let path = workspace.join(MANIFEST_FILE);
                if !path.is_file() {
                    log::debug!(
                        "No {} in {}; using built-in StarCitizenMonitor manifest",
                        MANIFEST_FILE,
                        workspace.display()
                    );
                    return Ok(Self::starcitizen_monitor());
                }
                path
            }
        };

        log::info!("Loading manifest {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|e| {
            BundlerError::Cli(CliError::ExecutionFailed {
                command: "read_manifest".to_string(),
                reason: format!("Failed to read {}: {}", path.display(), e),
            })
        })?;
        Self::from_toml(&text)
    }

    /// Turns the manifest into a settings builder rooted at `workspace`.
    ///
    /// Validates the forced-include manifest version and duplicates here;
    /// profile-level checks happen in [`SettingsBuilder::build`].
    pub fn into_settings_builder(self, workspace: &Path) -> Result<SettingsBuilder> {
        let hidden_imports =
            HiddenImports::new(self.hidden_imports.version, self.hidden_imports.modules)?;

        let mut builder = SettingsBuilder::new()
            .workspace(workspace)
            .entry_script(&self.entry_script)
            .data(self.data)
            .hidden_imports(hidden_imports)
            .profiles(self.profiles.into_iter().map(BuildProfile::from).collect());

        if let Some(dir) = &self.build_dir {
            builder = builder.build_dir(dir);
        }
        if let Some(dir) = &self.dist_dir {
            builder = builder.dist_dir(dir);
        }

        Ok(builder)
    }
}
