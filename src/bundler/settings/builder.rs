//! Builder for constructing Settings.

use super::{BuildProfile, DataEntry, HiddenImports, Settings, ToolCommand};
use crate::bundler::error::{Context, Error, Result};
use path_absolutize::Absolutize;
use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// All definition-time validation happens in [`SettingsBuilder::build`]:
/// profile names and artifact names must be unique, and the shared
/// forced-include set is merged into every profile.
///
/// # Examples
///
/// ```no_run
/// use sc_monitor_bundler::bundler::{BuildProfile, DataEntry, HiddenImports, SettingsBuilder};
///
/// # fn example() -> sc_monitor_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .workspace(".")
///     .entry_script("sc_monitor.py")
///     .data(vec![DataEntry::at_root("sc_monitor_config.json")])
///     .hidden_imports(HiddenImports::from_names(["tkinter", "requests"])?)
///     .profile(BuildProfile::new("release", "StarCitizenMonitor", "logoStar.ico"))
///     .profile(BuildProfile::new("debug", "StarCitizenMonitor_Debug", "icon.ico").debug(true))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    workspace: Option<PathBuf>,
    entry_script: Option<PathBuf>,
    tool: Option<ToolCommand>,
    build_dir: Option<PathBuf>,
    dist_dir: Option<PathBuf>,
    data: Vec<DataEntry>,
    hidden_imports: HiddenImports,
    profiles: Vec<BuildProfile>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the workspace root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn workspace<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.workspace = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the entry-point script, relative to the workspace.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn entry_script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the packaging tool.
    ///
    /// Default: `pyinstaller`
    pub fn tool(mut self, tool: ToolCommand) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Sets the intermediate build directory name.
    ///
    /// Default: `build`
    pub fn build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the distribution output directory name.
    ///
    /// Default: `dist`
    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets data entries embedded by every profile.
    pub fn data(mut self, data: Vec<DataEntry>) -> Self {
        self.data = data;
        self
    }

    /// Sets the forced-include manifest shared by every profile.
    pub fn hidden_imports(mut self, manifest: HiddenImports) -> Self {
        self.hidden_imports = manifest;
        self
    }

    /// Appends a profile.
    pub fn profile(mut self, profile: BuildProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Replaces all profiles.
    pub fn profiles(mut self, profiles: Vec<BuildProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - `workspace` or `entry_script` missing
    /// - no profiles, an empty or repeated profile name
    /// - an output name that is empty, contains a path separator, or is
    ///   shared by two profiles
    /// - a build or dist directory that is empty, absolute, contains `..` or
    ///   names the workspace itself
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let workspace = self.workspace.context("workspace is required")?;
        let workspace = workspace
            .absolutize()
            .map_err(|e| Error::Fs {
                context: "resolving workspace",
                path: workspace.clone(),
                error: e,
            })?
            .into_owned();
        let entry_script = self.entry_script.context("entry_script is required")?;

        if self.profiles.is_empty() {
            return Err(Error::GenericError(
                "at least one build profile is required".into(),
            ));
        }

        let mut names = HashSet::new();
        let mut outputs: HashMap<&str, &str> = HashMap::new();
        for profile in &self.profiles {
            validate_profile(profile)?;

            if !names.insert(profile.name()) {
                return Err(Error::InvalidProfile {
                    name: profile.name().to_string(),
                    reason: "defined more than once".into(),
                });
            }

            if let Some(first) = outputs.insert(profile.output_name(), profile.name()) {
                return Err(Error::DuplicateOutputName {
                    output_name: profile.output_name().to_string(),
                    first: first.to_string(),
                    second: profile.name().to_string(),
                });
            }
        }

        let profiles = self
            .profiles
            .iter()
            .cloned()
            .map(|profile| {
                let modules = self.hidden_imports.merged_with(profile.modules());
                let data = self
                    .data
                    .iter()
                    .chain(profile.data_entries())
                    .cloned()
                    .collect();
                profile.with_merged(modules, data)
            })
            .collect();

        let build_dir = self.build_dir.unwrap_or_else(|| PathBuf::from("build"));
        let dist_dir = self.dist_dir.unwrap_or_else(|| PathBuf::from("dist"));
        validate_output_dir("build", &build_dir)?;
        validate_output_dir("dist", &dist_dir)?;

        Ok(Settings::new(
            workspace,
            entry_script,
            self.tool.unwrap_or_default(),
            build_dir,
            dist_dir,
            profiles,
        ))
    }
}

/// The cleaner removes these directories wholesale, so each must name a
/// subdirectory strictly inside the workspace.
fn validate_output_dir(role: &'static str, dir: &Path) -> Result<()> {
    let invalid = |reason| Error::InvalidOutputDir {
        role,
        path: dir.to_path_buf(),
        reason,
    };

    if dir.as_os_str().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if dir.has_root() || dir.is_absolute() {
        return Err(invalid("must be relative to the workspace"));
    }

    let mut named = 0;
    for component in dir.components() {
        match component {
            Component::Normal(_) => named += 1,
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("must not contain `..`")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("must be relative to the workspace"));
            }
        }
    }
    if named == 0 {
        return Err(invalid("must not be the workspace itself"));
    }

    Ok(())
}

fn validate_profile(profile: &BuildProfile) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidProfile {
        name: profile.name().to_string(),
        reason: reason.to_string(),
    };

    if profile.name().trim().is_empty() {
        return Err(invalid("name is empty"));
    }

    let output = profile.output_name();
    if output.trim().is_empty() {
        return Err(invalid("output name is empty"));
    }
    if output.contains(['/', '\\']) || output == "." || output == ".." {
        return Err(invalid("output name must be a plain file name"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::ModuleRef;

    fn base() -> SettingsBuilder {
        SettingsBuilder::new()
            .workspace("ws")
            .entry_script("sc_monitor.py")
    }

    #[test]
    fn requires_workspace_and_entry_script() {
        let err = SettingsBuilder::new()
            .entry_script("sc_monitor.py")
            .profile(BuildProfile::new("release", "App", "a.ico"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("workspace is required"));

        let err = SettingsBuilder::new()
            .workspace("ws")
            .profile(BuildProfile::new("release", "App", "a.ico"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("entry_script is required"));
    }

    #[test]
    fn requires_at_least_one_profile() {
        assert!(base().build().is_err());
    }

    #[test]
    fn rejects_shared_output_name() {
        let err = base()
            .profile(BuildProfile::new("release", "StarCitizenMonitor", "a.ico"))
            .profile(BuildProfile::new("debug", "StarCitizenMonitor", "b.ico"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateOutputName { ref first, ref second, .. }
                if first == "release" && second == "debug"
        ));
    }

    #[test]
    fn rejects_repeated_profile_name() {
        let err = base()
            .profile(BuildProfile::new("release", "A", "a.ico"))
            .profile(BuildProfile::new("release", "B", "a.ico"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidProfile { .. }));
    }

    #[test]
    fn rejects_output_name_with_separator() {
        let err = base()
            .profile(BuildProfile::new("release", "../escape", "a.ico"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidProfile { .. }));
    }

    #[test]
    fn merges_shared_modules_and_data_into_profiles() {
        let settings = base()
            .data(vec![DataEntry::at_root("sc_monitor_config.json")])
            .hidden_imports(HiddenImports::from_names(["tkinter", "requests"]).unwrap())
            .profile(
                BuildProfile::new("release", "A", "a.ico")
                    .hidden_imports(vec![ModuleRef::parse("requests").unwrap()])
                    .data(vec![DataEntry::at_root("logoStar.ico")]),
            )
            .build()
            .unwrap();

        let profile = settings.profile("release").unwrap();
        let modules: Vec<_> = profile.modules().iter().map(ModuleRef::as_str).collect();
        assert_eq!(modules, ["tkinter", "requests"]);
        assert_eq!(
            profile.data_entries(),
            [
                DataEntry::at_root("sc_monitor_config.json"),
                DataEntry::at_root("logoStar.ico")
            ]
        );
    }

    #[test]
    fn defaults_directories_and_absolutizes_workspace() {
        let settings = base()
            .profile(BuildProfile::new("release", "A", "a.ico"))
            .build()
            .unwrap();
        assert!(settings.workspace().is_absolute());
        assert!(settings.build_dir().ends_with("ws/build"));
        assert!(settings.dist_dir().ends_with("ws/dist"));
        assert_eq!(settings.tool().display_name(), "pyinstaller");
    }

    #[test]
    fn unknown_profile_lists_available() {
        let settings = base()
            .profile(BuildProfile::new("release", "A", "a.ico"))
            .build()
            .unwrap();
        let err = settings.profile("nightly").unwrap_err();
        assert!(err.to_string().contains("available: release"));
    }

    #[test]
    fn output_dirs_must_stay_inside_workspace() {
        let absolute = std::env::temp_dir();
        let cases: [&Path; 6] = [
            Path::new(""),
            Path::new("."),
            Path::new("./"),
            Path::new(".."),
            Path::new("out/../.."),
            &absolute,
        ];

        for dir in cases {
            for builder in [base().build_dir(dir), base().dist_dir(dir)] {
                let err = builder
                    .profile(BuildProfile::new("release", "A", "a.ico"))
                    .build()
                    .unwrap_err();
                assert!(
                    matches!(err, Error::InvalidOutputDir { .. }),
                    "{dir:?} accepted: {err}"
                );
            }
        }
    }

    #[test]
    fn nested_output_dirs_are_accepted() {
        let settings = base()
            .build_dir("./out/build")
            .dist_dir("out/dist")
            .profile(BuildProfile::new("release", "A", "a.ico"))
            .build()
            .unwrap();
        assert!(settings.build_dir().ends_with("ws/out/build"));
        assert!(settings.dist_dir().ends_with("ws/out/dist"));
    }
}
