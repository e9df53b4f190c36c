//! Core Settings struct and implementations.

use super::{BuildProfile, BundleMode, ToolCommand};
use crate::bundler::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Prefix of the advisory workspace lock file in the temp directory.
const LOCK_FILE_PREFIX: &str = "sc_monitor_bundler";

/// Explicit configuration for one clean → build sequence.
///
/// Replaces ambient state (current directory, tool on `PATH`) so the cleaner
/// and the builder can run against an injected workspace. Constructed via
/// [`SettingsBuilder`](super::SettingsBuilder); immutable afterwards.
///
/// # Examples
///
/// ```no_run
/// use sc_monitor_bundler::bundler::{BuildProfile, SettingsBuilder};
///
/// # fn example() -> sc_monitor_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .workspace(".")
///     .entry_script("sc_monitor.py")
///     .profile(BuildProfile::new("release", "StarCitizenMonitor", "logoStar.ico"))
///     .build()?;
/// assert_eq!(settings.profiles().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Absolute workspace root.
    workspace: PathBuf,

    /// Entry-point script, relative to the workspace.
    entry_script: PathBuf,

    /// Packaging tool and its leading arguments.
    tool: ToolCommand,

    /// Intermediate build directory name (`build`).
    build_dir: PathBuf,

    /// Distribution output directory name (`dist`).
    dist_dir: PathBuf,

    /// Profiles in declaration order.
    profiles: Vec<BuildProfile>,
}

impl Settings {
    /// Returns the workspace root.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Returns the entry script path as configured.
    pub fn entry_script(&self) -> &Path {
        &self.entry_script
    }

    /// Returns the entry script resolved against the workspace.
    pub fn entry_script_path(&self) -> PathBuf {
        self.workspace.join(&self.entry_script)
    }

    /// Returns the packaging tool.
    pub fn tool(&self) -> &ToolCommand {
        &self.tool
    }

    /// Returns the intermediate build directory.
    pub fn build_dir(&self) -> PathBuf {
        self.workspace.join(&self.build_dir)
    }

    /// Returns the distribution output directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.workspace.join(&self.dist_dir)
    }

    /// Returns the workspace lock file path.
    ///
    /// The lock lives in the temp directory, keyed by the workspace path, so
    /// the workspace itself only ever holds source assets and build outputs.
    pub fn lock_path(&self) -> PathBuf {
        let digest = Sha256::digest(self.workspace.to_string_lossy().as_bytes());
        let key = format!("{:x}", digest);
        std::env::temp_dir().join(format!("{}-{}.lock", LOCK_FILE_PREFIX, &key[..16]))
    }

    /// Returns every profile in declaration order.
    pub fn profiles(&self) -> &[BuildProfile] {
        &self.profiles
    }

    /// Looks a profile up by name.
    pub fn profile(&self, name: &str) -> Result<&BuildProfile> {
        self.profiles
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| Error::InvalidProfile {
                name: name.to_string(),
                reason: format!(
                    "not defined (available: {})",
                    self.profiles
                        .iter()
                        .map(BuildProfile::name)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }

    /// Returns the path the profile's artifact is written to.
    ///
    /// One-file builds on Windows gain an `.exe` suffix appended to the full
    /// output name (`App.v2` becomes `App.v2.exe`); one-dir builds
    /// produce a directory named after the profile's output name.
    pub fn artifact_path(&self, profile: &BuildProfile) -> PathBuf {
        self.dist_dir().join(artifact_file_name(
            profile,
            cfg!(target_os = "windows"),
        ))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        workspace: PathBuf,
        entry_script: PathBuf,
        tool: ToolCommand,
        build_dir: PathBuf,
        dist_dir: PathBuf,
        profiles: Vec<BuildProfile>,
    ) -> Self {
        Self {
            workspace,
            entry_script,
            tool,
            build_dir,
            dist_dir,
            profiles,
        }
    }
}

fn artifact_file_name(profile: &BuildProfile, windows: bool) -> String {
    if windows && profile.bundle_mode() == BundleMode::OneFile {
        format!("{}.exe", profile.output_name())
    } else {
        profile.output_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exe_suffix_keeps_dotted_output_name() {
        let profile = BuildProfile::new("release", "StarCitizenMonitor.v2", "logoStar.ico");
        assert_eq!(artifact_file_name(&profile, true), "StarCitizenMonitor.v2.exe");
        assert_eq!(artifact_file_name(&profile, false), "StarCitizenMonitor.v2");
    }

    #[test]
    fn one_dir_bundles_never_gain_exe_suffix() {
        let profile = BuildProfile::new("release", "StarCitizenMonitor", "logoStar.ico")
            .mode(BundleMode::OneDir);
        assert_eq!(artifact_file_name(&profile, true), "StarCitizenMonitor");
    }
}
