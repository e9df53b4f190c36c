//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that drives the cleaner
//! and the packaging tool through the [`BuildState`] machine.

use crate::bundler::{
    BuildProfile, BundleMode, BundledArtifact, CleanReport, Result, Settings, cleaner,
    error::{Error, ErrorExt},
    lock::WorkspaceLock,
    utils::fs,
};
use std::path::Path;

use super::{
    checksum::calculate_sha256,
    invocation::{run_tool, tool_arguments, validate_inputs},
    state::BuildState,
    tool_detection::resolve_tool,
};

/// Main bundler orchestrator.
///
/// One `Bundler` is one clean → build invocation. The workspace lock is held
/// for each public operation, and building is refused unless the workspace
/// was cleaned first by this same bundler.
///
/// # Examples
///
/// ```no_run
/// use sc_monitor_bundler::bundler::{Bundler, Settings};
///
/// # async fn example(settings: Settings) -> sc_monitor_bundler::bundler::Result<()> {
/// let mut bundler = Bundler::new(settings);
/// let artifacts = bundler.bundle(&["release"]).await?;
///
/// for artifact in artifacts {
///     println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
///     println!("SHA256: {}", artifact.checksum);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    state: BuildState,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: BuildState::Idle,
        }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns where this invocation currently is.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Runs the cleaner only.
    pub async fn clean(&mut self) -> Result<CleanReport> {
        let _lock = self.lock()?;
        self.clean_locked().await
    }

    /// Builds the named profiles against an already-cleaned workspace.
    ///
    /// Fails with [`Error::InvalidTransition`] if [`Bundler::clean`] has not
    /// succeeded first.
    pub async fn build(&mut self, profiles: &[&str]) -> Result<Vec<BundledArtifact>> {
        let profiles = self.resolve_profiles(profiles)?;
        let _lock = self.lock()?;
        self.build_locked(&profiles).await
    }

    /// Cleans the workspace once, then builds each named profile in order.
    ///
    /// Later profiles never remove earlier artifacts; output names are unique
    /// per profile.
    pub async fn bundle(&mut self, profiles: &[&str]) -> Result<Vec<BundledArtifact>> {
        let profiles = self.resolve_profiles(profiles)?;
        let _lock = self.lock()?;
        self.clean_locked().await?;
        self.build_locked(&profiles).await
    }

    fn lock(&self) -> Result<WorkspaceLock> {
        WorkspaceLock::acquire(&self.settings.lock_path())
    }

    fn resolve_profiles(&self, names: &[&str]) -> Result<Vec<BuildProfile>> {
        if names.is_empty() {
            return Err(Error::GenericError("no profiles requested".into()));
        }
        names
            .iter()
            .map(|name| self.settings.profile(name).cloned())
            .collect()
    }

    async fn clean_locked(&mut self) -> Result<CleanReport> {
        self.state.advance(BuildState::Cleaning)?;

        match cleaner::clean(&self.settings).await {
            Ok(report) => {
                self.state.advance(BuildState::Cleaned)?;
                Ok(report)
            }
            Err(e) => {
                self.state.advance(BuildState::CleanFailed)?;
                Err(e)
            }
        }
    }

    async fn build_locked(&mut self, profiles: &[BuildProfile]) -> Result<Vec<BundledArtifact>> {
        self.state.advance(BuildState::Building)?;

        match self.build_all(profiles).await {
            Ok(artifacts) => {
                self.state.advance(BuildState::Built)?;
                Ok(artifacts)
            }
            Err(e) => {
                self.state.advance(BuildState::BuildFailed)?;
                Err(e)
            }
        }
    }

    async fn build_all(&self, profiles: &[BuildProfile]) -> Result<Vec<BundledArtifact>> {
        // Every input is checked before anything runs
        for profile in profiles {
            validate_inputs(&self.settings, profile).await?;
        }

        let program = resolve_tool(self.settings.tool())?;

        let mut artifacts = Vec::with_capacity(profiles.len());
        for profile in profiles {
            artifacts.push(self.build_profile(profile, &program).await?);
        }
        Ok(artifacts)
    }

    async fn build_profile(&self, profile: &BuildProfile, program: &Path) -> Result<BundledArtifact> {
        log::info!(
            "Building profile '{}' -> {}",
            profile.name(),
            profile.output_name()
        );

        let artifact_path = self.settings.artifact_path(profile);
        let args = tool_arguments(&self.settings, profile);

        if let Err(e) = run_tool(program, &args, self.settings.workspace()).await {
            discard_partial_artifact(&artifact_path).await;
            return Err(e);
        }

        let metadata = match tokio::fs::metadata(&artifact_path).await {
            Ok(metadata) => metadata,
            Err(_) => return Err(Error::ArtifactMissing(artifact_path)),
        };

        let size = match profile.bundle_mode() {
            BundleMode::OneFile if metadata.is_file() => metadata.len(),
            BundleMode::OneDir if metadata.is_dir() => directory_size(&artifact_path)?,
            _ => {
                discard_partial_artifact(&artifact_path).await;
                return Err(Error::ArtifactMissing(artifact_path));
            }
        };

        let checksum = calculate_sha256(&artifact_path).await?;

        log::info!(
            "✓ Created {} ({} bytes, sha256 {})",
            artifact_path.display(),
            size,
            checksum
        );

        Ok(BundledArtifact {
            profile: profile.name().to_string(),
            path: artifact_path,
            size,
            checksum,
            built_at: chrono::Utc::now(),
        })
    }
}

/// Removes whatever a failed tool run left at the artifact path.
async fn discard_partial_artifact(path: &Path) {
    match fs::remove_path(path).await {
        Ok(true) => log::warn!("Removed partial artifact {}", path.display()),
        Ok(false) => {}
        Err(e) => log::error!("Could not remove partial artifact: {}", e),
    }
}

fn directory_size(path: &Path) -> Result<u64> {
    let mut total = 0;
    for entry in walkdir::WalkDir::new(path).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry
                .metadata()
                .map_err(std::io::Error::from)
                .fs_context("reading artifact metadata", entry.path())?
                .len();
        }
    }
    Ok(total)
}
