//! Workspace cleaning before a build.
//!
//! Removes the intermediate build directory, the distribution directory and
//! every generated `*.spec` file at the workspace root. Absence of any of them
//! is success. A genuine filesystem error (a locked file, missing permissions)
//! aborts the sequence so the builder never runs against an unknown state.
//! There is no partial-delete recovery.

use crate::bundler::{Result, Settings, utils::fs};
use std::path::{Path, PathBuf};

/// What a clean pass removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    /// Paths that existed and were deleted, in removal order.
    pub removed: Vec<PathBuf>,
}

impl CleanReport {
    /// True if the workspace was already clean.
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Cleans the workspace described by `settings`.
pub async fn clean(settings: &Settings) -> Result<CleanReport> {
    clean_workspace(
        settings.workspace(),
        &settings.build_dir(),
        &settings.dist_dir(),
    )
    .await
}

/// Cleans an explicit workspace layout.
pub async fn clean_workspace(
    workspace: &Path,
    build_dir: &Path,
    dist_dir: &Path,
) -> Result<CleanReport> {
    let mut report = CleanReport::default();

    for dir in [build_dir, dist_dir] {
        if fs::remove_dir_all(dir).await? {
            log::debug!("Removed {}", dir.display());
            report.removed.push(dir.to_path_buf());
        }
    }

    for spec in stale_spec_files(workspace)? {
        if fs::remove_file(&spec).await? {
            log::debug!("Removed {}", spec.display());
            report.removed.push(spec);
        }
    }

    log::info!(
        "Workspace cleaned ({} item(s) removed): {}",
        report.removed.len(),
        workspace.display()
    );

    Ok(report)
}

/// Lists generated spec files at the workspace root, sorted.
fn stale_spec_files(workspace: &Path) -> Result<Vec<PathBuf>> {
    let pattern = glob::Pattern::escape(&workspace.display().to_string());
    let pattern = Path::new(&pattern).join("*.spec");

    let mut specs: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(path),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Skipping unreadable spec candidate: {}", e);
                None
            }
        })
        .collect();
    specs.sort();
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_with_sources() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("sc_monitor.py"), "print('monitor')").unwrap();
        std::fs::write(tmp.path().join("sc_monitor_config.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("logoStar.ico"), [0u8, 0, 1, 0]).unwrap();
        tmp
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    async fn run(ws: &Path) -> CleanReport {
        clean_workspace(ws, &ws.join("build"), &ws.join("dist"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn removes_build_dir_and_stale_spec() {
        let tmp = workspace_with_sources();
        let ws = tmp.path();
        std::fs::create_dir_all(ws.join("build/StarCitizenMonitor")).unwrap();
        std::fs::write(ws.join("build/StarCitizenMonitor/warn.txt"), "x").unwrap();
        std::fs::write(ws.join("OldTool.spec"), "# spec").unwrap();

        let report = run(ws).await;

        assert_eq!(report.removed.len(), 2);
        assert_eq!(
            listing(ws),
            ["logoStar.ico", "sc_monitor.py", "sc_monitor_config.json"]
        );
    }

    #[tokio::test]
    async fn clean_workspace_is_success() {
        let tmp = workspace_with_sources();
        let report = run(tmp.path()).await;
        assert!(report.is_noop());
    }

    #[tokio::test]
    async fn second_pass_leaves_identical_state() {
        let tmp = workspace_with_sources();
        let ws = tmp.path();
        std::fs::create_dir_all(ws.join("dist")).unwrap();
        std::fs::write(ws.join("dist/StarCitizenMonitor"), "bin").unwrap();
        std::fs::write(ws.join("StarCitizenMonitor.spec"), "# spec").unwrap();

        run(ws).await;
        let after_first = listing(ws);
        let second = run(ws).await;

        assert!(second.is_noop());
        assert_eq!(listing(ws), after_first);
    }

    #[tokio::test]
    async fn spec_directories_and_nested_specs_are_left_alone() {
        let tmp = workspace_with_sources();
        let ws = tmp.path();
        std::fs::create_dir_all(ws.join("vendor")).unwrap();
        std::fs::write(ws.join("vendor/keep.spec"), "# nested").unwrap();
        std::fs::create_dir_all(ws.join("weird.spec")).unwrap();

        let report = run(ws).await;

        assert!(report.is_noop());
        assert!(ws.join("vendor/keep.spec").exists());
        assert!(ws.join("weird.spec").is_dir());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn permission_error_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = workspace_with_sources();
        let ws = tmp.path();
        let dist = ws.join("dist");
        std::fs::create_dir_all(&dist).unwrap();
        std::fs::write(dist.join("StarCitizenMonitor"), "bin").unwrap();
        std::fs::set_permissions(&dist, std::fs::Permissions::from_mode(0o500)).unwrap();

        // root ignores directory permissions; nothing to assert there
        let marker = dist.join(".writable");
        if std::fs::write(&marker, "x").is_ok() {
            std::fs::remove_file(&marker).unwrap();
            std::fs::set_permissions(&dist, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = clean_workspace(ws, &ws.join("build"), &dist).await;
        std::fs::set_permissions(&dist, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(
            result,
            Err(crate::bundler::Error::Cleanup { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_in_place_of_output_dir_is_fatal() {
        let tmp = workspace_with_sources();
        let ws = tmp.path();
        std::fs::write(ws.join("dist"), "not a directory").unwrap();
        std::fs::write(ws.join("OldTool.spec"), "# old").unwrap();

        let result = clean_workspace(ws, &ws.join("build"), &ws.join("dist")).await;

        assert!(matches!(
            result,
            Err(crate::bundler::Error::Cleanup { ref path, .. }) if path.ends_with("dist")
        ));
        // Nothing after the failing step runs
        assert!(ws.join("OldTool.spec").exists());
    }
}
