//! External tool detection and availability checking.
//!
//! Locates the packaging tool before a build starts and, for preflight checks,
//! a Python interpreter able to import the forced-include modules.

use crate::bundler::{
    ModuleRef, ToolCommand,
    error::{Error, Result},
};
use path_absolutize::Absolutize;
use std::{
    path::{Path, PathBuf},
    process::Stdio,
    sync::LazyLock,
};

/// First Python interpreter found on `PATH`.
///
/// Cached result to avoid repeated lookups during a check.
pub static DEFAULT_PYTHON: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    ["python3", "python"]
        .into_iter()
        .find_map(|name| match which::which(name) {
            Ok(path) => {
                log::debug!("Found {} at: {}", name, path.display());
                Some(path)
            }
            Err(e) => {
                log::debug!("{} not found in PATH: {}", name, e);
                None
            }
        })
});

/// Resolves the tool program to an executable path.
///
/// Bare names are looked up on `PATH`; anything with a directory component is
/// taken relative to the current directory and must exist. The result is
/// always absolute because the tool later runs from the workspace.
pub fn resolve_tool(tool: &ToolCommand) -> Result<PathBuf> {
    resolve_program(tool.program()).ok_or_else(|| Error::ToolNotFound(tool.display_name()))
}

fn resolve_program(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        let program = program.absolutize().ok()?;
        return program.is_file().then(|| program.into_owned());
    }

    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program.display(), path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", program.display(), e);
            None
        }
    }
}

/// Asks the tool for its version.
///
/// Returns `None` when the tool runs but the probe fails; the build itself
/// will surface the real diagnostic.
pub async fn tool_version(program: &Path, tool: &ToolCommand) -> Result<Option<String>> {
    let output = tokio::process::Command::new(program)
        .args(tool.leading_args())
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: tool.display_name(),
            error: e,
        })?;

    if output.status.success() {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        log::info!("✓ {} available: {}", tool.display_name(), version);
        Ok(Some(version))
    } else {
        log::warn!(
            "{} --version check failed (exit code: {:?}). Stderr: {}",
            tool.display_name(),
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
        Ok(None)
    }
}

/// Checks that `module` can be found by `python` without importing it.
pub async fn module_importable(python: &Path, module: &ModuleRef) -> Result<bool> {
    let probe = format!(
        "import importlib.util, sys; sys.exit(0 if importlib.util.find_spec({:?}) else 1)",
        module.as_str()
    );

    let status = tokio::process::Command::new(python)
        .args(["-c", &probe])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: python.display().to_string(),
            error: e,
        })?;

    Ok(status.success())
}
