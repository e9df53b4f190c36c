//! `clean` subcommand.

use crate::bundler::{Bundler, Settings};
use crate::cli::RuntimeConfig;
use crate::error::Result;

/// Removes `build/`, `dist/` and stale `*.spec` files from the workspace.
pub async fn execute(settings: Settings, config: &RuntimeConfig) -> Result<i32> {
    config.progress(&format!("Cleaning {}", settings.workspace().display()))?;

    let mut bundler = Bundler::new(settings);
    let report = bundler.clean().await?;

    if config.json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "removed": report.removed }))?
        );
        return Ok(0);
    }

    for path in &report.removed {
        config.verbose_println(&format!("removed {}", path.display()))?;
    }

    if report.is_noop() {
        config.success("Workspace already clean")?;
    } else {
        config.success(&format!(
            "Workspace clean ({} path(s) removed)",
            report.removed.len()
        ))?;
    }

    Ok(0)
}
