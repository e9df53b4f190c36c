//! `build` and `all` subcommands.

use crate::bundler::{Bundler, Settings};
use crate::cli::RuntimeConfig;
use crate::error::Result;

/// Cleans the workspace once, then builds `profiles` in order.
///
/// Prints one line per artifact, or the artifact list as JSON.
pub async fn execute(settings: Settings, profiles: &[&str], config: &RuntimeConfig) -> Result<i32> {
    config.section(&format!(
        "Bundling {} ({})",
        settings.entry_script().display(),
        profiles.join(", ")
    ))?;
    config.verbose_println(&format!("tool: {}", settings.tool().display_name()))?;

    let mut bundler = Bundler::new(settings);
    let artifacts = bundler.bundle(profiles).await?;

    if config.json() {
        println!("{}", serde_json::to_string_pretty(&artifacts)?);
        return Ok(0);
    }

    for artifact in &artifacts {
        config.success(&format!(
            "[{}] {} ({} bytes)",
            artifact.profile,
            artifact.path.display(),
            artifact.size
        ))?;
        config.indent(&format!("sha256 {}", artifact.checksum))?;
    }

    Ok(0)
}
