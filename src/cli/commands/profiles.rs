//! `profiles` subcommand.

use crate::bundler::Settings;
use crate::cli::RuntimeConfig;
use crate::error::Result;

/// Lists the profiles the manifest defines.
pub fn execute(settings: &Settings, config: &RuntimeConfig) -> Result<i32> {
    if config.json() {
        let profiles: Vec<_> = settings
            .profiles()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name(),
                    "output_name": p.output_name(),
                    "artifact": settings.artifact_path(p),
                    "icon": p.icon(),
                    "mode": p.bundle_mode(),
                    "console": p.is_console(),
                    "debug": p.is_debug(),
                    "hidden_imports": p.modules().iter().map(|m| m.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(0);
    }

    for profile in settings.profiles() {
        config.section(profile.name())?;
        config.indent(&format!(
            "output  {}",
            settings.artifact_path(profile).display()
        ))?;
        config.indent(&format!("icon    {}", profile.icon().display()))?;
        config.indent(&format!(
            "mode    {}{}{}",
            profile.bundle_mode().flag(),
            if profile.is_console() { " --console" } else { " --windowed" },
            if profile.is_debug() { " --debug all" } else { "" }
        ))?;
        config.indent(&format!("imports {}", profile.modules().len()))?;
    }

    Ok(0)
}
