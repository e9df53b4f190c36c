//! Command line interface for the StarCitizenMonitor bundler.
//!
//! This module parses arguments, turns the manifest plus overrides into
//! [`Settings`], and dispatches to one command per subcommand.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{Settings, ToolCommand};
use crate::error::{CliError, Result};
use crate::manifest::BundleManifest;
use path_absolutize::Absolutize;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    execute(Args::parse_args()).await
}

/// Runs already-parsed arguments and returns the process exit code
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    let settings = load_settings(&args)?;

    match &args.command {
        Command::Clean => commands::clean::execute(settings, &config).await,
        Command::Build { profiles } => {
            let names: Vec<&str> = profiles.iter().map(String::as_str).collect();
            commands::build::execute(settings, &names, &config).await
        }
        Command::All => {
            let names: Vec<String> = settings
                .profiles()
                .iter()
                .map(|p| p.name().to_string())
                .collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            commands::build::execute(settings, &names, &config).await
        }
        Command::Check {
            verify_imports,
            python,
        } => {
            let python = verify_imports.then_some(python.as_deref());
            commands::check::execute(settings, python, &config).await
        }
        Command::Profiles => commands::profiles::execute(&settings, &config),
    }
}

/// Resolves the workspace, loads its manifest and applies tool overrides.
pub fn load_settings(args: &Args) -> Result<Settings> {
    let workspace = args
        .workspace
        .absolutize()
        .map_err(|e| CliError::InvalidArguments {
            reason: format!("Invalid workspace {}: {}", args.workspace.display(), e),
        })?
        .into_owned();

    if !workspace.is_dir() {
        return Err(CliError::InvalidArguments {
            reason: format!("Workspace is not a directory: {}", workspace.display()),
        }
        .into());
    }

    let manifest = BundleManifest::load(&workspace, args.manifest.as_deref())?;

    let tool = match &args.tool {
        Some(program) => ToolCommand::new(program),
        None => ToolCommand::default(),
    }
    .with_args(&args.tool_args);

    Ok(manifest
        .into_settings_builder(&workspace)?
        .tool(tool)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn settings_come_from_builtin_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = tmp.path().to_str().unwrap();
        let args = Args::try_parse_from([
            "sc_monitor_bundler",
            "--workspace",
            ws,
            "--tool",
            "python3",
            "--tool-arg",
            "-m",
            "--tool-arg",
            "PyInstaller",
            "profiles",
        ])
        .unwrap();

        let settings = load_settings(&args).unwrap();

        assert_eq!(settings.workspace(), tmp.path());
        assert_eq!(settings.tool().program(), std::path::Path::new("python3"));
        assert_eq!(settings.tool().leading_args(), ["-m", "PyInstaller"]);
        assert_eq!(settings.profiles().len(), 2);
    }

    #[test]
    fn missing_workspace_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let args = Args::try_parse_from([
            "sc_monitor_bundler",
            "--workspace",
            missing.to_str().unwrap(),
            "clean",
        ])
        .unwrap();

        assert!(load_settings(&args).is_err());
    }
}
