//! Packaging tool command line and execution.

use crate::bundler::{
    BuildProfile, Settings,
    error::{Error, InputKind, Result},
    utils::fs,
};
use std::{ffi::OsString, path::Path, process::Stdio};

/// Checks that every input of `profile` exists.
///
/// Runs before the tool so a missing input never leaves a partial artifact.
pub async fn validate_inputs(settings: &Settings, profile: &BuildProfile) -> Result<()> {
    let entry = settings.entry_script_path();
    if !fs::is_file(&entry).await {
        return Err(Error::MissingInput {
            kind: InputKind::EntryScript,
            path: entry,
        });
    }

    let icon = settings.workspace().join(profile.icon());
    if !fs::is_file(&icon).await {
        return Err(Error::MissingInput {
            kind: InputKind::Icon,
            path: icon,
        });
    }

    for entry in profile.data_entries() {
        let source = settings.workspace().join(&entry.source);
        if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
            return Err(Error::MissingInput {
                kind: InputKind::DataFile,
                path: source,
            });
        }
    }

    Ok(())
}

/// Assembles the full argument list for one profile.
///
/// The tool always runs with `--noconfirm` (overwrite the previous artifact
/// without prompting) and `--clean` (drop cached intermediate state), so a
/// build is reproducible given identical inputs.
pub fn tool_arguments(settings: &Settings, profile: &BuildProfile) -> Vec<OsString> {
    let workspace = settings.workspace();
    let mut args: Vec<OsString> = settings.tool().leading_args().to_vec();

    args.push(settings.entry_script_path().into_os_string());
    args.push("--noconfirm".into());
    args.push("--clean".into());
    args.push(profile.bundle_mode().flag().into());
    args.push(if profile.is_console() { "--console" } else { "--windowed" }.into());

    args.push("--name".into());
    args.push(profile.output_name().into());

    args.push("--icon".into());
    args.push(workspace.join(profile.icon()).into_os_string());

    for entry in profile.data_entries() {
        args.push("--add-data".into());
        args.push(entry.tool_arg(workspace).into());
    }

    for module in profile.modules() {
        args.push("--hidden-import".into());
        args.push(module.as_str().into());
    }

    if profile.is_debug() {
        args.push("--debug".into());
        args.push("all".into());
    }

    args.push("--distpath".into());
    args.push(settings.dist_dir().into_os_string());
    args.push("--workpath".into());
    args.push(settings.build_dir().into_os_string());
    args.push("--specpath".into());
    args.push(settings.build_dir().into_os_string());

    args
}

/// Runs the packaging tool from the workspace.
///
/// The tool's stdout is forwarded to our stderr and its stderr is inherited,
/// so diagnostics reach the console verbatim while our stdout stays free for
/// machine-readable output.
pub async fn run_tool(program: &Path, args: &[OsString], workspace: &Path) -> Result<()> {
    let tool = program.display().to_string();
    log::info!("Running {} ({} argument(s))", tool, args.len());
    log::debug!("{} {:?}", tool, args);

    let status = tokio::process::Command::new(program)
        .args(args)
        .current_dir(workspace)
        .stdin(Stdio::null())
        .stdout(Stdio::from(std::io::stderr()))
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: tool.clone(),
            error: e,
        })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            tool,
            code: status.code(),
        });
    }

    Ok(())
}
