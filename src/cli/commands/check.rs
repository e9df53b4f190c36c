//! `check` subcommand: validate everything a build needs without building.

use crate::bundler::{
    Error, ModuleRef, Settings,
    audit::{ImportAudit, audit_entry_script},
    invocation::validate_inputs,
    tool_detection::{DEFAULT_PYTHON, module_importable, resolve_tool, tool_version},
};
use crate::cli::RuntimeConfig;
use crate::error::Result;
use std::path::Path;

/// Checks profile inputs, tool availability and the entry script's imports.
///
/// `python` is `None` unless import verification was requested; the inner
/// option overrides interpreter discovery. Returns exit code 1 when any
/// problem would make a build fail.
pub async fn execute(
    settings: Settings,
    python: Option<Option<&Path>>,
    config: &RuntimeConfig,
) -> Result<i32> {
    let mut problems = Vec::new();

    for profile in settings.profiles() {
        if let Err(e) = validate_inputs(&settings, profile).await {
            problems.push(format!("[{}] {}", profile.name(), e));
        }
    }

    let version = match resolve_tool(settings.tool()) {
        Ok(program) => {
            config.verbose_println(&format!("tool: {}", program.display()))?;
            match tool_version(&program, settings.tool()).await {
                Ok(version) => version,
                Err(e) => {
                    problems.push(e.to_string());
                    None
                }
            }
        }
        Err(e) => {
            problems.push(e.to_string());
            None
        }
    };

    let declared = declared_modules(&settings);

    let audit = match audit_entry_script(&settings.entry_script_path(), &declared).await {
        Ok(audit) => Some(audit),
        Err(e) => {
            log::debug!("Skipping import audit: {}", e);
            None
        }
    };

    if let Some(python) = python {
        match python.map(Path::to_path_buf).or_else(|| DEFAULT_PYTHON.clone()) {
            Some(interpreter) => {
                problems.extend(unresolved_modules(&interpreter, &declared).await);
            }
            None => problems.push("no Python interpreter found for --verify-imports".into()),
        }
    }

    if config.json() {
        let report = serde_json::json!({
            "ok": problems.is_empty(),
            "tool": settings.tool().display_name(),
            "tool_version": version,
            "problems": problems,
            "undeclared_imports": audit.as_ref().map(|a| a.undeclared.clone()).unwrap_or_default(),
            "unused_imports": audit.as_ref().map(|a| a.unused.clone()).unwrap_or_default(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&settings, version.as_deref(), audit.as_ref(), &problems, config)?;
    }

    Ok(if problems.is_empty() { 0 } else { 1 })
}

/// Union of every profile's forced-include modules, in first-seen order.
fn declared_modules(settings: &Settings) -> Vec<ModuleRef> {
    let mut declared: Vec<ModuleRef> = Vec::new();
    for module in settings.profiles().iter().flat_map(|p| p.modules()) {
        if !declared.contains(module) {
            declared.push(module.clone());
        }
    }
    declared
}

async fn unresolved_modules(python: &Path, modules: &[ModuleRef]) -> Vec<String> {
    let mut problems = Vec::new();
    for module in modules {
        match module_importable(python, module).await {
            Ok(true) => log::debug!("{} resolves", module),
            Ok(false) => problems.push(Error::UnresolvedModule(module.to_string()).to_string()),
            Err(e) => {
                problems.push(e.to_string());
                // Interpreter itself is unusable
                break;
            }
        }
    }
    problems
}

fn print_report(
    settings: &Settings,
    version: Option<&str>,
    audit: Option<&ImportAudit>,
    problems: &[String],
    config: &RuntimeConfig,
) -> std::io::Result<()> {
    config.section(&format!("Workspace {}", settings.workspace().display()))?;
    config.indent(&format!(
        "tool    {} {}",
        settings.tool().display_name(),
        version.unwrap_or("(version unknown)")
    ))?;
    config.indent(&format!("entry   {}", settings.entry_script().display()))?;
    config.indent(&format!("profiles {}", settings.profiles().len()))?;

    if let Some(audit) = audit {
        for module in &audit.undeclared {
            config.warn(&format!(
                "`{}` is imported but not in hidden_imports",
                module
            ))?;
        }
        for module in &audit.unused {
            config.warn(&format!(
                "hidden import `{}` is never imported by the entry script",
                module
            ))?;
        }
    }

    for problem in problems {
        config.output().error(problem)?;
    }

    if problems.is_empty() {
        config.success("Ready to build")?;
    }

    Ok(())
}
