//! Import audit of the entry script.
//!
//! Compares the modules the entry script imports against the forced-include
//! set. Third-party packages imported but not declared are worth a look
//! (the packaging tool may miss them if they load plugins lazily); declared
//! modules the script never mentions may be stale.
//!
//! This is a line-based scan, not a parser: it sees `import a, b as c` and
//! `from a.b import c` statements at any indentation and ignores relative
//! imports.

use crate::bundler::{
    ModuleRef,
    error::{ErrorExt, Result},
};
use regex::Regex;
use std::{collections::BTreeSet, path::Path, sync::LazyLock};

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*import\s+(.+)$").expect("import pattern is a valid regex")
});

static FROM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*from\s+([A-Za-z_][\w.]*)\s+import\b").expect("from pattern is a valid regex")
});

/// Standard-library top-level modules the packaging tool always resolves.
const STDLIB_MODULES: &[&str] = &[
    "abc", "argparse", "array", "ast", "asyncio", "atexit", "base64", "bisect", "calendar",
    "codecs", "collections", "concurrent", "configparser", "contextlib", "copy", "csv",
    "ctypes", "dataclasses", "datetime", "decimal", "email", "enum", "functools", "gc",
    "getpass", "glob", "hashlib", "heapq", "html", "http", "importlib", "inspect", "io",
    "itertools", "json", "locale", "logging", "math", "msvcrt", "operator", "os", "pathlib",
    "pickle", "platform", "pprint", "queue", "random", "re", "secrets", "select", "shutil",
    "signal", "socket", "sqlite3", "ssl", "statistics", "string", "struct", "subprocess", "sys",
    "tempfile", "textwrap", "threading", "time", "tkinter", "traceback", "typing",
    "unicodedata", "urllib", "uuid", "warnings", "weakref", "webbrowser", "winreg", "xml",
    "zipfile",
];

/// Outcome of comparing script imports with the forced-include set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportAudit {
    /// Every module named by an import statement.
    pub imported: BTreeSet<String>,
    /// Third-party imports not covered by any forced-include module.
    pub undeclared: Vec<String>,
    /// Forced-include modules whose package the script never imports.
    pub unused: Vec<String>,
}

impl ImportAudit {
    /// True when nothing needs attention.
    pub fn is_clean(&self) -> bool {
        self.undeclared.is_empty() && self.unused.is_empty()
    }
}

/// Reads `script` and audits it against `declared`.
pub async fn audit_entry_script(script: &Path, declared: &[ModuleRef]) -> Result<ImportAudit> {
    let source = tokio::fs::read_to_string(script)
        .await
        .fs_context("reading entry script", script)?;
    Ok(audit_source(&source, declared))
}

/// Audits script source text against `declared`.
pub fn audit_source(source: &str, declared: &[ModuleRef]) -> ImportAudit {
    let imported = imported_modules(source);

    let undeclared = imported
        .iter()
        .filter(|module| {
            let root = module.split('.').next().unwrap_or(module.as_str());
            !STDLIB_MODULES.contains(&root)
        })
        .filter(|module| {
            !declared
                .iter()
                .any(|d| d.covers(module) || module_covers(module, d.as_str()))
        })
        .cloned()
        .collect();

    let unused = declared
        .iter()
        .filter(|d| {
            !imported
                .iter()
                .any(|m| m.split('.').next() == Some(d.root()))
        })
        .map(ToString::to_string)
        .collect();

    ImportAudit {
        imported,
        undeclared,
        unused,
    }
}

/// True if `parent` is `child` or one of its packages.
fn module_covers(parent: &str, child: &str) -> bool {
    child == parent
        || child
            .strip_prefix(parent)
            .is_some_and(|rest| rest.starts_with('.'))
}

fn imported_modules(source: &str) -> BTreeSet<String> {
    let mut modules = BTreeSet::new();

    for line in source.lines() {
        let line = line.split('#').next().unwrap_or_default();

        if let Some(caps) = FROM_LINE.captures(line) {
            modules.insert(caps[1].trim_end_matches('.').to_string());
        } else if let Some(caps) = IMPORT_LINE.captures(line) {
            for item in caps[1].split(',') {
                let name = item.split_whitespace().next().unwrap_or_default();
                let name = name.trim_end_matches(';');
                if ModuleRef::parse(name).is_ok() {
                    modules.insert(name.to_string());
                }
            }
        }
    }

    modules
}
