//! Forced-include module references and their versioned manifest.
//!
//! The application loads several modules lazily (GUI toolkit widgets, the HTTP
//! client, the HTML parser), so the packaging tool's static import analysis
//! misses them. They are declared here and validated when settings are built,
//! not discovered by failed builds.

use crate::bundler::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::{
    collections::HashSet,
    fmt::{self, Display},
    sync::LazyLock,
};

/// Manifest format version understood by this build.
pub const MANIFEST_VERSION: u32 = 1;

static MODULE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("module pattern is a valid regex")
});

/// A dotted module identifier the bundler must include explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct ModuleRef(String);

impl ModuleRef {
    /// Parses and validates a dotted module identifier.
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidModule {
                module: name,
                reason: "identifier is empty".into(),
            });
        }

        if !MODULE_PATTERN.is_match(trimmed) {
            return Err(Error::InvalidModule {
                module: name.clone(),
                reason: "expected dotted identifier like `tkinter.ttk`".into(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the top-level package (`lxml` for `lxml.html`).
    pub fn root(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// True if `other` is this module or one of its submodules.
    pub fn covers(&self, other: &str) -> bool {
        other == self.0
            || other
                .strip_prefix(self.0.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

impl TryFrom<String> for ModuleRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Versioned list of modules unreachable by static analysis.
///
/// The version is checked on construction; only the current format is ever
/// held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenImports {
    modules: Vec<ModuleRef>,
}

impl HiddenImports {
    /// Creates a manifest, rejecting unknown versions and duplicate entries.
    pub fn new(version: u32, modules: Vec<ModuleRef>) -> Result<Self> {
        if version != MANIFEST_VERSION {
            return Err(Error::UnsupportedManifestVersion {
                found: version,
                expected: MANIFEST_VERSION,
            });
        }

        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.as_str()) {
                return Err(Error::InvalidModule {
                    module: module.to_string(),
                    reason: "listed more than once".into(),
                });
            }
        }

        Ok(Self { modules })
    }

    /// Parses a list of identifiers into a current-version manifest.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let modules = names
            .into_iter()
            .map(ModuleRef::parse)
            .collect::<Result<Vec<_>>>()?;
        Self::new(MANIFEST_VERSION, modules)
    }

    /// Declared modules in declaration order.
    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    /// Declared modules followed by `extra`, dropping repeats.
    pub fn merged_with(&self, extra: &[ModuleRef]) -> Vec<ModuleRef> {
        let mut seen = HashSet::new();
        self.modules
            .iter()
            .chain(extra)
            .filter(|m| seen.insert(m.as_str().to_string()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_identifiers() {
        let module = ModuleRef::parse("tkinter.scrolledtext").unwrap();
        assert_eq!(module.as_str(), "tkinter.scrolledtext");
        assert_eq!(module.root(), "tkinter");
        assert_eq!(ModuleRef::parse("  lxml ").unwrap().as_str(), "lxml");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for bad in ["", "tk inter", "lxml..html", "1requests", "lxml.", "os/path"] {
            assert!(
                matches!(ModuleRef::parse(bad), Err(Error::InvalidModule { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn covers_submodules_only_on_dot_boundary() {
        let lxml = ModuleRef::parse("lxml").unwrap();
        assert!(lxml.covers("lxml"));
        assert!(lxml.covers("lxml.html"));
        assert!(!lxml.covers("lxmlx"));
    }

    #[test]
    fn rejects_unknown_version() {
        let err = HiddenImports::new(2, vec![]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedManifestVersion {
                found: 2,
                expected: MANIFEST_VERSION
            }
        ));
    }

    #[test]
    fn rejects_duplicates() {
        let err = HiddenImports::from_names(["requests", "lxml", "requests"]).unwrap_err();
        assert!(matches!(err, Error::InvalidModule { ref module, .. } if module == "requests"));
    }

    #[test]
    fn merge_keeps_order_and_drops_repeats() {
        let shared = HiddenImports::from_names(["tkinter", "requests"]).unwrap();
        let extra = vec![
            ModuleRef::parse("requests").unwrap(),
            ModuleRef::parse("PIL.ImageTk").unwrap(),
        ];
        let merged: Vec<_> = shared
            .merged_with(&extra)
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(merged, ["tkinter", "requests", "PIL.ImageTk"]);
    }
}
