//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation and
//! the runtime configuration derived from the parsed arguments.

use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

/// Clean-and-bundle orchestrator for StarCitizenMonitor
#[derive(Parser, Debug)]
#[command(
    name = "sc_monitor_bundler",
    version,
    about = "Clean the workspace and package StarCitizenMonitor into a single executable",
    long_about = "Removes stale build outputs (build/, dist/, *.spec), then runs the packaging tool
(PyInstaller) once per build profile to produce one self-contained, windowed executable.

Usage:
  sc_monitor_bundler clean
  sc_monitor_bundler build                      # release profile
  sc_monitor_bundler build --profile debug
  sc_monitor_bundler all --json
  sc_monitor_bundler --tool python --tool-arg -m --tool-arg PyInstaller build
  sc_monitor_bundler check --verify-imports

Exit code 0 = every requested artifact exists in dist/."
)]
pub struct Args {
    /// Workspace holding the entry script, icons and configuration
    #[arg(short = 'w', long, value_name = "DIR", default_value = ".", global = true)]
    pub workspace: PathBuf,

    /// Bundle manifest (default: <workspace>/bundle.toml, else built-in)
    #[arg(short = 'm', long, value_name = "FILE", global = true)]
    pub manifest: Option<PathBuf>,

    /// Packaging tool program (default: pyinstaller on PATH)
    #[arg(long, value_name = "PROGRAM", env = "SC_BUNDLER_TOOL", global = true)]
    pub tool: Option<PathBuf>,

    /// Leading argument passed to the tool before generated ones (repeatable)
    #[arg(
        long = "tool-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        global = true
    )]
    pub tool_args: Vec<String>,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print every step, including removed paths
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Bundler operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Remove build/, dist/ and stale *.spec files
    Clean,

    /// Clean, then build the named profiles
    Build {
        /// Profile to build (repeatable)
        #[arg(short = 'p', long = "profile", value_name = "NAME", default_value = "release")]
        profiles: Vec<String>,
    },

    /// Clean, then build every profile in the manifest
    All,

    /// Validate manifest, inputs and tool without building
    Check {
        /// Ask a Python interpreter whether each forced-include module resolves
        #[arg(long)]
        verify_imports: bool,

        /// Interpreter for --verify-imports (default: python3 or python on PATH)
        #[arg(long, value_name = "PROGRAM", requires = "verify_imports")]
        python: Option<PathBuf>,
    },

    /// List the profiles defined by the manifest
    Profiles,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.workspace.as_os_str().is_empty() {
            return Err("Workspace cannot be empty".to_string());
        }

        if let Command::Build { profiles } = &self.command {
            let mut seen = HashSet::new();
            for profile in profiles {
                if profile.trim().is_empty() {
                    return Err("Profile name cannot be empty".to_string());
                }
                if !seen.insert(profile.as_str()) {
                    return Err(format!("Profile '{}' requested more than once", profile));
                }
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,

    /// Emit JSON on stdout instead of human-readable summaries
    json: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        // JSON owns stdout; human output drops to warnings and errors
        let output = super::OutputManager::new(args.verbose, args.quiet || args.json);

        Self {
            output,
            json: args.json,
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Whether JSON output was requested
    pub fn json(&self) -> bool {
        self.json
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sc_monitor_bundler").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn build_defaults_to_release() {
        let args = parse(&["build"]);
        assert_eq!(
            args.command,
            Command::Build {
                profiles: vec!["release".into()]
            }
        );
        assert_eq!(args.workspace, PathBuf::from("."));
    }

    #[test]
    fn tool_args_accept_hyphen_values() {
        let args = parse(&[
            "--tool",
            "python",
            "--tool-arg",
            "-m",
            "--tool-arg",
            "PyInstaller",
            "build",
            "-p",
            "debug",
        ]);
        assert_eq!(args.tool, Some(PathBuf::from("python")));
        assert_eq!(args.tool_args, ["-m", "PyInstaller"]);
        assert_eq!(
            args.command,
            Command::Build {
                profiles: vec!["debug".into()]
            }
        );
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let args = parse(&["clean", "--workspace", "/tmp/ws", "--json"]);
        assert_eq!(args.workspace, PathBuf::from("/tmp/ws"));
        assert!(args.json);
        assert!(RuntimeConfig::from(&args).json());
    }

    #[test]
    fn repeated_profile_is_invalid() {
        let args = parse(&["build", "-p", "debug", "-p", "debug"]);
        assert!(args.validate().is_err());
        assert!(parse(&["build", "-p", "release", "-p", "debug"]).validate().is_ok());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["sc_monitor_bundler", "-q", "-v", "clean"]);
        assert!(result.is_err());
    }

    #[test]
    fn python_requires_verify_imports() {
        assert!(Args::try_parse_from(["sc_monitor_bundler", "check", "--python", "python3"]).is_err());
        let args = parse(&["check", "--verify-imports", "--python", "python3"]);
        assert_eq!(
            args.command,
            Command::Check {
                verify_imports: true,
                python: Some(PathBuf::from("python3"))
            }
        );
    }
}
