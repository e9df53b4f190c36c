//! Colored terminal output.
//!
//! Informational output goes to stdout; warnings and errors go to stderr so
//! they survive `--quiet` and never mix with `--json` documents.

use std::io::{IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Output manager for user-facing messages
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    stdout_color: ColorChoice,
    stderr_color: ColorChoice,
}

impl OutputManager {
    /// Create an output manager honoring verbosity flags
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose: verbose && !quiet,
            quiet,
            stdout_color: color_choice(std::io::stdout().is_terminal()),
            stderr_color: color_choice(std::io::stderr().is_terminal()),
        }
    }

    /// Detail shown only with `--verbose`
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        let mut out = self.stdout();
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        writeln!(out, "  {}", message)?;
        out.reset()
    }

    /// Step in progress
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.tagged(&mut self.stdout(), Color::Cyan, "→", message)
    }

    /// Completed step
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.tagged(&mut self.stdout(), Color::Green, "✓", message)
    }

    /// Something worth a look that does not stop the run
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.tagged(&mut self.stderr(), Color::Yellow, "warning:", message)
    }

    /// Failure description
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.tagged(&mut self.stderr(), Color::Red, "error:", message)
    }

    /// Bold section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = self.stdout();
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "{}", title)?;
        out.reset()
    }

    /// Indented detail line
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.stdout(), "    {}", message)
    }

    fn tagged(
        &self,
        stream: &mut StandardStream,
        color: Color,
        tag: &str,
        message: &str,
    ) -> std::io::Result<()> {
        stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stream, "{}", tag)?;
        stream.reset()?;
        writeln!(stream, " {}", message)
    }

    fn stdout(&self) -> StandardStream {
        StandardStream::stdout(self.stdout_color)
    }

    fn stderr(&self) -> StandardStream {
        StandardStream::stderr(self.stderr_color)
    }
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
