//! Command execution functions for bundler operations.
//!
//! Each subcommand owns one module; all of them take fully-resolved
//! [`Settings`](crate::bundler::Settings) and return the process exit code.

pub mod build;
pub mod check;
pub mod clean;
pub mod profiles;
