//! Shared helpers for bundler operations.

pub mod fs;
