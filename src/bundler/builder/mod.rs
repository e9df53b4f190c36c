//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that cleans the
//! workspace and runs the packaging tool once per build profile.
//!
//! # Overview
//!
//! The bundler:
//! 1. Resolves the requested profiles from [`Settings`](crate::bundler::Settings)
//! 2. Takes the workspace lock
//! 3. Runs the cleaner
//! 4. Checks every input, then locates the packaging tool
//! 5. Runs the tool per profile and verifies the artifact
//! 6. Returns [`BundledArtifact`](crate::bundler::BundledArtifact) results
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`invocation`] - Packaging tool command line and execution
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations
//! - [`state`] - Build state machine
//! - [`tool_detection`] - External tool availability checking

pub mod checksum;
pub mod invocation;
mod orchestrator;
mod state;
pub mod tool_detection;

pub use orchestrator::Bundler;
pub use state::BuildState;
