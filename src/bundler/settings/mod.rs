//! Configuration structures for clean and build operations.
//!
//! [`Settings`] carries everything the cleaner and the builder need: the
//! workspace, the entry script, the packaging tool and the build profiles.
//! Profiles are plain data; one builder routine consumes any of them.

mod builder;
mod core;
mod modules;
mod profile;
mod tool;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use modules::{HiddenImports, MANIFEST_VERSION, ModuleRef};
pub use profile::{BuildProfile, BundleMode, DATA_SEPARATOR, DataEntry};
pub use tool::ToolCommand;
