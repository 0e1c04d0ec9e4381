//! Core data structures for makeforge.
//!
//! This module contains the in-memory build model:
//! - Enumerations (language, optimization, project/library type)
//! - Configurations, Projects and the root Workspace
//! - The `Forge.toml` manifest loader that populates a Workspace

pub mod configuration;
pub mod enums;
pub mod manifest;
pub mod project;
pub mod workspace;

pub use configuration::Configuration;
pub use enums::{Language, LibraryType, Optimization, ParseEnumError, ProjectType, TemplateConfiguration};
pub use manifest::{find_manifest, Manifest, MANIFEST_NAME};
pub use project::Project;
pub use workspace::Workspace;
