//! makeforge - describe C/C++ workspaces once, export them to build tools
//!
//! This crate provides the in-memory build model (Workspace, Project,
//! Configuration), the `Forge.toml` loader that populates it, and the
//! exporters that turn it into JSON or Visual Studio 2022 files.

pub mod core;
pub mod export;
pub mod util;

pub use core::{
    configuration::Configuration,
    enums::{Language, LibraryType, Optimization, ProjectType, TemplateConfiguration},
    manifest::Manifest,
    project::Project,
    workspace::Workspace,
};

pub use export::{export, ExportError, ExportOptions, ExportReport, Generator};
