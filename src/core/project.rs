//! Project - one build target and the configurations it owns.

use serde::{Deserialize, Serialize};

use crate::core::configuration::Configuration;
use crate::core::enums::{Language, LibraryType, ProjectType};

/// A named build target (executable or library).
///
/// Source files, include directories and libraries declared here apply to
/// every configuration; exporters merge them ahead of the per-configuration
/// lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    name: String,

    #[serde(default)]
    language: Language,

    #[serde(default, rename = "type")]
    project_type: ProjectType,

    #[serde(default)]
    library_type: LibraryType,

    #[serde(default)]
    configurations: Vec<Configuration>,

    #[serde(default)]
    source_files: Vec<String>,

    #[serde(default)]
    include_dirs: Vec<String>,

    #[serde(default)]
    libraries: Vec<String>,
}

impl Project {
    /// Create a C++ executable project.
    pub fn new(name: impl Into<String>) -> Self {
        Project::with_kind(
            name,
            Language::default(),
            ProjectType::default(),
            LibraryType::default(),
        )
    }

    /// Create a project with explicit language, type and library linkage.
    pub fn with_kind(
        name: impl Into<String>,
        language: Language,
        project_type: ProjectType,
        library_type: LibraryType,
    ) -> Self {
        Project {
            name: name.into(),
            language,
            project_type,
            library_type,
            configurations: Vec::new(),
            source_files: Vec::new(),
            include_dirs: Vec::new(),
            libraries: Vec::new(),
        }
    }

    /// Take ownership of a configuration and append it.
    pub fn add_configuration(&mut self, config: Configuration) -> &mut Self {
        self.configurations.push(config);
        self
    }

    pub fn add_source_files(&mut self, files: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.source_files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn add_include_dirs(&mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.include_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn add_libraries(&mut self, libs: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.libraries.extend(libs.into_iter().map(Into::into));
        self
    }

    pub fn set_language(&mut self, language: Language) -> &mut Self {
        self.language = language;
        self
    }

    pub fn set_type(&mut self, project_type: ProjectType) -> &mut Self {
        self.project_type = project_type;
        self
    }

    pub fn set_library_type(&mut self, library_type: LibraryType) -> &mut Self {
        self.library_type = library_type;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn library_type(&self) -> LibraryType {
        self.library_type
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    /// Mutable access to an owned configuration, first match by name.
    pub fn configuration_mut(&mut self, name: &str) -> Option<&mut Configuration> {
        self.configurations.iter_mut().find(|c| c.name() == name)
    }

    pub fn source_files(&self) -> &[String] {
        &self.source_files
    }

    pub fn include_dirs(&self) -> &[String] {
        &self.include_dirs
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }
}
