//! Workspace - the root of the build model.
//!
//! A Workspace owns an ordered list of projects. It is built once (usually by
//! the manifest loader) and then handed by reference to an exporter; there is
//! no process-wide "current workspace".

use serde::{Deserialize, Serialize};

use crate::core::enums::{Language, LibraryType, ProjectType};
use crate::core::project::Project;

/// A named collection of projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    name: String,

    #[serde(default)]
    projects: Vec<Project>,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new(name: impl Into<String>) -> Self {
        Workspace {
            name: name.into(),
            projects: Vec::new(),
        }
    }

    /// Create a project, append it, and return a handle for further setup.
    pub fn create_project(
        &mut self,
        name: impl Into<String>,
        language: Language,
        project_type: ProjectType,
        library_type: LibraryType,
    ) -> &mut Project {
        self.add_project(Project::with_kind(name, language, project_type, library_type))
    }

    /// Append an already-built project.
    pub fn add_project(&mut self, project: Project) -> &mut Project {
        self.projects.push(project);
        let last = self.projects.len() - 1;
        &mut self.projects[last]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Find a project by name. Names are not unique; the first match wins.
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name() == name)
    }

    /// Mutable variant of [`Workspace::project`].
    pub fn project_mut(&mut self, name: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Configuration;

    #[test]
    fn test_create_project_returns_handle() {
        let mut ws = Workspace::new("W");
        ws.create_project("P", Language::Cpp, ProjectType::Executable, LibraryType::Shared)
            .add_source_files(["src/main.cpp"])
            .add_configuration(Configuration::debug("Debug"));

        assert_eq!(ws.name(), "W");
        assert_eq!(ws.projects().len(), 1);
        assert_eq!(ws.projects()[0].source_files(), ["src/main.cpp"]);
        assert_eq!(ws.projects()[0].configurations().len(), 1);
    }

    #[test]
    fn test_lookup_returns_first_match() {
        let mut ws = Workspace::new("W");
        ws.create_project("dup", Language::C, ProjectType::Executable, LibraryType::Shared);
        ws.create_project("dup", Language::Cpp, ProjectType::Library, LibraryType::Static);

        let found = ws.project("dup").unwrap();
        assert_eq!(found.language(), Language::C);
        assert!(ws.project("missing").is_none());
        assert_eq!(ws.projects().len(), 2);
    }

    #[test]
    fn test_empty_workspace() {
        let ws = Workspace::new("empty");
        assert!(ws.is_empty());
        assert!(ws.project("anything").is_none());
    }
}
