//! Visual Studio 2022 exporter.
//!
//! Writes one `<project>.vcxproj` and `<project>.vcxproj.filters` per
//! project, then `<workspace>.sln` referencing them. Every project targets
//! the x64 platform with the v143 toolset.

mod filters;
pub mod guid;
mod solution;
mod vcxproj;
pub mod xml;

use std::collections::HashSet;
use std::path::Path;

use crate::core::{Configuration, LibraryType, Optimization, Project, ProjectType, Workspace};
use crate::export::{check_file_stem, write_file, ExportError, ExportReport, WorkspaceExporter};

pub use guid::{Guid, GuidAllocator, GuidStrategy};

pub(crate) const PLATFORM: &str = "x64";
pub(crate) const PLATFORM_TOOLSET: &str = "v143";
pub(crate) const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// `ConfigurationType` for a project.
pub fn configuration_type(project: &Project) -> &'static str {
    match (project.project_type(), project.library_type()) {
        (ProjectType::Executable, _) => "Application",
        (ProjectType::Library, LibraryType::Static) => "StaticLibrary",
        (ProjectType::Library, LibraryType::Shared) => "DynamicLibrary",
    }
}

/// MSVC `Optimization` value for an optimization level.
pub fn optimization_value(optimization: Optimization) -> &'static str {
    match optimization {
        Optimization::Off => "Disabled",
        Optimization::Level1 => "MinSpace",
        Optimization::Level2 => "MaxSpeed",
        Optimization::Level3 => "Full",
    }
}

/// Every string of `project` that ends up in its XML files.
fn xml_values(project: &Project) -> impl Iterator<Item = &str> {
    let project_values = std::iter::once(project.name())
        .chain(project.source_files().iter().map(String::as_str))
        .chain(project.include_dirs().iter().map(String::as_str));

    let config_values = project.configurations().iter().flat_map(|config| {
        std::iter::once(config.name())
            .chain(config.defines().iter().map(|(key, _)| key.as_str()))
            .chain(config.include_dirs().iter().map(String::as_str))
            .chain(config.compiler_flags().iter().map(String::as_str))
            .chain(config.linker_flags().iter().map(String::as_str))
    });

    project_values.chain(config_values)
}

/// Reject values holding characters that no XML 1.0 document may contain.
fn check_xml_values(project: &Project) -> Result<(), ExportError> {
    for value in xml_values(project) {
        if let Some(c) = value.chars().find(|&c| !xml::is_xml_char(c)) {
            return Err(ExportError::InvalidXmlCharacter {
                project: project.name().to_string(),
                value: value.escape_debug().to_string(),
                code: c as u32,
            });
        }
    }
    Ok(())
}

/// Debug runtime libraries are linked only when optimization is off.
pub fn use_debug_libraries(config: &Configuration) -> &'static str {
    if config.optimization().is_off() {
        "true"
    } else {
        "false"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VisualStudioExporter {
    guids: GuidStrategy,
}

impl VisualStudioExporter {
    pub fn new(guids: GuidStrategy) -> Self {
        VisualStudioExporter { guids }
    }
}

impl WorkspaceExporter for VisualStudioExporter {
    fn name(&self) -> &'static str {
        "vs2022"
    }

    /// Project names become file names, so they must be usable as such
    /// and unique within the workspace. Everything written into the XML
    /// files must be representable in XML.
    fn check(&self, workspace: &Workspace) -> Result<(), ExportError> {
        check_file_stem("workspace", workspace.name())?;

        let mut seen = HashSet::new();
        for project in workspace.projects() {
            check_file_stem("project", project.name())?;
            if !seen.insert(project.name()) {
                return Err(ExportError::DuplicateProject {
                    name: project.name().to_string(),
                });
            }
            check_xml_values(project)?;
        }
        Ok(())
    }

    fn render(&self, workspace: &Workspace, output: &Path) -> Result<ExportReport, ExportError> {
        let mut report = ExportReport::default();
        let mut guids = GuidAllocator::new(self.guids, workspace.name());
        let mut entries = Vec::with_capacity(workspace.projects().len());

        for project in workspace.projects() {
            let guid = guids.project(project.name());
            tracing::debug!("project `{}` -> {}", project.name(), guid);

            write_file(
                &mut report,
                output.join(format!("{}.vcxproj", project.name())),
                &vcxproj::render(project, guid)?,
            )?;

            let filter_guid = guids.filter(project.name(), filters::SOURCE_FILTER);
            write_file(
                &mut report,
                output.join(format!("{}.vcxproj.filters", project.name())),
                &filters::render(project, filter_guid)?,
            )?;

            entries.push((project, guid));
        }

        write_file(
            &mut report,
            output.join(format!("{}.sln", workspace.name())),
            &solution::render(&entries),
        )?;

        Ok(report)
    }
}
