//! Exporters - render a Workspace into build-tool files on disk.
//!
//! The set of exporters is closed: [`Generator`] names every variant and is
//! the only way to look one up by name. All exporters share the same entry
//! point, [`WorkspaceExporter::export`], which enforces the common
//! precondition (at least one project) before touching the filesystem.

pub mod json;
pub mod vs;

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::core::Workspace;
use crate::util::diagnostic::{suggestions, Diagnostic as UserDiagnostic};

pub use json::JsonExporter;
pub use vs::{GuidStrategy, VisualStudioExporter};

/// Error raised while exporting a workspace.
#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("workspace `{workspace}` has no projects")]
    #[diagnostic(
        code(makeforge::export::empty_workspace),
        help("add at least one [[project]] table to the build description")
    )]
    EmptyWorkspace { workspace: String },

    #[error("{kind} name `{name}` cannot be used as a file name: {reason}")]
    #[diagnostic(
        code(makeforge::export::invalid_name),
        help("project and workspace names become file names; avoid path separators and reserved characters")
    )]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: &'static str,
    },

    #[error("project `{name}` is declared more than once")]
    #[diagnostic(
        code(makeforge::export::duplicate_project),
        help("every project needs its own file name; rename one of them")
    )]
    DuplicateProject { name: String },

    #[error("project `{project}` has a character XML cannot hold (U+{code:04X}) in `{value}`")]
    #[diagnostic(
        code(makeforge::export::invalid_xml_char),
        help("remove control characters from names, paths, defines and flags")
    )]
    InvalidXmlCharacter {
        project: String,
        value: String,
        code: u32,
    },

    #[error("failed to render XML")]
    #[diagnostic(code(makeforge::export::render))]
    Render { message: String },

    #[error("failed to create output directory `{}`", .path.display())]
    #[diagnostic(code(makeforge::export::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{}`", .path.display())]
    #[diagnostic(code(makeforge::export::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize workspace")]
    #[diagnostic(code(makeforge::export::serialize))]
    Serialize(#[from] serde_json::Error),
}

impl ExportError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> UserDiagnostic {
        let diag = UserDiagnostic::error(self.to_string());
        match self {
            ExportError::EmptyWorkspace { .. } => {
                diag.with_suggestion(suggestions::EMPTY_WORKSPACE)
            }
            ExportError::InvalidName { .. } => diag.with_suggestion(suggestions::INVALID_NAME),
            ExportError::DuplicateProject { .. } => {
                diag.with_suggestion(suggestions::DUPLICATE_PROJECT)
            }
            ExportError::InvalidXmlCharacter { .. } => {
                diag.with_suggestion(suggestions::INVALID_XML_CHAR)
            }
            ExportError::Render { message } => diag.with_context(message.clone()),
            ExportError::CreateDir { path, source } | ExportError::Write { path, source } => diag
                .with_location(path.clone())
                .with_context(source.to_string()),
            ExportError::Serialize(e) => diag.with_context(e.to_string()),
        }
    }
}

/// Files produced by one export run, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub files: Vec<PathBuf>,
}

impl ExportReport {
    fn push(&mut self, path: PathBuf) {
        self.files.push(path);
    }
}

/// Options shared by every exporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// How project identifiers are produced (Visual Studio only).
    pub guids: GuidStrategy,
}

/// Capability: render a workspace to a directory.
pub trait WorkspaceExporter {
    /// Name used on the command line.
    fn name(&self) -> &'static str;

    /// Exporter-specific preconditions, checked after the shared ones.
    fn check(&self, _workspace: &Workspace) -> Result<(), ExportError> {
        Ok(())
    }

    /// Write the exporter's files into an existing directory.
    fn render(&self, workspace: &Workspace, output: &Path) -> Result<ExportReport, ExportError>;

    /// Validate the workspace, create `output` (with parents), then render into it.
    ///
    /// Nothing is created on disk when validation fails.
    fn export(&self, workspace: &Workspace, output: &Path) -> Result<ExportReport, ExportError> {
        validate_workspace(workspace)?;
        self.check(workspace)?;

        std::fs::create_dir_all(output).map_err(|source| ExportError::CreateDir {
            path: output.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            "exporting workspace `{}` with {} generator to {}",
            workspace.name(),
            self.name(),
            output.display()
        );

        let report = self.render(workspace, output)?;

        tracing::info!(
            "{} generator wrote {} file(s) to {}",
            self.name(),
            report.files.len(),
            output.display()
        );

        Ok(report)
    }
}

/// The precondition every exporter enforces: a workspace must have projects.
pub fn validate_workspace(workspace: &Workspace) -> Result<(), ExportError> {
    if workspace.is_empty() {
        return Err(ExportError::EmptyWorkspace {
            workspace: workspace.name().to_string(),
        });
    }
    Ok(())
}

/// Device names Windows reserves in every directory, with or without an extension.
const RESERVED_DEVICE_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

fn is_reserved_device_name(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name).trim_end();
    RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
}

/// Reject names that cannot be used verbatim as a file stem on Windows.
pub(crate) fn check_file_stem(kind: &'static str, name: &str) -> Result<(), ExportError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name is a relative directory reference")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name.chars().any(char::is_control) {
        Some("name contains a control character")
    } else if name.contains(['<', '>', ':', '"', '|', '?', '*']) {
        Some("name contains a character reserved on Windows")
    } else if name.ends_with(['.', ' ']) {
        Some("name ends with a dot or a space")
    } else if is_reserved_device_name(name) {
        Some("name is a device name reserved on Windows")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ExportError::InvalidName {
            kind,
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Write one output file and record it in the report.
pub(crate) fn write_file(
    report: &mut ExportReport,
    path: PathBuf,
    contents: &str,
) -> Result<(), ExportError> {
    std::fs::write(&path, contents).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::debug!("wrote {}", path.display());
    report.push(path);
    Ok(())
}

/// Registered generators, in lookup order. The first entry is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    /// Structural JSON dump of the workspace
    Json,
    /// Visual Studio 2022 solution and project files
    Vs2022,
}

impl Generator {
    /// Every generator, default first.
    pub const ALL: [Generator; 2] = [Generator::Json, Generator::Vs2022];

    pub fn as_str(&self) -> &'static str {
        match self {
            Generator::Json => "json",
            Generator::Vs2022 => "vs2022",
        }
    }

    /// Names of all generators, default first.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Generator::ALL.iter().map(Generator::as_str)
    }

    /// Build the exporter for this generator.
    pub fn exporter(self, options: &ExportOptions) -> Box<dyn WorkspaceExporter> {
        match self {
            Generator::Json => Box::new(JsonExporter::new()),
            Generator::Vs2022 => Box::new(VisualStudioExporter::new(options.guids)),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::ALL[0]
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Generator {
    type Err = GeneratorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Generator::ALL
            .iter()
            .copied()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeneratorParseError(s.to_string()))
    }
}

/// Error returned when a generator name is not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorParseError(pub String);

impl std::fmt::Display for GeneratorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown generator '{}', valid values: {}",
            self.0,
            Generator::names().collect::<Vec<_>>().join(", ")
        )
    }
}

impl std::error::Error for GeneratorParseError {}

/// Export `workspace` into `output` with the chosen generator.
pub fn export(
    workspace: &Workspace,
    output: &Path,
    generator: Generator,
    options: &ExportOptions,
) -> Result<ExportReport, ExportError> {
    generator.exporter(options).export(workspace, output)
}
