//! Forge.toml build description parsing.
//!
//! The manifest is the declarative front end of the build model: it is
//! deserialized into raw structs and then replayed through the Workspace /
//! Project / Configuration mutation API in document order, so a manifest and
//! the equivalent sequence of API calls always produce the same Workspace.

use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

use crate::core::{
    Configuration, Language, LibraryType, Optimization, Project, ProjectType,
    TemplateConfiguration, Workspace,
};
use crate::util::diagnostic::{suggestions, Diagnostic as UserDiagnostic};

/// Conventional manifest file name looked up in the working directory.
pub const MANIFEST_NAME: &str = "Forge.toml";

/// Error while locating or loading a manifest.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("could not find `Forge.toml` in `{}`", .dir.display())]
    #[diagnostic(
        code(makeforge::manifest::not_found),
        help("pass the build description explicitly with `--entrypoint <PATH>`")
    )]
    NotFound { dir: PathBuf },

    #[error("failed to read manifest: {}", .path.display())]
    #[diagnostic(code(makeforge::manifest::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest `{}`: {message}", .path.display())]
    #[diagnostic(code(makeforge::manifest::parse))]
    Parse {
        path: PathBuf,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },
}

impl ManifestError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> UserDiagnostic {
        match self {
            ManifestError::NotFound { .. } => {
                UserDiagnostic::error(self.to_string()).with_suggestion(suggestions::NO_MANIFEST)
            }
            ManifestError::Read { path, source } => {
                let diag = UserDiagnostic::error("failed to read build description")
                    .with_location(path.clone())
                    .with_context(source.to_string());
                if source.kind() == std::io::ErrorKind::NotFound {
                    diag.with_suggestion(suggestions::NO_MANIFEST)
                } else {
                    diag
                }
            }
            ManifestError::Parse { path, message, .. } => {
                UserDiagnostic::error("failed to parse build description")
                    .with_location(path.clone())
                    .with_context(message.trim_end().to_string())
                    .with_suggestion(suggestions::INVALID_MANIFEST)
            }
        }
    }
}

/// Look for the conventional manifest in `dir`.
pub fn find_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let candidate = dir.join(MANIFEST_NAME);
    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(ManifestError::NotFound {
            dir: dir.to_path_buf(),
        })
    }
}

/// A loaded build description.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// The populated workspace
    pub workspace: Workspace,

    /// The directory containing this manifest
    pub manifest_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    workspace: RawWorkspace,

    #[serde(default, rename = "project")]
    projects: Vec<RawProject>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWorkspace {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawProject {
    name: String,

    #[serde(default)]
    language: Language,

    #[serde(default, rename = "type")]
    project_type: ProjectType,

    #[serde(default)]
    library_type: LibraryType,

    #[serde(default)]
    sources: Vec<String>,

    #[serde(default)]
    include_dirs: Vec<String>,

    #[serde(default)]
    libraries: Vec<String>,

    #[serde(default, rename = "configuration")]
    configurations: Vec<RawConfiguration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfiguration {
    name: String,

    #[serde(default)]
    template: TemplateConfiguration,

    /// Overrides whatever the template picked.
    #[serde(default)]
    optimization: Option<Optimization>,

    #[serde(default)]
    defines: Vec<RawDefine>,

    #[serde(default)]
    compiler_flags: Vec<String>,

    #[serde(default)]
    linker_flags: Vec<String>,

    #[serde(default)]
    output_dir: Option<String>,

    #[serde(default)]
    include_dirs: Vec<String>,

    #[serde(default)]
    force_includes: Vec<String>,

    #[serde(default)]
    libraries: Vec<String>,

    #[serde(default)]
    library_dirs: Vec<String>,

    #[serde(default)]
    pre_build: Vec<String>,

    #[serde(default)]
    post_build: Vec<String>,

    #[serde(default)]
    pre_link: Vec<String>,

    #[serde(default)]
    post_link: Vec<String>,
}

/// A define written either as `["KEY", "VALUE"]` or as `"KEY=VALUE"` / `"KEY"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDefine {
    Pair(String, String),
    Assign(String),
}

impl RawDefine {
    fn into_pair(self) -> (String, String) {
        match self {
            RawDefine::Pair(key, value) => (key, value),
            RawDefine::Assign(s) => match s.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (s, String::new()),
            },
        }
    }
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: e.span().map(SourceSpan::from),
        })?;

        let manifest_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        let mut workspace = Workspace::new(raw.workspace.name);
        for raw_project in raw.projects {
            workspace.add_project(Self::convert_project(raw_project));
        }

        if workspace.is_empty() {
            tracing::warn!(
                "manifest {} declares no projects; every generator will reject it",
                path.display()
            );
        }

        Ok(Manifest {
            workspace,
            manifest_dir,
        })
    }

    /// Consume the manifest, keeping only the workspace.
    pub fn into_workspace(self) -> Workspace {
        self.workspace
    }

    fn convert_project(raw: RawProject) -> Project {
        let mut project =
            Project::with_kind(raw.name, raw.language, raw.project_type, raw.library_type);

        if raw.project_type == ProjectType::Executable && raw.library_type == LibraryType::Static {
            tracing::debug!(
                "project `{}`: library-type is ignored for executables",
                project.name()
            );
        }

        project
            .add_source_files(raw.sources)
            .add_include_dirs(raw.include_dirs)
            .add_libraries(raw.libraries);

        for raw_config in raw.configurations {
            project.add_configuration(Self::convert_configuration(raw_config));
        }

        project
    }

    fn convert_configuration(raw: RawConfiguration) -> Configuration {
        let mut config = Configuration::from_template(raw.name, raw.template);

        if let Some(optimization) = raw.optimization {
            config.set_optimization(optimization);
        }
        for define in raw.defines {
            let (key, value) = define.into_pair();
            config.add_define(key, value);
        }
        if let Some(dir) = raw.output_dir {
            config.set_output_dir(dir);
        }

        config
            .add_compiler_flags(raw.compiler_flags)
            .add_linker_flags(raw.linker_flags)
            .add_include_dirs(raw.include_dirs)
            .add_force_includes(raw.force_includes)
            .add_libraries(raw.libraries)
            .add_library_dirs(raw.library_dirs)
            .add_pre_build_commands(raw.pre_build)
            .add_post_build_commands(raw.post_build)
            .add_pre_link_commands(raw.pre_link)
            .add_post_link_commands(raw.post_link);

        config
    }
}

/// Generate a starter manifest for a single executable project.
pub fn generate_manifest(name: &str) -> String {
    format!(
        r#"[workspace]
name = "{name}"

[[project]]
name = "{name}"
language = "c++"
type = "executable"
sources = ["src/main.cpp"]

[[project.configuration]]
name = "Debug"
template = "debug"

[[project.configuration]]
name = "Release"
template = "release"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<Manifest, ManifestError> {
        Manifest::parse(content, Path::new("/tmp/Forge.toml"))
    }

    #[test]
    fn test_parse_full_manifest() {
        let manifest = parse(
            r#"
[workspace]
name = "Game"

[[project]]
name = "engine"
language = "c"
type = "library"
library-type = "static"
sources = ["src/a.c", "src/b.c"]
include-dirs = ["include"]
libraries = ["m"]

[[project.configuration]]
name = "Debug"
template = "debug"
defines = [["TRACE", "1"], "LEVEL=2", "FLAG"]
compiler-flags = ["/W4"]
linker-flags = ["/DEBUG"]
output-dir = "bin/debug"
include-dirs = ["gen"]
force-includes = ["pch.h"]
libraries = ["dbghelp.lib"]
library-dirs = ["lib"]
pre-build = ["gen.bat"]
post-build = ["copy.bat"]
pre-link = ["prelink.bat"]
post-link = ["sign.bat"]

[[project]]
name = "game"
"#,
        )
        .unwrap();

        let ws = manifest.workspace;
        assert_eq!(ws.name(), "Game");
        assert_eq!(ws.projects().len(), 2);

        let engine = ws.project("engine").unwrap();
        assert_eq!(engine.language(), Language::C);
        assert_eq!(engine.project_type(), ProjectType::Library);
        assert_eq!(engine.library_type(), LibraryType::Static);
        assert_eq!(engine.source_files(), ["src/a.c", "src/b.c"]);

        let debug = &engine.configurations()[0];
        assert_eq!(debug.optimization(), Optimization::Off);
        assert_eq!(
            debug.defines(),
            [
                ("TRACE".to_string(), "1".to_string()),
                ("LEVEL".to_string(), "2".to_string()),
                ("FLAG".to_string(), String::new()),
            ]
        );
        assert_eq!(debug.output_dir(), Some("bin/debug"));
        assert_eq!(debug.force_includes(), ["pch.h"]);
        assert_eq!(debug.post_link_commands(), ["sign.bat"]);

        let game = ws.project("game").unwrap();
        assert_eq!(game.language(), Language::Cpp);
        assert_eq!(game.project_type(), ProjectType::Executable);
        assert!(game.configurations().is_empty());
    }

    #[test]
    fn test_optimization_overrides_template() {
        let manifest = parse(
            r#"
[workspace]
name = "W"

[[project]]
name = "P"

[[project.configuration]]
name = "Profile"
template = "debug"
optimization = "level2"
"#,
        )
        .unwrap();

        let config = &manifest.workspace.projects()[0].configurations()[0];
        assert_eq!(config.optimization(), Optimization::Level2);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse(
            r#"
[workspace]
name = "W"

[[project]]
name = "P"
sauces = ["main.c"]
"#,
        )
        .unwrap_err();

        match err {
            ManifestError::Parse { message, span, .. } => {
                assert!(message.contains("sauces"));
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_workspace_section() {
        let err = parse("[[project]]\nname = \"P\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_suggests_init() {
        let tmp = TempDir::new().unwrap();
        let err = Manifest::load(&tmp.path().join("nope.toml")).unwrap_err();
        let output = err.to_diagnostic().format(false);

        assert!(output.starts_with("error: failed to read build description\n"));
        assert!(output.contains("nope.toml"));
        assert!(output.contains("makeforge --init"));
    }

    #[test]
    fn test_parse_error_diagnostic_names_file() {
        let err = parse("[workspace\n").unwrap_err();
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("--> /tmp/Forge.toml"));
        assert!(output.contains(suggestions::INVALID_MANIFEST));
    }

    #[test]
    fn test_empty_workspace_is_accepted_by_loader() {
        let manifest = parse("[workspace]\nname = \"W\"\n").unwrap();
        assert!(manifest.workspace.is_empty());
    }

    #[test]
    fn test_find_and_load() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            find_manifest(tmp.path()),
            Err(ManifestError::NotFound { .. })
        ));

        std::fs::write(tmp.path().join(MANIFEST_NAME), generate_manifest("hello")).unwrap();
        let path = find_manifest(tmp.path()).unwrap();
        let manifest = Manifest::load(&path).unwrap();

        assert_eq!(manifest.manifest_dir, tmp.path());
        let ws = manifest.into_workspace();
        assert_eq!(ws.name(), "hello");
        let names: Vec<_> = ws.projects()[0]
            .configurations()
            .iter()
            .map(|c| (c.name(), c.optimization()))
            .collect();
        assert_eq!(
            names,
            [("Debug", Optimization::Off), ("Release", Optimization::Level3)]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load(Path::new("/definitely/not/here/Forge.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }
}
