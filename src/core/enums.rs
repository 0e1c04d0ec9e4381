//! Closed vocabularies used by the build model.
//!
//! Every enum here has a canonical string form (`as_str`) that doubles as its
//! serialized representation, and a `FromStr` impl that also accepts the
//! common aliases users write in `Forge.toml`.

use serde::{Deserialize, Serialize};

/// Source language for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// C language
    #[serde(rename = "C", alias = "c")]
    C,
    /// C++ language (default)
    #[default]
    #[serde(rename = "C++", alias = "c++", alias = "cpp", alias = "cxx")]
    Cpp,
}

impl Language {
    /// Get the language name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" => Ok(Language::C),
            "c++" | "cpp" | "cxx" => Ok(Language::Cpp),
            _ => Err(ParseEnumError::new("language", s, "c, c++")),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization level of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Optimization {
    /// No optimization
    #[serde(alias = "0")]
    Off,
    /// Optimize for size
    #[serde(alias = "1")]
    Level1,
    /// Optimize for speed
    #[serde(alias = "2")]
    Level2,
    /// Full optimization (default)
    #[default]
    #[serde(alias = "3")]
    Level3,
}

impl Optimization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Optimization::Off => "off",
            Optimization::Level1 => "level1",
            Optimization::Level2 => "level2",
            Optimization::Level3 => "level3",
        }
    }

    /// Whether this level disables optimization entirely.
    pub fn is_off(&self) -> bool {
        matches!(self, Optimization::Off)
    }
}

impl std::str::FromStr for Optimization {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Ok(Optimization::Off),
            "level1" | "1" => Ok(Optimization::Level1),
            "level2" | "2" => Ok(Optimization::Level2),
            "level3" | "3" => Ok(Optimization::Level3),
            _ => Err(ParseEnumError::new(
                "optimization level",
                s,
                "off, level1, level2, level3",
            )),
        }
    }
}

impl std::fmt::Display for Optimization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a project produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Executable program (default)
    #[default]
    #[serde(alias = "exe")]
    Executable,
    /// Library, see [`LibraryType`] for linkage
    #[serde(alias = "lib")]
    Library,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Executable => "executable",
            ProjectType::Library => "library",
        }
    }
}

impl std::str::FromStr for ProjectType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "executable" | "exe" => Ok(ProjectType::Executable),
            "library" | "lib" => Ok(ProjectType::Library),
            _ => Err(ParseEnumError::new("project type", s, "executable, library")),
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linkage of a library project. Ignored for executables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LibraryType {
    /// Static archive
    Static,
    /// Shared/dynamic library (default)
    #[default]
    #[serde(alias = "dynamic")]
    Shared,
}

impl LibraryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryType::Static => "static",
            LibraryType::Shared => "shared",
        }
    }
}

impl std::str::FromStr for LibraryType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" => Ok(LibraryType::Static),
            "shared" | "dynamic" => Ok(LibraryType::Shared),
            _ => Err(ParseEnumError::new("library type", s, "static, shared")),
        }
    }
}

impl std::fmt::Display for LibraryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preset used when creating a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateConfiguration {
    /// No preset, optimization stays at its default
    #[default]
    Empty,
    /// Optimization off
    Debug,
    /// Full optimization
    Release,
}

impl TemplateConfiguration {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateConfiguration::Empty => "empty",
            TemplateConfiguration::Debug => "debug",
            TemplateConfiguration::Release => "release",
        }
    }
}

impl std::str::FromStr for TemplateConfiguration {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "empty" => Ok(TemplateConfiguration::Empty),
            "debug" => Ok(TemplateConfiguration::Debug),
            "release" => Ok(TemplateConfiguration::Release),
            _ => Err(ParseEnumError::new(
                "configuration template",
                s,
                "empty, debug, release",
            )),
        }
    }
}

/// Error returned when parsing one of the enums above from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {what} '{value}', valid values: {expected}")]
pub struct ParseEnumError {
    pub what: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseEnumError {
    fn new(what: &'static str, value: &str, expected: &'static str) -> Self {
        ParseEnumError {
            what,
            value: value.to_string(),
            expected,
        }
    }
}
