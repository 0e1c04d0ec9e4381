//! Configuration file support for makeforge.
//!
//! makeforge reads two optional configuration files:
//! - Global: `<config dir>/makeforge/config.toml` - User-wide defaults
//! - Project: `.makeforge/config.toml` next to the build description
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::export::Generator;
use crate::util::fs;

/// makeforge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
}

/// Export-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExportConfig {
    /// Default generator name (json, vs2022)
    pub generator: Option<String>,

    /// Derive project identifiers from names instead of generating them randomly
    pub stable_guids: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.export.generator.is_some() {
            self.export.generator = other.export.generator;
        }
        if other.export.stable_guids.is_some() {
            self.export.stable_guids = other.export.stable_guids;
        }
    }

    /// Parse the configured generator, ignoring unknown names with a warning.
    pub fn generator(&self) -> Option<Generator> {
        let name = self.export.generator.as_ref()?;
        match name.parse() {
            Ok(generator) => Some(generator),
            Err(e) => {
                tracing::warn!("ignoring configured generator: {}", e);
                None
            }
        }
    }

    pub fn stable_guids(&self) -> bool {
        self.export.stable_guids.unwrap_or(false)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.makeforge/config.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config path (platform config dir + `config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "makeforge").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the project config path (.makeforge/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".makeforge").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_give_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));

        assert!(config.generator().is_none());
        assert!(!config.stable_guids());
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        std::fs::write(
            &global,
            "[export]\ngenerator = \"vs2022\"\nstable-guids = true\n",
        )
        .unwrap();

        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[export]\ngenerator = \"json\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.generator(), Some(Generator::Json));
        assert!(config.stable_guids());
    }

    #[test]
    fn test_unknown_generator_is_ignored() {
        let config = Config {
            export: ExportConfig {
                generator: Some("ninja".to_string()),
                stable_guids: None,
            },
        };
        assert!(config.generator().is_none());
    }

    #[test]
    fn test_malformed_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[export\n").unwrap();

        assert!(Config::load(&path).is_err());
        assert!(Config::load_or_default(&path).export.generator.is_none());
    }
}
