//! Configuration - one named build variant of a project.
//!
//! A configuration is a passive value container: every `add_*` method appends
//! to an ordered list, every `set_*` method replaces a single value. Nothing
//! is validated here; exporters decide what they accept.

use serde::{Deserialize, Serialize};

use crate::core::enums::{Optimization, TemplateConfiguration};

/// A named bundle of compiler, linker and build-step settings (e.g. "Debug").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    name: String,

    /// Preprocessor defines in insertion order, serialized as `[key, value]` pairs.
    #[serde(default)]
    defines: Vec<(String, String)>,

    #[serde(default)]
    optimization: Optimization,

    #[serde(default)]
    compiler_flags: Vec<String>,

    #[serde(default)]
    linker_flags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
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
    pre_build_commands: Vec<String>,

    #[serde(default)]
    post_build_commands: Vec<String>,

    #[serde(default)]
    pre_link_commands: Vec<String>,

    #[serde(default)]
    post_link_commands: Vec<String>,
}

fn extend(list: &mut Vec<String>, items: impl IntoIterator<Item = impl Into<String>>) {
    list.extend(items.into_iter().map(Into::into));
}

impl Configuration {
    /// Create an empty configuration. Optimization starts at the highest level.
    pub fn new(name: impl Into<String>) -> Self {
        Configuration {
            name: name.into(),
            defines: Vec::new(),
            optimization: Optimization::Level3,
            compiler_flags: Vec::new(),
            linker_flags: Vec::new(),
            output_dir: None,
            include_dirs: Vec::new(),
            force_includes: Vec::new(),
            libraries: Vec::new(),
            library_dirs: Vec::new(),
            pre_build_commands: Vec::new(),
            post_build_commands: Vec::new(),
            pre_link_commands: Vec::new(),
            post_link_commands: Vec::new(),
        }
    }

    /// Preset with optimization disabled.
    pub fn debug(name: impl Into<String>) -> Self {
        let mut config = Configuration::new(name);
        config.optimization = Optimization::Off;
        config
    }

    /// Preset with full optimization.
    pub fn release(name: impl Into<String>) -> Self {
        let mut config = Configuration::new(name);
        config.optimization = Optimization::Level3;
        config
    }

    /// Create a configuration from a preset.
    pub fn from_template(name: impl Into<String>, template: TemplateConfiguration) -> Self {
        match template {
            TemplateConfiguration::Debug => Configuration::debug(name),
            TemplateConfiguration::Release => Configuration::release(name),
            TemplateConfiguration::Empty => Configuration::new(name),
        }
    }

    /// Add a preprocessor define.
    ///
    /// Defines behave like a map: adding a key that already exists replaces
    /// its value but keeps its original position.
    pub fn add_define(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.defines.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.defines.push((key, value)),
        }
        self
    }

    pub fn set_optimization(&mut self, optimization: Optimization) -> &mut Self {
        self.optimization = optimization;
        self
    }

    pub fn add_compiler_flags(&mut self, flags: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.compiler_flags, flags);
        self
    }

    pub fn add_linker_flags(&mut self, flags: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.linker_flags, flags);
        self
    }

    pub fn set_output_dir(&mut self, dir: impl Into<String>) -> &mut Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn add_include_dirs(&mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.include_dirs, dirs);
        self
    }

    pub fn add_force_includes(&mut self, files: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.force_includes, files);
        self
    }

    pub fn add_libraries(&mut self, libs: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.libraries, libs);
        self
    }

    pub fn add_library_dirs(&mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.library_dirs, dirs);
        self
    }

    pub fn add_pre_build_commands(&mut self, cmds: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.pre_build_commands, cmds);
        self
    }

    pub fn add_post_build_commands(&mut self, cmds: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.post_build_commands, cmds);
        self
    }

    pub fn add_pre_link_commands(&mut self, cmds: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.pre_link_commands, cmds);
        self
    }

    pub fn add_post_link_commands(&mut self, cmds: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        extend(&mut self.post_link_commands, cmds);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Preprocessor defines in insertion order.
    pub fn defines(&self) -> &[(String, String)] {
        &self.defines
    }

    /// Look up the value of a define by key.
    pub fn define(&self, key: &str) -> Option<&str> {
        self.defines
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn optimization(&self) -> Optimization {
        self.optimization
    }

    pub fn compiler_flags(&self) -> &[String] {
        &self.compiler_flags
    }

    pub fn linker_flags(&self) -> &[String] {
        &self.linker_flags
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.output_dir.as_deref()
    }

    pub fn include_dirs(&self) -> &[String] {
        &self.include_dirs
    }

    pub fn force_includes(&self) -> &[String] {
        &self.force_includes
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn library_dirs(&self) -> &[String] {
        &self.library_dirs
    }

    pub fn pre_build_commands(&self) -> &[String] {
        &self.pre_build_commands
    }

    pub fn post_build_commands(&self) -> &[String] {
        &self.post_build_commands
    }

    pub fn pre_link_commands(&self) -> &[String] {
        &self.pre_link_commands
    }

    pub fn post_link_commands(&self) -> &[String] {
        &self.post_link_commands
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new("")
    }
}
