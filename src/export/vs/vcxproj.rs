//! `.vcxproj` project descriptor rendering.

use crate::core::{Configuration, Project};
use crate::export::vs::guid::Guid;
use crate::export::vs::xml::XmlWriter;
use crate::export::vs::{
    configuration_type, optimization_value, use_debug_libraries, MSBUILD_NAMESPACE, PLATFORM,
    PLATFORM_TOOLSET,
};
use crate::export::ExportError;
use crate::util::fs::to_windows_path;

/// MSBuild condition selecting one configuration on the fixed platform.
fn condition(config: &Configuration) -> String {
    format!(
        "'$(Configuration)|$(Platform)'=='{}|{}'",
        config.name(),
        PLATFORM
    )
}

fn import(xml: &mut XmlWriter, project: &str) -> Result<(), ExportError> {
    xml.empty("Import", &[("Project", project)])
}

/// Project-level include directories followed by the configuration's own.
fn include_path(project: &Project, config: &Configuration) -> Option<String> {
    let dirs: Vec<String> = project
        .include_dirs()
        .iter()
        .chain(config.include_dirs())
        .map(|dir| to_windows_path(dir))
        .collect();

    if dirs.is_empty() {
        None
    } else {
        Some(format!("{};$(IncludePath)", dirs.join(";")))
    }
}

/// Define keys followed by `_DEBUG` or `NDEBUG` depending on optimization.
fn preprocessor_definitions(config: &Configuration) -> String {
    let mut defines: Vec<&str> = config.defines().iter().map(|(k, _)| k.as_str()).collect();
    defines.push(if config.optimization().is_off() {
        "_DEBUG"
    } else {
        "NDEBUG"
    });
    format!("{};%(PreprocessorDefinitions)", defines.join(";"))
}

fn additional_options(flags: &[String]) -> String {
    format!("{} %(AdditionalOptions)", flags.join(" "))
}

fn item_definitions(xml: &mut XmlWriter, config: &Configuration) -> Result<(), ExportError> {
    xml.element("ItemDefinitionGroup", &[("Condition", condition(config).as_str())], |xml| {
        xml.element("ClCompile", &[], |xml| {
            xml.leaf("WarningLevel", "Level3")?;
            xml.leaf("Optimization", optimization_value(config.optimization()))?;
            if !config.compiler_flags().is_empty() {
                xml.leaf("AdditionalOptions", &additional_options(config.compiler_flags()))?;
            }
            Ok(())
        })?;

        if config.linker_flags().is_empty() {
            xml.empty("Link", &[])
        } else {
            xml.element("Link", &[], |xml| {
                xml.leaf("AdditionalOptions", &additional_options(config.linker_flags()))
            })
        }
    })
}

/// Render the descriptor for one project.
pub fn render(project: &Project, guid: Guid) -> Result<String, ExportError> {
    let configs = project.configurations();
    let mut xml = XmlWriter::new()?;

    let root = [
        ("DefaultTargets", "Build"),
        ("ToolsVersion", "17.0"),
        ("xmlns", MSBUILD_NAMESPACE),
    ];
    xml.element("Project", &root, |xml| {
        xml.element("ItemGroup", &[("Label", "ProjectConfigurations")], |xml| {
            for config in configs {
                let include = format!("{}|{}", config.name(), PLATFORM);
                xml.element("ProjectConfiguration", &[("Include", include.as_str())], |xml| {
                    xml.leaf("Configuration", config.name())?;
                    xml.leaf("Platform", PLATFORM)
                })?;
            }
            Ok(())
        })?;

        xml.element("PropertyGroup", &[("Label", "Globals")], |xml| {
            xml.leaf("ProjectGuid", &guid.to_string())?;
            xml.leaf("Keyword", "Win32Proj")?;
            xml.leaf("RootNamespace", project.name())?;
            xml.leaf("Platform", PLATFORM)
        })?;

        import(xml, "$(VCTargetsPath)\\Microsoft.Cpp.Default.props")?;

        for config in configs {
            let cond = condition(config);
            let attrs = [("Condition", cond.as_str()), ("Label", "Configuration")];
            xml.element("PropertyGroup", &attrs, |xml| {
                xml.leaf("ConfigurationType", configuration_type(project))?;
                xml.leaf("UseDebugLibraries", use_debug_libraries(config))?;
                xml.leaf("PlatformToolset", PLATFORM_TOOLSET)?;
                xml.leaf("CharacterSet", "MultiByte")
            })?;
        }

        import(xml, "$(VCTargetsPath)\\Microsoft.Cpp.props")?;
        xml.empty("ImportGroup", &[("Label", "ExtensionSettings")])?;
        xml.empty("ImportGroup", &[("Label", "Shared")])?;

        for config in configs {
            let cond = condition(config);
            xml.element(
                "ImportGroup",
                &[("Label", "PropertySheets"), ("Condition", cond.as_str())],
                |xml| {
                    xml.empty(
                        "Import",
                        &[
                            ("Project", "$(UserRootDir)\\Microsoft.Cpp.$(Platform).user.props"),
                            (
                                "Condition",
                                "exists('$(UserRootDir)\\Microsoft.Cpp.$(Platform).user.props')",
                            ),
                            ("Label", "LocalAppDataPlatform"),
                        ],
                    )
                },
            )?;
        }

        xml.empty("PropertyGroup", &[("Label", "UserMacros")])?;

        for config in configs {
            xml.element("PropertyGroup", &[("Condition", condition(config).as_str())], |xml| {
                if let Some(path) = include_path(project, config) {
                    xml.leaf("IncludePath", &path)?;
                }
                xml.leaf("PreprocessorDefinitions", &preprocessor_definitions(config))
            })?;
        }

        for config in configs {
            item_definitions(xml, config)?;
        }

        if !project.source_files().is_empty() {
            xml.element("ItemGroup", &[], |xml| {
                for file in project.source_files() {
                    xml.empty("ClCompile", &[("Include", to_windows_path(file).as_str())])?;
                }
                Ok(())
            })?;
        }

        import(xml, "$(VCTargetsPath)\\Microsoft.Cpp.targets")?;
        xml.empty("ImportGroup", &[("Label", "ExtensionTargets")])
    })?;

    xml.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Language, LibraryType, Optimization, ProjectType};

    fn guid() -> Guid {
        Guid::from_bytes([0x11; 16])
    }

    fn sample_project() -> Project {
        let mut project = Project::new("P");
        project.add_source_files(["src/main.cpp", "src/util/io.cpp"]);
        project.add_configuration(Configuration::debug("Debug"));
        project.add_configuration(Configuration::release("Release"));
        project
    }

    #[test]
    fn test_configurations_and_globals() {
        let xml = render(&sample_project(), guid()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Project DefaultTargets=\"Build\" ToolsVersion=\"17.0\""));
        assert!(xml.contains("<ProjectConfiguration Include=\"Debug|x64\">"));
        assert!(xml.contains("<ProjectConfiguration Include=\"Release|x64\">"));
        assert!(xml.contains("<ProjectGuid>{11111111-1111-1111-1111-111111111111}</ProjectGuid>"));
        assert!(xml.contains("<RootNamespace>P</RootNamespace>"));
        assert!(xml.contains("<Platform>x64</Platform>"));
        assert!(xml.contains("<PlatformToolset>v143</PlatformToolset>"));
        assert_eq!(
            xml.matches("Condition=\"'$(Configuration)|$(Platform)'=='Debug|x64'\"").count(),
            4
        );
    }

    #[test]
    fn test_optimization_and_debug_symbols() {
        let xml = render(&sample_project(), guid()).unwrap();

        let debug_at = xml.find("<Optimization>Disabled</Optimization>").unwrap();
        let release_at = xml.find("<Optimization>Full</Optimization>").unwrap();
        assert!(debug_at < release_at);
        assert!(xml.contains("<PreprocessorDefinitions>_DEBUG;%(PreprocessorDefinitions)</PreprocessorDefinitions>"));
        assert!(xml.contains("<PreprocessorDefinitions>NDEBUG;%(PreprocessorDefinitions)</PreprocessorDefinitions>"));
        assert!(xml.contains("<UseDebugLibraries>true</UseDebugLibraries>"));
        assert!(xml.contains("<UseDebugLibraries>false</UseDebugLibraries>"));
    }

    #[test]
    fn test_sources_are_backslashed_and_ordered() {
        let xml = render(&sample_project(), guid()).unwrap();

        let main = xml.find("<ClCompile Include=\"src\\main.cpp\"/>").unwrap();
        let io = xml.find("<ClCompile Include=\"src\\util\\io.cpp\"/>").unwrap();
        assert!(main < io);
        assert!(!xml.contains("src/main.cpp"));
    }

    #[test]
    fn test_include_path_merges_project_then_configuration() {
        let mut project = Project::new("P");
        project.add_include_dirs(["include", "third_party/x"]);
        let mut config = Configuration::debug("Debug");
        config.add_include_dirs(["gen/debug"]);
        project.add_configuration(config);

        let xml = render(&project, guid()).unwrap();
        assert!(xml.contains(
            "<IncludePath>include;third_party\\x;gen\\debug;$(IncludePath)</IncludePath>"
        ));
    }

    #[test]
    fn test_include_path_omitted_when_empty() {
        let xml = render(&sample_project(), guid()).unwrap();
        assert!(!xml.contains("<IncludePath>"));
    }

    #[test]
    fn test_defines_and_extra_flags() {
        let mut project = Project::new("P");
        let mut config = Configuration::new("Profile");
        config
            .set_optimization(Optimization::Level2)
            .add_define("WIN32_LEAN_AND_MEAN", "")
            .add_define("VERSION", "3")
            .add_compiler_flags(["/W4", "/permissive-"])
            .add_linker_flags(["/LTCG"]);
        project.add_configuration(config);

        let xml = render(&project, guid()).unwrap();
        assert!(xml.contains("<PreprocessorDefinitions>WIN32_LEAN_AND_MEAN;VERSION;NDEBUG;%(PreprocessorDefinitions)</PreprocessorDefinitions>"));
        assert!(xml.contains("<Optimization>MaxSpeed</Optimization>"));
        assert!(xml.contains("<AdditionalOptions>/W4 /permissive- %(AdditionalOptions)</AdditionalOptions>"));
        assert!(xml.contains("<AdditionalOptions>/LTCG %(AdditionalOptions)</AdditionalOptions>"));
    }

    #[test]
    fn test_no_flags_means_no_additional_options() {
        let xml = render(&sample_project(), guid()).unwrap();
        assert!(!xml.contains("AdditionalOptions"));
        assert!(xml.contains("<Link/>"));
        assert!(!xml.contains("<ItemGroup/>"));
    }

    #[test]
    fn test_library_kinds() {
        let mut project = Project::new("L");
        project
            .set_type(ProjectType::Library)
            .set_library_type(LibraryType::Static)
            .add_configuration(Configuration::release("Release"));
        assert!(render(&project, guid()).unwrap().contains("<ConfigurationType>StaticLibrary</ConfigurationType>"));

        project.set_library_type(LibraryType::Shared);
        assert!(render(&project, guid()).unwrap().contains("<ConfigurationType>DynamicLibrary</ConfigurationType>"));
    }

    #[test]
    fn test_project_without_sources_or_configurations() {
        let xml = render(&Project::new("Bare"), guid()).unwrap();
        assert!(xml.contains("<ItemGroup Label=\"ProjectConfigurations\">\n  </ItemGroup>"));
        assert!(!xml.contains("Condition=\"'$(Configuration)"));
        assert!(xml.ends_with("</Project>\n"));
    }

    #[test]
    fn test_language_does_not_change_descriptor() {
        let mut cpp = sample_project();
        cpp.set_language(Language::Cpp);
        let mut c = sample_project();
        c.set_language(Language::C);

        assert_eq!(render(&c, guid()).unwrap(), render(&cpp, guid()).unwrap());
    }

    #[test]
    fn test_values_are_escaped() {
        let mut project = Project::new("P");
        let mut config = Configuration::new("A&B");
        config.add_define("X<Y", "").add_compiler_flags(["/D\"Q\""]);
        project.add_configuration(config);

        let xml = render(&project, guid()).unwrap();
        assert!(xml.contains("<ProjectConfiguration Include=\"A&amp;B|x64\">"));
        assert!(xml.contains("<Configuration>A&amp;B</Configuration>"));
        assert!(xml.contains("<PreprocessorDefinitions>X&lt;Y;NDEBUG;"));
        assert!(xml.contains("<AdditionalOptions>/D\"Q\" %(AdditionalOptions)</AdditionalOptions>"));
    }
}
