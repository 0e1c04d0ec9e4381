//! `.sln` rendering.
//!
//! The solution format is line based and uses CRLF line endings throughout,
//! including after the final `EndGlobal`.

use crate::core::Project;
use crate::export::vs::guid::Guid;
use crate::export::vs::PLATFORM;

/// Project type id Visual Studio uses for C/C++ projects.
pub const VC_PROJECT_TYPE: &str = "{8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942}";

struct Lines(String);

impl Lines {
    fn line(&mut self, line: impl AsRef<str>) {
        self.0.push_str(line.as_ref());
        self.0.push_str("\r\n");
    }
}

/// Distinct configuration names across all projects, in first-seen order.
fn solution_configurations<'a>(projects: &[(&'a Project, Guid)]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for &(project, _) in projects {
        for config in project.configurations() {
            if !names.contains(&config.name()) {
                names.push(config.name());
            }
        }
    }
    names
}

/// Render the solution referencing every project by name and identifier.
pub fn render(projects: &[(&Project, Guid)]) -> String {
    let mut out = Lines(String::new());

    out.line("Microsoft Visual Studio Solution File, Format Version 12.00");
    out.line("# Visual Studio Version 17");
    out.line("VisualStudioVersion = 17.0.31903.59");
    out.line("MinimumVisualStudioVersion = 10.0.40219.1");

    for (project, guid) in projects {
        out.line(format!(
            "Project(\"{}\") = \"{}\", \"{}.vcxproj\", \"{}\"",
            VC_PROJECT_TYPE,
            project.name(),
            project.name(),
            guid
        ));
        out.line("EndProject");
    }

    out.line("Global");

    out.line("\tGlobalSection(SolutionConfigurationPlatforms) = preSolution");
    for name in solution_configurations(projects) {
        out.line(format!("\t\t{0}|{1} = {0}|{1}", name, PLATFORM));
    }
    out.line("\tEndGlobalSection");

    out.line("\tGlobalSection(ProjectConfigurationPlatforms) = postSolution");
    for (project, guid) in projects {
        for config in project.configurations() {
            let name = config.name();
            out.line(format!("\t\t{0}.{1}|{2}.ActiveCfg = {1}|{2}", guid, name, PLATFORM));
            out.line(format!("\t\t{0}.{1}|{2}.Build.0 = {1}|{2}", guid, name, PLATFORM));
        }
    }
    out.line("\tEndGlobalSection");

    out.line("\tGlobalSection(SolutionProperties) = preSolution");
    out.line("\t\tHideSolutionNode = FALSE");
    out.line("\tEndGlobalSection");

    out.line("EndGlobal");

    out.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Configuration;

    fn project(name: &str, configs: &[&str]) -> Project {
        let mut project = Project::new(name);
        for config in configs {
            project.add_configuration(Configuration::new(*config));
        }
        project
    }

    #[test]
    fn test_full_layout() {
        let p = project("P", &["Debug", "Release"]);
        let guid = Guid::from_bytes([0x22; 16]);
        let sln = render(&[(&p, guid)]);

        let g = "{22222222-2222-2222-2222-222222222222}";
        let expected = [
            "Microsoft Visual Studio Solution File, Format Version 12.00".to_string(),
            "# Visual Studio Version 17".to_string(),
            "VisualStudioVersion = 17.0.31903.59".to_string(),
            "MinimumVisualStudioVersion = 10.0.40219.1".to_string(),
            format!("Project(\"{{8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942}}\") = \"P\", \"P.vcxproj\", \"{}\"", g),
            "EndProject".to_string(),
            "Global".to_string(),
            "\tGlobalSection(SolutionConfigurationPlatforms) = preSolution".to_string(),
            "\t\tDebug|x64 = Debug|x64".to_string(),
            "\t\tRelease|x64 = Release|x64".to_string(),
            "\tEndGlobalSection".to_string(),
            "\tGlobalSection(ProjectConfigurationPlatforms) = postSolution".to_string(),
            format!("\t\t{}.Debug|x64.ActiveCfg = Debug|x64", g),
            format!("\t\t{}.Debug|x64.Build.0 = Debug|x64", g),
            format!("\t\t{}.Release|x64.ActiveCfg = Release|x64", g),
            format!("\t\t{}.Release|x64.Build.0 = Release|x64", g),
            "\tEndGlobalSection".to_string(),
            "\tGlobalSection(SolutionProperties) = preSolution".to_string(),
            "\t\tHideSolutionNode = FALSE".to_string(),
            "\tEndGlobalSection".to_string(),
            "EndGlobal".to_string(),
        ];

        assert_eq!(sln, format!("{}\r\n", expected.join("\r\n")));
    }

    #[test]
    fn test_solution_configurations_are_unique_in_first_seen_order() {
        let a = project("A", &["Release", "Debug"]);
        let b = project("B", &["Debug", "Profile"]);
        let sln = render(&[
            (&a, Guid::from_bytes([1; 16])),
            (&b, Guid::from_bytes([2; 16])),
        ]);

        let declared: Vec<&str> = sln
            .lines()
            .filter(|l| l.starts_with("\t\t") && !l.contains('{') && l.contains(" = "))
            .filter(|l| !l.contains("HideSolutionNode"))
            .collect();
        assert_eq!(
            declared,
            [
                "\t\tRelease|x64 = Release|x64",
                "\t\tDebug|x64 = Debug|x64",
                "\t\tProfile|x64 = Profile|x64",
            ]
        );
        assert_eq!(sln.matches(".ActiveCfg = ").count(), 4);
        assert_eq!(sln.matches("EndProject\r\n").count(), 2);
    }

    #[test]
    fn test_every_line_is_crlf_terminated() {
        let p = project("P", &["Debug"]);
        let sln = render(&[(&p, Guid::from_bytes([3; 16]))]);
        assert!(sln.ends_with("EndGlobal\r\n"));
        assert_eq!(sln.matches('\n').count(), sln.matches("\r\n").count());
    }
}
