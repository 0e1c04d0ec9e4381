//! Default command: load the build description and run a generator.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::Cli;
use makeforge::core::{find_manifest, Manifest};
use makeforge::export::{export, ExportOptions, GuidStrategy};
use makeforge::util::config::{global_config_path, load_config, project_config_path};
use makeforge::util::Config;
use makeforge::Generator;

/// Pick the generator and options: command line first, then config, then defaults.
pub fn resolve_options(cli: &Cli, config: &Config) -> (Generator, ExportOptions) {
    let generator = cli
        .generator
        .or_else(|| config.generator())
        .unwrap_or_default();

    let guids = if cli.stable_guids || config.stable_guids() {
        GuidStrategy::Stable
    } else {
        GuidStrategy::Random
    };

    (generator, ExportOptions { guids })
}

/// The build description given on the command line, or `Forge.toml` in the
/// current directory.
fn entrypoint(cli: &Cli) -> Result<PathBuf> {
    match &cli.entrypoint {
        Some(path) => Ok(path.clone()),
        None => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            Ok(find_manifest(&cwd)?)
        }
    }
}

pub fn execute(cli: &Cli) -> Result<()> {
    let output = cli
        .buildoutput
        .as_deref()
        .context("--buildoutput is required")?;

    let manifest_path = entrypoint(cli)?;
    let manifest = Manifest::load(&manifest_path)?;

    let global = global_config_path();
    let config = load_config(
        global.as_deref(),
        &project_config_path(&manifest.manifest_dir),
    );
    let (generator, options) = resolve_options(cli, &config);

    let workspace = manifest.into_workspace();
    tracing::debug!(
        "loaded workspace `{}` with {} project(s) from {}",
        workspace.name(),
        workspace.projects().len(),
        manifest_path.display()
    );

    let report = export(&workspace, output, generator, &options)?;

    if !cli.quiet {
        eprintln!(
            "    Exported `{}` ({}) -> {}",
            workspace.name(),
            generator,
            output.display()
        );
    }
    for file in &report.files {
        tracing::debug!("  {}", file.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use makeforge::util::config::ExportConfig;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_args(std::iter::once("makeforge").chain(args.iter().copied())).unwrap()
    }

    fn config(generator: Option<&str>, stable_guids: Option<bool>) -> Config {
        Config {
            export: ExportConfig {
                generator: generator.map(str::to_string),
                stable_guids,
            },
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let (generator, options) = resolve_options(&cli(&["-bo", "out"]), &Config::default());
        assert_eq!(generator, Generator::Json);
        assert_eq!(options.guids, GuidStrategy::Random);
    }

    #[test]
    fn test_config_supplies_generator_and_guids() {
        let (generator, options) =
            resolve_options(&cli(&["-bo", "out"]), &config(Some("vs2022"), Some(true)));
        assert_eq!(generator, Generator::Vs2022);
        assert_eq!(options.guids, GuidStrategy::Stable);
    }

    #[test]
    fn test_command_line_wins_over_config() {
        let (generator, options) = resolve_options(
            &cli(&["-bo", "out", "-g", "json", "--stable-guids"]),
            &config(Some("vs2022"), Some(false)),
        );
        assert_eq!(generator, Generator::Json);
        assert_eq!(options.guids, GuidStrategy::Stable);
    }

    #[test]
    fn test_unknown_configured_generator_falls_back_to_default() {
        let (generator, _) = resolve_options(&cli(&["-bo", "out"]), &config(Some("ninja"), None));
        assert_eq!(generator, Generator::default());
    }
}
