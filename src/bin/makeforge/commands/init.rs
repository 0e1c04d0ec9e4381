//! `makeforge --init`

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::cli::Cli;
use makeforge::core::manifest::generate_manifest;
use makeforge::core::MANIFEST_NAME;
use makeforge::util::fs::write_string;

/// Workspace name for a new manifest: the name of the directory it lives in.
///
/// Characters that cannot appear in a file name are replaced with `_`, since
/// the workspace name becomes the solution file name.
pub fn workspace_name_for(manifest: &Path, cwd: &Path) -> String {
    let dir = match manifest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
        _ => cwd.to_path_buf(),
    };

    let raw = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("workspace");

    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn execute(cli: &Cli) -> Result<()> {
    let path = cli
        .entrypoint
        .clone()
        .unwrap_or_else(|| PathBuf::from(MANIFEST_NAME));

    if path.exists() {
        bail!("`{}` already exists", path.display());
    }

    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let name = workspace_name_for(&path, &cwd);

    write_string(&path, &generate_manifest(&name))?;
    tracing::debug!("wrote starter manifest to {}", path.display());

    if !cli.quiet {
        eprintln!("     Created `{}` for workspace `{}`", path.display(), name);
    }

    Ok(())
}
