//! makeforge CLI - export C/C++ workspaces to build-tool project files

use std::io::IsTerminal;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;
use makeforge::core::manifest::ManifestError;
use makeforge::util::diagnostic::emit;
use makeforge::ExportError;

fn main() {
    if let Err(e) = run() {
        report(&e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("makeforge=debug")
    } else if cli.quiet {
        EnvFilter::new("makeforge=warn")
    } else {
        EnvFilter::new("makeforge=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    if let Some(shell) = cli.completions {
        return commands::completions::execute(shell);
    }
    if cli.init {
        return commands::init::execute(&cli);
    }
    commands::generate::execute(&cli)
}

/// Print an error, using the friendly diagnostic form for library errors.
fn report(err: &anyhow::Error) {
    let color = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    if let Some(e) = err.downcast_ref::<ExportError>() {
        emit(&e.to_diagnostic(), color);
    } else if let Some(e) = err.downcast_ref::<ManifestError>() {
        emit(&e.to_diagnostic(), color);
    } else {
        eprintln!("error: {:#}", err);
    }
}
