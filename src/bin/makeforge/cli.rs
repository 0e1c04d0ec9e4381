//! CLI definitions using clap.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use makeforge::Generator;

/// makeforge - export C/C++ workspaces to build-tool project files
#[derive(Debug, Parser)]
#[command(name = "makeforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Build description to load (default: Forge.toml in the current directory)
    #[arg(long, value_name = "PATH")]
    pub entrypoint: Option<PathBuf>,

    /// Directory that receives the generated files
    #[arg(
        long,
        value_name = "DIR",
        required_unless_present_any = ["init", "completions"]
    )]
    pub buildoutput: Option<PathBuf>,

    /// Generator to run: json, vs2022 (default: json)
    #[arg(short, long, value_name = "NAME")]
    pub generator: Option<Generator>,

    /// Derive project identifiers from names so re-exports are byte-identical
    #[arg(long)]
    pub stable_guids: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Write a starter Forge.toml instead of exporting
    #[arg(long, conflicts_with_all = ["buildoutput", "completions"])]
    pub init: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Parse an explicit argument list, accepting the `-ep`/`-bo` spellings.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Cli::try_parse_from(normalize_args(args))
    }
}

/// Rewrite the two-letter single-dash flags clap cannot express.
///
/// `-ep` becomes `--entrypoint` and `-bo` becomes `--buildoutput`, in both
/// the separate-value and `=value` forms. Nothing after `--` is touched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if after_separator {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                after_separator = true;
                return arg;
            }
            for (short, long) in [("-ep", "--entrypoint"), ("-bo", "--buildoutput")] {
                if s == short {
                    return OsString::from(long);
                }
                if let Some(value) = s.strip_prefix(short).and_then(|r| r.strip_prefix('=')) {
                    return OsString::from(format!("{}={}", long, value));
                }
            }
            arg
        })
        .collect()
}
