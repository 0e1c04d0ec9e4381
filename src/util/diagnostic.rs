//! User-friendly diagnostic messages.
//!
//! Every error shown to the user should say what went wrong, where, and
//! what to try next.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str =
        "help: Run `makeforge --init` to create a starter Forge.toml, or pass `--entrypoint <PATH>`";

    /// Suggestion when the workspace has no projects.
    pub const EMPTY_WORKSPACE: &str = "help: Add at least one [[project]] table to Forge.toml";

    /// Suggestion when a project name cannot be used as a file name.
    pub const INVALID_NAME: &str =
        "help: Project and workspace names become file names; avoid path separators, reserved characters and device names like CON or NUL";

    /// Suggestion when a value cannot be written into an XML document.
    pub const INVALID_XML_CHAR: &str =
        "help: Remove control characters from the project's names, paths, defines and flags";

    /// Suggestion when two projects share a name.
    pub const DUPLICATE_PROJECT: &str =
        "help: Rename one of the projects; each one is written to its own .vcxproj";

    /// Suggestion when the manifest does not parse.
    pub const INVALID_MANIFEST: &str =
        "help: Check the [workspace] and [[project]] tables against `makeforge --init` output";
}

/// An error message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        for suggestion in &self.suggestions {
            output.push_str(&format!("  {}\n", suggestion));
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
