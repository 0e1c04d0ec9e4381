//! JSON exporter - a lossless, order-preserving dump of the build model.
//!
//! Output is a single `<workspace>.json`. Defines are written as a list of
//! `[key, value]` pairs so their order survives a round trip.

use std::path::Path;

use crate::core::Workspace;
use crate::export::{check_file_stem, write_file, ExportError, ExportReport, WorkspaceExporter};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        JsonExporter
    }

    /// Serialize a workspace to pretty-printed JSON.
    pub fn to_json(workspace: &Workspace) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(workspace)?)
    }

    /// Parse a document previously produced by [`JsonExporter::to_json`].
    pub fn from_json(json: &str) -> Result<Workspace, ExportError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl WorkspaceExporter for JsonExporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn check(&self, workspace: &Workspace) -> Result<(), ExportError> {
        check_file_stem("workspace", workspace.name())
    }

    fn render(&self, workspace: &Workspace, output: &Path) -> Result<ExportReport, ExportError> {
        let mut report = ExportReport::default();
        let mut contents = Self::to_json(workspace)?;
        contents.push('\n');

        write_file(
            &mut report,
            output.join(format!("{}.json", workspace.name())),
            &contents,
        )?;

        Ok(report)
    }
}
