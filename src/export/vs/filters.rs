//! `.vcxproj.filters` rendering. Every source file goes under one
//! "Source Files" folder.

use crate::core::Project;
use crate::export::vs::guid::Guid;
use crate::export::vs::xml::XmlWriter;
use crate::export::vs::MSBUILD_NAMESPACE;
use crate::export::ExportError;
use crate::util::fs::to_windows_path;

pub const SOURCE_FILTER: &str = "Source Files";

pub fn render(project: &Project, filter_guid: Guid) -> Result<String, ExportError> {
    let mut xml = XmlWriter::new()?;

    let root = [("ToolsVersion", "4.0"), ("xmlns", MSBUILD_NAMESPACE)];
    xml.element("Project", &root, |xml| {
        xml.element("ItemGroup", &[], |xml| {
            xml.element("Filter", &[("Include", SOURCE_FILTER)], |xml| {
                xml.leaf("UniqueIdentifier", &filter_guid.to_string())
            })
        })?;

        if project.source_files().is_empty() {
            return Ok(());
        }
        xml.element("ItemGroup", &[], |xml| {
            for file in project.source_files() {
                let include = to_windows_path(file);
                xml.element("ClCompile", &[("Include", include.as_str())], |xml| {
                    xml.leaf("Filter", SOURCE_FILTER)
                })?;
            }
            Ok(())
        })
    })?;

    xml.finish()
}
