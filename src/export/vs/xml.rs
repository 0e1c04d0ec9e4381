//! XML output for MSBuild files, on top of `quick_xml::Writer`.
//!
//! Documents are indented with two spaces. Elements written with
//! [`XmlWriter::empty`] are self-closed, and [`XmlWriter::leaf`] keeps a
//! text-only element on one line.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::export::ExportError;

/// Streaming writer for one XML document.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

fn render_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Render {
        message: e.to_string(),
    }
}

fn start_tag<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attrs {
        let value = escape_attr(value);
        start.push_attribute((key.as_bytes(), value.as_bytes()));
    }
    start
}

impl XmlWriter {
    /// Begin a document with the `utf-8` XML declaration.
    pub fn new() -> Result<Self, ExportError> {
        let mut writer = XmlWriter {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        };
        writer.write(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(writer)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), ExportError> {
        self.inner.write_event(event).map_err(render_error)
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
        self.write(Event::Start(start_tag(name, attrs)))
    }

    pub fn end(&mut self, name: &str) -> Result<(), ExportError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// A self-closed `<name .../>`.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), ExportError> {
        self.write(Event::Empty(start_tag(name, attrs)))
    }

    /// `<name>text</name>` on a single line.
    pub fn leaf(&mut self, name: &str, text: &str) -> Result<(), ExportError> {
        self.start(name, &[])?;
        self.write(Event::Text(BytesText::from_escaped(escape_text(text))))?;
        self.end(name)
    }

    /// Write `<name ...>`, the children produced by `body`, then `</name>`.
    pub fn element<F>(&mut self, name: &str, attrs: &[(&str, &str)], body: F) -> Result<(), ExportError>
    where
        F: FnOnce(&mut Self) -> Result<(), ExportError>,
    {
        self.start(name, attrs)?;
        body(self)?;
        self.end(name)
    }

    /// Finish the document, terminated by a newline.
    pub fn finish(self) -> Result<String, ExportError> {
        let mut out = String::from_utf8(self.inner.into_inner()).map_err(render_error)?;
        out.push('\n');
        Ok(out)
    }
}

/// Escape element content (`&`, `<`, `>`).
pub fn escape_text(s: &str) -> String {
    partial_escape(s).into_owned()
}

/// Escape a double-quoted attribute value. Single quotes are left alone so
/// MSBuild conditions stay readable.
pub fn escape_attr(s: &str) -> String {
    partial_escape(s).replace('"', "&quot;")
}

/// Whether `c` may appear in an XML 1.0 document at all, escaped or not.
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_print_layout() {
        let mut xml = XmlWriter::new().unwrap();
        xml.element("Project", &[("ToolsVersion", "4.0")], |xml| {
            xml.element("ItemGroup", &[], |xml| {
                xml.empty("Filter", &[("Include", "Source Files")])
            })?;
            xml.leaf("Name", "x")?;
            xml.empty("Empty", &[("Label", "Shared")])
        })
        .unwrap();

        assert_eq!(
            xml.finish().unwrap(),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <Project ToolsVersion=\"4.0\">\n  \
               <ItemGroup>\n    \
                 <Filter Include=\"Source Files\"/>\n  \
               </ItemGroup>\n  \
               <Name>x</Name>\n  \
               <Empty Label=\"Shared\"/>\n\
             </Project>\n"
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("a&b<c>\"d'"), "a&amp;b&lt;c&gt;\"d'");
        assert_eq!(escape_attr("say \"hi\" & go"), "say &quot;hi&quot; &amp; go");

        let mut xml = XmlWriter::new().unwrap();
        xml.element("A", &[("Condition", "'$(X)'=='1'")], |xml| xml.leaf("B", "x < y"))
            .unwrap();
        let doc = xml.finish().unwrap();
        assert_eq!(doc.lines().nth(1).unwrap(), "<A Condition=\"'$(X)'=='1'\">");
        assert_eq!(doc.lines().nth(2).unwrap(), "  <B>x &lt; y</B>");
    }

    #[test]
    fn test_xml_chars() {
        assert!(is_xml_char('a'));
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('é'));
        assert!(!is_xml_char('\u{1}'));
        assert!(!is_xml_char('\u{FFFF}'));
    }
}
