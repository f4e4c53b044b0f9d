//! XFDF (XML Forms Data Format) writer implementation.
//!
//! Generates XFDF files according to Adobe XFDF Specification.

use crate::error::Result;
use crate::fdf::fdf_writer::FdfField;
use crate::forms::FieldValues;
use quick_xml::escape::escape;
use std::path::Path;

/// XFDF file writer.
///
/// Generates XFDF (XML Forms Data Format) files for exporting form field data.
/// XFDF is an XML representation of FDF, useful for web integration and
/// human-readable data exchange.
///
/// # Example
///
/// ```
/// use pdftk_forms::fdf::XfdfWriter;
///
/// let mut writer = XfdfWriter::new();
/// writer.add_field("name", "John Doe");
/// writer.add_field("email", "john@example.com");
/// assert!(writer.to_xml().contains("<value>John Doe</value>"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct XfdfWriter {
    /// Form fields to export
    fields: Vec<FdfField>,
    /// Original PDF file path (optional)
    file_spec: Option<String>,
}

impl XfdfWriter {
    /// Create a new XFDF writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an XFDF writer from a name → value mapping.
    pub fn from_values(values: &FieldValues) -> Self {
        Self {
            fields: values
                .iter()
                .map(|(name, value)| FdfField::new(name.clone(), Some(value.clone())))
                .collect(),
            file_spec: None,
        }
    }

    /// Set the file specification (original PDF path).
    pub fn with_file_spec(mut self, path: impl Into<String>) -> Self {
        self.file_spec = Some(path.into());
        self
    }

    /// Add a text field to export.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(FdfField::new(name, Some(value.into())));
    }

    /// Add an FDF field directly.
    pub fn add_fdf_field(&mut self, field: FdfField) {
        self.fields.push(field);
    }

    /// Fields queued for export.
    pub fn fields(&self) -> &[FdfField] {
        &self.fields
    }

    /// Write XFDF data to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_xml())?;
        Ok(())
    }

    /// Generate XFDF XML string.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');

        xml.push_str(r#"<xfdf xmlns="http://ns.adobe.com/xfdf/" xml:space="preserve">"#);
        xml.push('\n');

        if let Some(ref file_spec) = self.file_spec {
            xml.push_str(&format!("  <f href=\"{}\"/>\n", escape(file_spec.as_str())));
        }

        xml.push_str("  <fields>\n");
        for field in &self.fields {
            xml.push_str(&format!("    <field name=\"{}\">\n", escape(field.name.as_str())));
            if let Some(ref value) = field.value {
                xml.push_str(&format!("      <value>{}</value>\n", escape(value.as_str())));
            }
            xml.push_str("    </field>\n");
        }
        xml.push_str("  </fields>\n");
        xml.push_str("</xfdf>\n");

        xml
    }

    /// Generate XFDF as bytes (UTF-8).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xfdf_writer_basic() {
        let mut writer = XfdfWriter::new();
        writer.add_field("name", "John Doe");
        writer.add_field("email", "john@example.com");

        let xml = writer.to_xml();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains("<xfdf xmlns=\"http://ns.adobe.com/xfdf/\" xml:space=\"preserve\">"));
        assert!(xml.contains("    <field name=\"name\">\n      <value>John Doe</value>\n    </field>\n"));
        assert!(xml.contains("<field name=\"email\">"));
        assert!(xml.ends_with("  </fields>\n</xfdf>\n"));
    }

    #[test]
    fn test_xfdf_with_file_spec() {
        let writer = XfdfWriter::new().with_file_spec("forms/a&b.pdf");
        assert!(writer.to_xml().contains("<f href=\"forms/a&amp;b.pdf\"/>"));
    }

    #[test]
    fn test_xfdf_escapes_special_chars() {
        let mut writer = XfdfWriter::new();
        writer.add_field("company", "Smith & Jones <Consulting>");
        writer.add_field("quote\"d", "it's");

        let xml = writer.to_xml();

        assert!(xml.contains("<value>Smith &amp; Jones &lt;Consulting&gt;</value>"));
        assert!(xml.contains("<field name=\"quote&quot;d\">"));
        assert!(xml.contains("<value>it&apos;s</value>"));
    }

    #[test]
    fn test_xfdf_field_without_value() {
        let mut writer = XfdfWriter::new();
        writer.add_fdf_field(FdfField::new("empty", None));
        let xml = writer.to_xml();
        assert!(xml.contains("    <field name=\"empty\">\n    </field>\n"));
        assert!(!xml.contains("<value>"));
    }
}
