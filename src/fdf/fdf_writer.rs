//! FDF (Forms Data Format) writer implementation.
//!
//! Generates FDF files according to ISO 32000-1:2008 Section 12.7.7, in the
//! layout pdftk's `fill_form` reads.

use crate::error::Result;
use crate::forms::FieldValues;
use std::io::Write;
use std::path::Path;

/// A form field entry for FDF/XFDF export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdfField {
    /// Full qualified field name
    pub name: String,
    /// Field value, `None` to emit the name only
    pub value: Option<String>,
}

impl FdfField {
    /// Create a new field entry.
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Write the field dictionary, e.g. `<< /T (name) /V (value) >>`.
    fn write_dict(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"<< /T ");
        encode_pdf_string(&self.name, out);
        if let Some(ref value) = self.value {
            out.extend_from_slice(b" /V ");
            encode_pdf_string(value, out);
        }
        out.extend_from_slice(b" >>");
    }
}

/// Encode a text string as a PDF literal string.
///
/// ASCII text is written as-is; anything else becomes UTF-16BE with a byte
/// order mark (ISO 32000-1:2008, Section 7.9.2.2). Delimiters and control
/// bytes are escaped in both cases.
fn encode_pdf_string(s: &str, out: &mut Vec<u8>) {
    out.push(b'(');
    if s.is_ascii() {
        escape_bytes(s.as_bytes(), out);
    } else {
        let mut utf16 = vec![0xFE, 0xFF];
        for unit in s.encode_utf16() {
            utf16.extend_from_slice(&unit.to_be_bytes());
        }
        escape_bytes(&utf16, out);
    }
    out.push(b')');
}

fn escape_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    for &b in bytes {
        match b {
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\t' => out.extend_from_slice(b"\\t"),
            _ => out.push(b),
        }
    }
}

/// FDF file writer.
///
/// Generates FDF (Forms Data Format) files for exporting form field data.
///
/// # Example
///
/// ```
/// use pdftk_forms::fdf::{FdfField, FdfWriter};
///
/// let mut writer = FdfWriter::new();
/// writer.add_field(FdfField::new("name", Some("John Doe".into())));
/// writer.add_field(FdfField::new("email", Some("john@example.com".into())));
/// let text = writer.to_string().unwrap();
/// assert!(text.contains("/T (name) /V (John Doe)"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct FdfWriter {
    /// Form fields to export
    fields: Vec<FdfField>,
    /// Original PDF file path (optional, for /F entry)
    file_spec: Option<String>,
}

impl FdfWriter {
    /// Create a new FDF writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an FDF writer from a name → value mapping.
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

    /// Add a field to export.
    pub fn add_field(&mut self, field: FdfField) {
        self.fields.push(field);
    }

    /// Fields queued for export.
    pub fn fields(&self) -> &[FdfField] {
        &self.fields
    }

    /// Write FDF data to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Generate FDF data as bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();

        // FDF header
        writeln!(output, "%FDF-1.2")?;
        // Binary marker (high-bit bytes to indicate binary file)
        output.write_all(b"%")?;
        output.write_all(&[0xe2, 0xe3, 0xcf, 0xd3])?;
        writeln!(output)?;

        // FDF catalog object
        writeln!(output, "1 0 obj")?;
        writeln!(output, "<<")?;
        writeln!(output, "/FDF <<")?;

        if let Some(ref file_spec) = self.file_spec {
            output.write_all(b"/F ")?;
            encode_pdf_string(file_spec, &mut output);
            writeln!(output)?;
        }

        writeln!(output, "/Fields [")?;
        for field in &self.fields {
            field.write_dict(&mut output);
            writeln!(output)?;
        }
        writeln!(output, "]")?;

        writeln!(output, ">>")?;
        writeln!(output, ">>")?;
        writeln!(output, "endobj")?;

        // Trailer
        writeln!(output, "trailer")?;
        writeln!(output, "<< /Root 1 0 R >>")?;
        writeln!(output, "%%EOF")?;

        Ok(output)
    }

    /// Generate FDF data as a string.
    ///
    /// The binary marker and UTF-16 strings are not valid UTF-8 and are
    /// replaced lossily; use [`FdfWriter::to_bytes`] to feed pdftk.
    pub fn to_string(&self) -> Result<String> {
        let bytes = self.to_bytes()?;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(s: &str) -> Vec<u8> {
        let mut out = Vec::new();
        encode_pdf_string(s, &mut out);
        out
    }

    #[test]
    fn test_encode_pdf_string() {
        assert_eq!(encode("Hello"), b"(Hello)");
        assert_eq!(encode("Hello (World)"), b"(Hello \\(World\\))");
        assert_eq!(encode("Line1\nLine2"), b"(Line1\\nLine2)");
        assert_eq!(encode("C:\\temp"), b"(C:\\\\temp)");
    }

    #[test]
    fn test_encode_non_ascii_as_utf16() {
        assert_eq!(encode("é"), vec![b'(', 0xFE, 0xFF, 0x00, 0xE9, b')']);
        // U+0128 has 0x28 '(' as its low byte, which must be escaped
        assert_eq!(encode("Ĩ"), vec![b'(', 0xFE, 0xFF, 0x01, b'\\', 0x28, b')']);
    }

    #[test]
    fn test_fdf_field_dict() {
        let mut out = Vec::new();
        FdfField::new("name", Some("John".into())).write_dict(&mut out);
        assert_eq!(out, b"<< /T (name) /V (John) >>");

        let mut out = Vec::new();
        FdfField::new("blank", None).write_dict(&mut out);
        assert_eq!(out, b"<< /T (blank) >>");
    }

    #[test]
    fn test_fdf_writer_exact_bytes() {
        let mut writer = FdfWriter::new();
        writer.add_field(FdfField::new("test", Some("value".into())));

        let mut expected = b"%FDF-1.2\n%".to_vec();
        expected.extend_from_slice(&[0xe2, 0xe3, 0xcf, 0xd3]);
        expected.extend_from_slice(
            b"\n1 0 obj\n<<\n/FDF <<\n/Fields [\n<< /T (test) /V (value) >>\n]\n>>\n>>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n",
        );
        assert_eq!(writer.to_bytes().unwrap(), expected);
    }

    #[test]
    fn test_from_values_keeps_order() {
        let mut values = FieldValues::new();
        values.insert("b".into(), "2".into());
        values.insert("a".into(), "1".into());
        let writer = FdfWriter::from_values(&values);
        let names: Vec<_> = writer.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
