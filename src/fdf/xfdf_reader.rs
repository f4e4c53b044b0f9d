//! XFDF reader.
//!
//! Parses the `<fields>` section of an XFDF document into an ordered
//! name → value mapping. Nested `<field>` elements are flattened into
//! dotted names (`address.city`), the form pdftk and AcroForm use for fully
//! qualified names. Annotations and other XFDF sections are skipped.

use crate::error::{Error, Result};
use crate::forms::FieldValues;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XFDF reader.
pub struct XfdfReader;

impl XfdfReader {
    /// Parse XFDF XML into field values.
    ///
    /// Fields with no `<value>` element are omitted. A field with several
    /// `<value>` elements (multi-select lists) keeps the last one.
    pub fn parse(xml: &str) -> Result<FieldValues> {
        let mut reader = Reader::from_str(xml);
        // Whitespace inside <value> is significant, so text is not trimmed.
        reader.trim_text(false);

        let mut values = FieldValues::new();
        let mut name_stack: Vec<String> = Vec::new();
        let mut in_value = false;
        let mut current_value = String::new();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"field" => name_stack.push(Self::name_attribute(e)?),
                    b"value" if !name_stack.is_empty() => {
                        in_value = true;
                        current_value.clear();
                    },
                    _ => {},
                },
                Event::Empty(ref e) => match e.local_name().as_ref() {
                    b"value" if !name_stack.is_empty() => {
                        values.insert(name_stack.join("."), String::new());
                    },
                    b"field" => {
                        // A self-closing field carries no value.
                        Self::name_attribute(e)?;
                    },
                    _ => {},
                },
                Event::Text(ref e) if in_value => {
                    current_value.push_str(&e.unescape()?);
                },
                Event::CData(ref e) if in_value => {
                    current_value.push_str(&String::from_utf8_lossy(e));
                },
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"value" if in_value => {
                        in_value = false;
                        values.insert(name_stack.join("."), std::mem::take(&mut current_value));
                    },
                    b"field" => {
                        name_stack.pop();
                    },
                    _ => {},
                },
                Event::Eof => break,
                _ => {},
            }
        }

        log::debug!("Read {} XFDF field values", values.len());
        Ok(values)
    }

    fn name_attribute(e: &BytesStart<'_>) -> Result<String> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| Error::Xml(err.into()))?;
            if attr.key.as_ref() == b"name" {
                return Ok(attr.unescape_value()?.into_owned());
            }
        }
        Err(Error::InvalidArgument("XFDF <field> without name attribute".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fdf::XfdfWriter;

    #[test]
    fn test_parse_flat_fields() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<xfdf xmlns="http://ns.adobe.com/xfdf/" xml:space="preserve">
  <fields>
    <field name="name"><value>Jane</value></field>
    <field name="agree"><value>Yes</value></field>
  </fields>
</xfdf>"#;
        let values = XfdfReader::parse(xml).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values["name"], "Jane");
        assert_eq!(values["agree"], "Yes");
    }

    #[test]
    fn test_parse_nested_fields() {
        let xml = r#"<xfdf><fields>
            <field name="address">
              <field name="street"><value>1 Main St</value></field>
              <field name="city"><value>Anytown</value></field>
            </field>
        </fields></xfdf>"#;
        let values = XfdfReader::parse(xml).unwrap();
        let names: Vec<_> = values.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["address.street", "address.city"]);
        assert_eq!(values["address.city"], "Anytown");
    }

    #[test]
    fn test_value_whitespace_and_entities_preserved() {
        let xml = r#"<xfdf><fields><field name="n"><value>  a &amp; b  </value></field></fields></xfdf>"#;
        let values = XfdfReader::parse(xml).unwrap();
        assert_eq!(values["n"], "  a & b  ");
    }

    #[test]
    fn test_field_without_value_is_omitted() {
        let xml = r#"<xfdf><fields><field name="blank"></field><field name="e"><value/></field></fields></xfdf>"#;
        let values = XfdfReader::parse(xml).unwrap();
        assert!(!values.contains_key("blank"));
        assert_eq!(values["e"], "");
    }

    #[test]
    fn test_field_without_name_is_error() {
        let xml = r#"<xfdf><fields><field><value>x</value></field></fields></xfdf>"#;
        assert!(XfdfReader::parse(xml).is_err());
    }

    #[test]
    fn test_writer_output_reads_back() {
        let mut writer = XfdfWriter::new().with_file_spec("form.pdf");
        writer.add_field("company", "Smith & Jones <Consulting>");
        writer.add_field("city", "Zürich");
        let values = XfdfReader::parse(&writer.to_xml()).unwrap();
        assert_eq!(values["company"], "Smith & Jones <Consulting>");
        assert_eq!(values["city"], "Zürich");
    }
}
