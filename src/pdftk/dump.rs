//! Parser for `pdftk dump_data_fields` output.
//!
//! The dump is a sequence of blocks separated by `---` lines:
//!
//! ```text
//! ---
//! FieldType: Text
//! FieldName: employee.name
//! FieldFlags: 2
//! FieldValue: Jane
//! FieldJustification: Left
//! ---
//! FieldType: Button
//! FieldName: agree
//! FieldFlags: 0
//! FieldStateOption: Off
//! FieldStateOption: Yes
//! ```
//!
//! The plain (non-UTF-8) dump escapes text as XML character references;
//! pass `xml_escaped = true` to decode them.

use crate::error::{Error, Result};
use crate::forms::field::{Field, FieldFlags, FieldType, Justification};
use std::borrow::Cow;

const BLOCK_SEPARATOR: &str = "---";

/// Which value a continuation line belongs to.
#[derive(Clone, Copy)]
enum Continues {
    Value,
    DefaultValue,
    AltName,
}

/// Fields accumulated for the block being read.
#[derive(Default)]
struct PendingField {
    name: Option<String>,
    field_type: Option<FieldType>,
    value: Option<String>,
    default_value: Option<String>,
    alt_name: Option<String>,
    flags: FieldFlags,
    justification: Option<Justification>,
    max_length: Option<u32>,
    options: Vec<String>,
    start_line: usize,
    touched: bool,
}

impl PendingField {
    fn finish(self) -> Option<Field> {
        if !self.touched {
            return None;
        }
        let Some(name) = self.name else {
            log::warn!("Dropping field block at line {} without FieldName", self.start_line);
            return None;
        };
        Some(Field {
            name,
            field_type: self.field_type.unwrap_or(FieldType::Unknown(String::new())),
            value: self.value,
            flags: self.flags,
            alt_name: self.alt_name,
            default_value: self.default_value,
            justification: self.justification,
            max_length: self.max_length,
            options: self.options,
        })
    }

    fn slot(&mut self, target: Continues) -> &mut Option<String> {
        match target {
            Continues::Value => &mut self.value,
            Continues::DefaultValue => &mut self.default_value,
            Continues::AltName => &mut self.alt_name,
        }
    }
}

/// Parse pdftk field dump text into fields, in declaration order.
pub fn parse_field_dump(dump: &str, xml_escaped: bool) -> Result<Vec<Field>> {
    let mut fields = Vec::new();
    let mut pending = PendingField {
        start_line: 1,
        ..Default::default()
    };
    let mut continues: Option<Continues> = None;

    for (idx, line) in dump.lines().enumerate() {
        let line_no = idx + 1;

        if line == BLOCK_SEPARATOR {
            let done = std::mem::replace(
                &mut pending,
                PendingField {
                    start_line: line_no + 1,
                    ..Default::default()
                },
            );
            fields.extend(done.finish());
            continues = None;
            continue;
        }

        let Some((key, value)) = split_entry(line) else {
            match continues {
                Some(target) => {
                    let text = decode(line, xml_escaped);
                    let slot = pending.slot(target);
                    let joined = match slot.take() {
                        Some(prev) => format!("{}\n{}", prev, text),
                        None => text.into_owned(),
                    };
                    *slot = Some(joined);
                },
                None if line.trim().is_empty() => {},
                None => log::trace!("Ignoring dump line {}: {:?}", line_no, line),
            }
            continue;
        };

        pending.touched = true;
        continues = None;
        match key {
            "FieldType" => pending.field_type = Some(FieldType::from_pdftk_name(value)),
            "FieldName" => pending.name = Some(decode(value, xml_escaped).into_owned()),
            "FieldNameAlt" => {
                pending.alt_name = Some(decode(value, xml_escaped).into_owned());
                continues = Some(Continues::AltName);
            },
            "FieldValue" => {
                pending.value = Some(decode(value, xml_escaped).into_owned());
                continues = Some(Continues::Value);
            },
            "FieldValueDefault" => {
                pending.default_value = Some(decode(value, xml_escaped).into_owned());
                continues = Some(Continues::DefaultValue);
            },
            "FieldFlags" => {
                pending.flags = FieldFlags::from_bits_retain(parse_u32(value, line_no, key)?);
            },
            "FieldMaxLength" => pending.max_length = Some(parse_u32(value, line_no, key)?),
            "FieldJustification" => pending.justification = Justification::from_pdftk_name(value),
            "FieldStateOption" => pending.options.push(decode(value, xml_escaped).into_owned()),
            _ => log::trace!("Ignoring dump key {} at line {}", key, line_no),
        }
    }
    fields.extend(pending.finish());

    Ok(fields)
}

/// Split `FieldKey: value`. Anything else is a continuation line.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(':')?;
    if !key.starts_with("Field") || !key.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    // pdftk writes exactly one space after the colon; keep the rest verbatim.
    Some((key, rest.strip_prefix(' ').unwrap_or(rest)))
}

fn parse_u32(value: &str, line: usize, key: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| Error::InvalidDump {
        line,
        reason: format!("{} is not an unsigned integer: {:?}", key, value),
    })
}

fn decode(text: &str, xml_escaped: bool) -> Cow<'_, str> {
    if !xml_escaped {
        return Cow::Borrowed(text);
    }
    quick_xml::escape::unescape(text).unwrap_or_else(|e| {
        log::debug!("Keeping raw dump text {:?}: {}", text, e);
        Cow::Borrowed(text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "---\n\
FieldType: Text\n\
FieldName: name\n\
FieldNameAlt: Full name\n\
FieldFlags: 0\n\
FieldValue: Jane Doe\n\
FieldJustification: Left\n\
FieldMaxLength: 40\n\
---\n\
FieldType: Button\n\
FieldName: agree\n\
FieldFlags: 1\n\
FieldValue: Off\n\
FieldJustification: Left\n\
FieldStateOption: Off\n\
FieldStateOption: Yes\n";

    #[test]
    fn test_parse_two_blocks() {
        let fields = parse_field_dump(DUMP, false).unwrap();
        assert_eq!(fields.len(), 2);

        let name = &fields[0];
        assert_eq!(name.name, "name");
        assert_eq!(name.field_type, FieldType::Text);
        assert_eq!(name.value.as_deref(), Some("Jane Doe"));
        assert_eq!(name.alt_name.as_deref(), Some("Full name"));
        assert_eq!(name.max_length, Some(40));
        assert_eq!(name.justification, Some(Justification::Left));
        assert!(!name.is_read_only());

        let agree = &fields[1];
        assert_eq!(agree.field_type, FieldType::Button);
        assert!(agree.is_read_only());
        assert_eq!(agree.options, vec!["Off", "Yes"]);
    }

    #[test]
    fn test_empty_dump() {
        assert!(parse_field_dump("", false).unwrap().is_empty());
        assert!(parse_field_dump("---\n", false).unwrap().is_empty());
    }

    #[test]
    fn test_missing_value_is_none() {
        let fields = parse_field_dump("---\nFieldType: Text\nFieldName: x\nFieldFlags: 0\n", false)
            .unwrap();
        assert_eq!(fields[0].value, None);
    }

    #[test]
    fn test_empty_value_is_some_empty() {
        let fields =
            parse_field_dump("---\nFieldType: Text\nFieldName: x\nFieldValue: \n", false).unwrap();
        assert_eq!(fields[0].value.as_deref(), Some(""));
    }

    #[test]
    fn test_multiline_value() {
        let dump = "---\nFieldType: Text\nFieldName: notes\nFieldValue: line one\nline two\nFieldFlags: 4096\n";
        let fields = parse_field_dump(dump, false).unwrap();
        assert_eq!(fields[0].value.as_deref(), Some("line one\nline two"));
        assert_eq!(fields[0].flags.bits(), 4096);
    }

    #[test]
    fn test_continuation_line_with_colon() {
        let dump = "---\nFieldType: Text\nFieldName: notes\nFieldValue: Dear Sir,\nNote: see below\n";
        let fields = parse_field_dump(dump, false).unwrap();
        assert_eq!(fields[0].value.as_deref(), Some("Dear Sir,\nNote: see below"));
    }

    #[test]
    fn test_value_containing_colon() {
        let dump = "---\nFieldType: Text\nFieldName: time\nFieldValue: 10:30 am\n";
        let fields = parse_field_dump(dump, false).unwrap();
        assert_eq!(fields[0].value.as_deref(), Some("10:30 am"));
    }

    #[test]
    fn test_block_without_name_is_dropped() {
        let dump = "---\nFieldType: Text\nFieldFlags: 0\n---\nFieldType: Text\nFieldName: kept\n";
        let fields = parse_field_dump(dump, false).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "kept");
    }

    #[test]
    fn test_bad_flags_is_error() {
        let err = parse_field_dump("---\nFieldType: Text\nFieldName: x\nFieldFlags: abc\n", false)
            .unwrap_err();
        match err {
            Error::InvalidDump { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_max_length_is_error() {
        let dump = "---\nFieldType: Text\nFieldName: x\nFieldMaxLength: ten\n";
        match parse_field_dump(dump, false).unwrap_err() {
            Error::InvalidDump { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("FieldMaxLength"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_entity_keeps_raw_text() {
        let dump = "---\nFieldType: Text\nFieldName: x\nFieldValue: a &bogus; b\n";
        let fields = parse_field_dump(dump, true).unwrap();
        assert_eq!(fields[0].value.as_deref(), Some("a &bogus; b"));
    }

    #[test]
    fn test_xml_escaped_dump() {
        let dump = "---\nFieldType: Text\nFieldName: caf&#233;\nFieldValue: Smith &amp; Sons\n";
        let fields = parse_field_dump(dump, true).unwrap();
        assert_eq!(fields[0].name, "café");
        assert_eq!(fields[0].value.as_deref(), Some("Smith & Sons"));

        let raw = parse_field_dump(dump, false).unwrap();
        assert_eq!(raw[0].value.as_deref(), Some("Smith &amp; Sons"));
    }

    #[test]
    fn test_crlf_lines() {
        let dump = "---\r\nFieldType: Choice\r\nFieldName: color\r\nFieldStateOption: Red\r\n";
        let fields = parse_field_dump(dump, false).unwrap();
        assert_eq!(fields[0].field_type, FieldType::Choice);
        assert_eq!(fields[0].options, vec!["Red"]);
    }
}
