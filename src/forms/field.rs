//! Form field value object.
//!
//! A [`Field`] mirrors one block of pdftk's field dump. Field flags follow
//! ISO 32000-1:2008, Table 221 (Field flags common to all field types).

use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

bitflags! {
    /// Common field flags from the `/Ff` entry.
    ///
    /// Type-specific bits (multiline, radio, combo, ...) are retained as
    /// unnamed bits so the original integer survives a round trip.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct FieldFlags: u32 {
        /// Bit 1: Field is read-only; user cannot change the value
        const READ_ONLY = 1 << 0;

        /// Bit 2: Field is required; must have a value before submit
        const REQUIRED = 1 << 1;

        /// Bit 3: Field should not be exported by submit-form action
        const NO_EXPORT = 1 << 2;
    }
}

impl Default for FieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Field type as reported by pdftk's `FieldType:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// Text field (/Tx)
    Text,
    /// Button field (/Btn) - checkbox, radio button, push button
    Button,
    /// Choice field (/Ch) - list box or combo box
    Choice,
    /// Signature field (/Sig)
    Signature,
    /// Unknown/unrecognized field type
    Unknown(String),
}

impl FieldType {
    /// Parse from the name pdftk prints.
    pub fn from_pdftk_name(name: &str) -> Self {
        match name {
            "Text" => FieldType::Text,
            "Button" => FieldType::Button,
            "Choice" => FieldType::Choice,
            "Signature" => FieldType::Signature,
            other => FieldType::Unknown(other.to_string()),
        }
    }

    /// Name as pdftk prints it.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "Text",
            FieldType::Button => "Button",
            FieldType::Choice => "Choice",
            FieldType::Signature => "Signature",
            FieldType::Unknown(name) => name,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text alignment from the `/Q` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Justification {
    /// Left-aligned (Q = 0)
    Left,
    /// Centered (Q = 1)
    Center,
    /// Right-aligned (Q = 2)
    Right,
}

impl Justification {
    /// Parse from the name pdftk prints.
    pub fn from_pdftk_name(name: &str) -> Option<Self> {
        match name {
            "Left" => Some(Justification::Left),
            "Center" => Some(Justification::Center),
            "Right" => Some(Justification::Right),
            _ => None,
        }
    }
}

/// A single AcroForm field as declared by the template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Fully qualified field name
    pub name: String,
    /// Field type
    pub field_type: FieldType,
    /// Current value, `None` when the field has no /V
    pub value: Option<String>,
    /// Field flags
    pub flags: FieldFlags,
    /// Alternate (tooltip) name from /TU
    pub alt_name: Option<String>,
    /// Default value from /DV
    pub default_value: Option<String>,
    /// Text alignment
    pub justification: Option<Justification>,
    /// Maximum length for text fields
    pub max_length: Option<u32>,
    /// Appearance states for buttons, options for choice fields
    pub options: Vec<String>,
}

impl Field {
    /// Create a field with no value and no flags.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            value: None,
            flags: FieldFlags::empty(),
            alt_name: None,
            default_value: None,
            justification: None,
            max_length: None,
            options: Vec::new(),
        }
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the flags.
    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Add an option (appearance state or choice).
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Whether the field rejects new values.
    pub fn is_read_only(&self) -> bool {
        self.flags.contains(FieldFlags::READ_ONLY)
    }

    /// Whether the field must be filled before submission.
    pub fn is_required(&self) -> bool {
        self.flags.contains(FieldFlags::REQUIRED)
    }

    /// Value as a string slice.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the field holds a non-empty value.
    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }
}
