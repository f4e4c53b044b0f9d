//! AcroForm field model.
//!
//! [`Form`] is the entry point: it lazily asks pdftk for a template's
//! fields, tracks edited values, and writes them back out as a filled PDF or
//! as FDF/XFDF data.

pub mod field;
mod form;

pub use field::{Field, FieldFlags, FieldType, Justification};
pub use form::{default_output_path, Form};

/// Ordered field name → value mapping, in field declaration order.
pub type FieldValues = indexmap::IndexMap<String, String>;
