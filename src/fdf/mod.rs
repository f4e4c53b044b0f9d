//! Forms Data Format (FDF) support for exchanging form field values.
//!
//! This module renders form field data to:
//! - **FDF** (Forms Data Format): per ISO 32000-1:2008 Section 12.7.7
//! - **XFDF** (XML Forms Data Format): XML representation of FDF
//!
//! and reads XFDF back into a name → value mapping.
//!
//! ## Example
//!
//! ```
//! use pdftk_forms::fdf::{FdfWriter, XfdfReader, XfdfWriter};
//! use pdftk_forms::FieldValues;
//!
//! let mut values = FieldValues::new();
//! values.insert("name".to_string(), "John Doe".to_string());
//!
//! let fdf = FdfWriter::from_values(&values).to_bytes().unwrap();
//! assert!(fdf.starts_with(b"%FDF-1.2"));
//!
//! let xml = XfdfWriter::from_values(&values).to_xml();
//! assert_eq!(XfdfReader::parse(&xml).unwrap(), values);
//! ```

mod fdf_writer;
mod xfdf_reader;
mod xfdf_writer;

pub use fdf_writer::{FdfField, FdfWriter};
pub use xfdf_reader::XfdfReader;
pub use xfdf_writer::XfdfWriter;
