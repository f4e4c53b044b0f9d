// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::inherent_to_string)]

//! # pdftk forms
//!
//! Fill, inspect, and export PDF AcroForms through the
//! [pdftk](https://www.pdflabs.com/tools/pdftk-the-pdf-toolkit/) command-line
//! toolkit.
//!
//! All PDF work (parsing, filling, flattening) happens inside pdftk. This
//! crate builds its argument lists, runs it, and turns its field dump into
//! typed [`Field`] values.
//!
//! ## Features
//!
//! - **Form**: lazily loaded field list with `get`/`set`/`save`
//! - **Field dump parsing**: `dump_data_fields` and `dump_data_fields_utf8`
//! - **Data formats**: FDF and XFDF writers, XFDF reader
//! - **Swappable process layer**: the [`CommandRunner`] trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdftk_forms::{Form, PdftkConfig, PdftkWrapper};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pdftk = PdftkWrapper::new(PdftkConfig::new().with_flatten(true));
//! let mut form = Form::new("w9.pdf", pdftk);
//!
//! for field in form.fields()? {
//!     println!("{}: {:?}", field.name, field.value);
//! }
//!
//! form.set("name", "Jane Doe")?;
//! form.save(Some(Path::new("w9-jane.pdf")))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Field model and the Form facade
pub mod forms;

// pdftk process integration
pub mod pdftk;

// FDF/XFDF form data
pub mod fdf;

// Re-exports
pub use config::{DataFormat, PdftkConfig};
pub use error::{Error, Result};
pub use fdf::{FdfField, FdfWriter, XfdfReader, XfdfWriter};
pub use forms::{Field, FieldFlags, FieldType, FieldValues, Form, Justification};
pub use pdftk::{CommandRunner, PdftkWrapper, ProcessRunner};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdftk_forms");
    }
}
