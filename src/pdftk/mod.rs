//! pdftk process integration.
//!
//! - [`runner`]: the process seam ([`CommandRunner`], [`ProcessRunner`])
//! - [`dump`]: parser for `dump_data_fields` output
//! - [`wrapper`]: argument building for each operation ([`PdftkWrapper`])

pub mod dump;
pub mod runner;
pub mod wrapper;

pub use dump::parse_field_dump;
pub use runner::{CommandRunner, ProcessRunner};
pub use wrapper::PdftkWrapper;
