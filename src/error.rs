//! Error types for the pdftk form wrapper.
//!
//! This module defines all error types that can occur while invoking pdftk,
//! parsing its field dumps, and reading or writing form data files.

use std::path::PathBuf;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while working with pdftk forms.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The pdftk binary could not be started
    #[error("pdftk binary not found at '{}'", .path.display())]
    PdftkNotFound {
        /// Program path that was attempted
        path: PathBuf,
    },

    /// pdftk ran but exited unsuccessfully
    #[error("pdftk exited with {}: {stderr}", describe_status(.status))]
    PdftkFailed {
        /// Exit code, `None` if the process was killed by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// Malformed line in pdftk field dump output
    #[error("Invalid field dump at line {line}: {reason}")]
    InvalidDump {
        /// 1-based line number within the dump
        line: usize,
        /// Reason for parse failure
        reason: String,
    },

    /// Caller supplied an argument pdftk cannot accept
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// XML reading error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = Error::PdftkNotFound {
            path: PathBuf::from("/opt/bin/pdftk"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("not found"));
        assert!(msg.contains("/opt/bin/pdftk"));
    }

    #[test]
    fn test_failed_error_with_status() {
        let err = Error::PdftkFailed {
            status: Some(1),
            stderr: "Error: Unable to find file.".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("status 1"));
        assert!(msg.contains("Unable to find file"));
    }

    #[test]
    fn test_failed_error_from_signal() {
        let err = Error::PdftkFailed {
            status: None,
            stderr: String::new(),
        };
        assert!(format!("{}", err).contains("signal"));
    }

    #[test]
    fn test_invalid_dump_error() {
        let err = Error::InvalidDump {
            line: 12,
            reason: "bad flags".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("12"));
        assert!(msg.contains("bad flags"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
