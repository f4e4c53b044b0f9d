//! Configuration for pdftk invocations.

use std::path::PathBuf;

/// Environment variable overriding the pdftk program path.
pub const PDFTK_PATH_ENV: &str = "PDFTK_PATH";

/// Suffix appended to the template stem when saving without an explicit path.
pub const DEFAULT_FILL_SUFFIX: &str = "_filled";

/// Encoding used for the form data piped into `fill_form`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    /// Forms Data Format
    #[default]
    Fdf,
    /// XML Forms Data Format
    Xfdf,
}

/// pdftk invocation configuration.
///
/// # Example
///
/// ```
/// use pdftk_forms::config::{DataFormat, PdftkConfig};
///
/// let config = PdftkConfig::new()
///     .with_path("/usr/local/bin/pdftk")
///     .with_flatten(true)
///     .with_data_format(DataFormat::Xfdf);
/// assert!(config.flatten);
/// ```
#[derive(Debug, Clone)]
pub struct PdftkConfig {
    /// Program to execute.
    pub path: PathBuf,

    /// Flatten the output so fields are no longer editable.
    pub flatten: bool,

    /// Remove XFA data so viewers fall back to the AcroForm.
    pub drop_xfa: bool,

    /// Ask viewers to regenerate field appearances.
    pub need_appearances: bool,

    /// Use `dump_data_fields_utf8` instead of the XML-escaped `dump_data_fields`.
    pub utf8_fields: bool,

    /// Owner or user password for encrypted templates.
    pub input_password: Option<String>,

    /// Format of the data piped into `fill_form`.
    pub data_format: DataFormat,

    /// Suffix used to derive the default output path.
    pub fill_suffix: String,
}

impl Default for PdftkConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PdftkConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("pdftk"),
            flatten: false,
            drop_xfa: false,
            need_appearances: false,
            utf8_fields: true,
            input_password: None,
            data_format: DataFormat::Fdf,
            fill_suffix: DEFAULT_FILL_SUFFIX.to_string(),
        }
    }

    /// Create configuration with defaults, taking the program path from
    /// `PDFTK_PATH` when it is set and non-empty.
    pub fn from_env() -> Self {
        let config = Self::new();
        match std::env::var_os(PDFTK_PATH_ENV) {
            Some(path) if !path.is_empty() => config.with_path(path),
            _ => config,
        }
    }

    /// Set the program path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Flatten filled output.
    pub fn with_flatten(mut self, enable: bool) -> Self {
        self.flatten = enable;
        self
    }

    /// Drop XFA data from filled output.
    pub fn with_drop_xfa(mut self, enable: bool) -> Self {
        self.drop_xfa = enable;
        self
    }

    /// Request appearance regeneration.
    pub fn with_need_appearances(mut self, enable: bool) -> Self {
        self.need_appearances = enable;
        self
    }

    /// Choose the UTF-8 field dump.
    pub fn with_utf8_fields(mut self, enable: bool) -> Self {
        self.utf8_fields = enable;
        self
    }

    /// Set the password used to open the template.
    pub fn with_input_password(mut self, password: impl Into<String>) -> Self {
        self.input_password = Some(password.into());
        self
    }

    /// Set the `fill_form` data format.
    pub fn with_data_format(mut self, format: DataFormat) -> Self {
        self.data_format = format;
        self
    }

    /// Set the default output suffix.
    pub fn with_fill_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.fill_suffix = suffix.into();
        self
    }
}
