//! pdftk command builder.
//!
//! Translates form operations into pdftk argument vectors and hands them to a
//! [`CommandRunner`].

use crate::config::{DataFormat, PdftkConfig};
use crate::error::{Error, Result};
use crate::fdf::{FdfWriter, XfdfWriter};
use crate::forms::field::Field;
use crate::forms::FieldValues;
use crate::pdftk::dump::parse_field_dump;
use crate::pdftk::runner::{CommandRunner, ProcessRunner};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Reads `fill_form` data from standard input.
const STDIN_ARG: &str = "-";

/// pdftk invocation wrapper.
///
/// # Example
///
/// ```no_run
/// use pdftk_forms::{PdftkConfig, PdftkWrapper};
/// use std::path::Path;
///
/// let pdftk = PdftkWrapper::new(PdftkConfig::from_env());
/// for field in pdftk.fields(Path::new("form.pdf"))? {
///     println!("{} ({})", field.name, field.field_type);
/// }
/// # Ok::<(), pdftk_forms::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PdftkWrapper<R = ProcessRunner> {
    config: PdftkConfig,
    runner: R,
}

impl PdftkWrapper<ProcessRunner> {
    /// Create a wrapper that spawns real processes.
    pub fn new(config: PdftkConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }
}

impl<R: CommandRunner> PdftkWrapper<R> {
    /// Create a wrapper over a custom runner.
    pub fn with_runner(config: PdftkConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PdftkConfig {
        &self.config
    }

    /// List the template's fields in declaration order.
    pub fn fields(&self, template: &Path) -> Result<Vec<Field>> {
        let mut args = self.input_args(template);
        args.push(if self.config.utf8_fields {
            "dump_data_fields_utf8".into()
        } else {
            "dump_data_fields".into()
        });

        let stdout = self.runner.run(&self.config.path, &args, None)?;
        let dump = String::from_utf8(stdout)?;
        let fields = parse_field_dump(&dump, !self.config.utf8_fields)?;
        log::debug!("{} declares {} fields", template.display(), fields.len());
        Ok(fields)
    }

    /// List the template's field names in declaration order.
    pub fn field_names(&self, template: &Path) -> Result<Vec<String>> {
        Ok(self.fields(template)?.into_iter().map(|f| f.name).collect())
    }

    /// Fill `template` with `values` and write the result to `output`.
    ///
    /// pdftk cannot overwrite its own input; use
    /// [`Form::save_in_place`](crate::forms::Form::save_in_place) for that.
    pub fn fill_form(&self, template: &Path, output: &Path, values: &FieldValues) -> Result<()> {
        if same_file(template, output) {
            return Err(Error::InvalidArgument(format!(
                "output path {} is the template itself",
                output.display()
            )));
        }

        let data = match self.config.data_format {
            DataFormat::Fdf => FdfWriter::from_values(values).to_bytes()?,
            DataFormat::Xfdf => XfdfWriter::from_values(values).to_bytes(),
        };

        let mut args = self.input_args(template);
        args.push("fill_form".into());
        args.push(STDIN_ARG.into());
        args.push("output".into());
        args.push(output.into());
        if self.config.flatten {
            args.push("flatten".into());
        }
        if self.config.drop_xfa {
            args.push("drop_xfa".into());
        }
        if self.config.need_appearances {
            args.push("need_appearances".into());
        }

        log::info!(
            "Filling {} with {} values into {}",
            template.display(),
            values.len(),
            output.display()
        );
        self.runner.run(&self.config.path, &args, Some(&data))?;
        Ok(())
    }

    /// Concatenate whole documents into `output`.
    pub fn cat<P: AsRef<Path>>(&self, inputs: &[P], output: &Path) -> Result<()> {
        if inputs.is_empty() {
            return Err(Error::InvalidArgument("cat needs at least one input".to_string()));
        }

        let mut args: Vec<OsString> = inputs.iter().map(|p| p.as_ref().into()).collect();
        args.push("cat".into());
        args.push("output".into());
        args.push(output.into());

        self.runner.run(&self.config.path, &args, None)?;
        Ok(())
    }

    /// `<template> [input_pw <password>]`
    fn input_args(&self, template: &Path) -> Vec<OsString> {
        let mut args = vec![template.as_os_str().to_os_string()];
        if let Some(ref password) = self.config.input_password {
            args.push("input_pw".into());
            args.push(password.into());
        }
        args
    }
}

/// Whether two paths name the same file.
///
/// Leading `.` components are ignored; when both paths exist they are
/// compared after canonicalization.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    let lexical = |p: &Path| {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect::<PathBuf>()
    };
    if lexical(a) == lexical(b) {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
