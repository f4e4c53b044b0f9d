//! Lazily loaded form over a PDF template.

use crate::config::PdftkConfig;
use crate::error::{Error, Result};
use crate::fdf::{FdfWriter, XfdfReader, XfdfWriter};
use crate::forms::field::{Field, FieldType};
use crate::forms::FieldValues;
use crate::pdftk::runner::{CommandRunner, ProcessRunner};
use crate::pdftk::wrapper::{same_file, PdftkWrapper};
use std::path::{Path, PathBuf};

/// The fillable fields of one PDF template.
///
/// Fields are fetched from pdftk on first access and cached for the life of
/// the `Form`; later changes to the file on disk are not picked up unless
/// [`Form::reload`] is called.
///
/// # Example
///
/// ```no_run
/// use pdftk_forms::Form;
///
/// let mut form = Form::open("application.pdf");
/// form.set("applicant.name", "Jane Doe")?;
/// form.dummy_filling()?;
/// let filled = form.save(None)?;
/// println!("wrote {}", filled.display());
/// # Ok::<(), pdftk_forms::Error>(())
/// ```
#[derive(Debug)]
pub struct Form<R = ProcessRunner> {
    template: PathBuf,
    wrapper: PdftkWrapper<R>,
    fields: Option<Vec<Field>>,
}

impl Form<ProcessRunner> {
    /// Open a template using `PdftkConfig::from_env()`.
    ///
    /// Nothing is executed until fields are first needed.
    pub fn open(template: impl Into<PathBuf>) -> Self {
        Self::new(template, PdftkWrapper::new(PdftkConfig::from_env()))
    }
}

impl<R: CommandRunner> Form<R> {
    /// Create a form backed by the given wrapper.
    pub fn new(template: impl Into<PathBuf>, wrapper: PdftkWrapper<R>) -> Self {
        Self {
            template: template.into(),
            wrapper,
            fields: None,
        }
    }

    /// Template path.
    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Whether fields have been fetched.
    pub fn is_loaded(&self) -> bool {
        self.fields.is_some()
    }

    /// Drop cached fields and edits; the next access asks pdftk again.
    pub fn reload(&mut self) {
        self.fields = None;
    }

    /// All fields, in declaration order.
    pub fn fields(&mut self) -> Result<&[Field]> {
        Ok(self.load()?.as_slice())
    }

    /// Names of all fields, in declaration order.
    pub fn field_names(&mut self) -> Result<Vec<&str>> {
        Ok(self.load()?.iter().map(|f| f.name.as_str()).collect())
    }

    /// Look up a field by its fully qualified name.
    pub fn get(&mut self, name: &str) -> Result<Option<&Field>> {
        Ok(self.load()?.iter().find(|f| f.name == name))
    }

    /// Current value of a field; `None` if the field is missing or unset.
    pub fn value(&mut self, name: &str) -> Result<Option<&str>> {
        Ok(self.get(name)?.and_then(Field::value))
    }

    /// Set a field's value.
    ///
    /// Returns `false` without changing anything when the field does not
    /// exist or is read-only.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<bool> {
        let Some(field) = self.load()?.iter_mut().find(|f| f.name == name) else {
            log::debug!("No field named {:?}", name);
            return Ok(false);
        };
        if field.is_read_only() {
            log::debug!("Field {:?} is read-only", name);
            return Ok(false);
        }
        field.value = Some(value.into());
        Ok(true)
    }

    /// Name → value mapping.
    ///
    /// Without `full`, fields with no value or an empty value are left out.
    /// With `full`, every field appears and missing values become `""`.
    pub fn to_h(&mut self, full: bool) -> Result<FieldValues> {
        Ok(self
            .load()?
            .iter()
            .filter(|f| full || f.has_value())
            .map(|f| (f.name.clone(), f.value.clone().unwrap_or_default()))
            .collect())
    }

    /// FDF document for [`Form::to_h`], referencing the template.
    pub fn to_fdf(&mut self, full: bool) -> Result<FdfWriter> {
        let values = self.to_h(full)?;
        Ok(FdfWriter::from_values(&values).with_file_spec(self.file_spec()))
    }

    /// XFDF document for [`Form::to_h`], referencing the template.
    pub fn to_xfdf(&mut self, full: bool) -> Result<XfdfWriter> {
        let values = self.to_h(full)?;
        Ok(XfdfWriter::from_values(&values).with_file_spec(self.file_spec()))
    }

    /// Fill every writable text field with its own name.
    ///
    /// Handy for finding out which box on the page is which field. Returns
    /// the number of fields changed.
    pub fn dummy_filling(&mut self) -> Result<usize> {
        let mut changed = 0;
        for field in self.load()?.iter_mut() {
            if field.field_type == FieldType::Text && !field.is_read_only() {
                field.value = Some(field.name.clone());
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Apply values from an XFDF document through [`Form::set`].
    ///
    /// Unknown and read-only fields are skipped. Returns the number of
    /// fields changed.
    pub fn load_xfdf(&mut self, xml: &str) -> Result<usize> {
        let mut changed = 0;
        for (name, value) in XfdfReader::parse(xml)? {
            if self.set(&name, value)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Write a filled copy of the template.
    ///
    /// With no `path`, writes next to the template using the configured
    /// suffix (`form.pdf` becomes `form_filled.pdf`). A `path` naming the
    /// template itself goes through [`Form::save_in_place`]. Returns the path
    /// written.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let output = match path {
            Some(p) => p.to_path_buf(),
            None => default_output_path(&self.template, &self.wrapper.config().fill_suffix),
        };
        if same_file(&self.template, &output) {
            self.save_in_place()?;
            return Ok(output);
        }
        let values = self.assigned_values()?;
        self.wrapper.fill_form(&self.template, &output, &values)?;
        Ok(output)
    }

    /// Fill the template and replace it with the result.
    pub fn save_in_place(&mut self) -> Result<()> {
        let dir = match self.template.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp = tempfile::Builder::new()
            .prefix(".pdftk-forms")
            .suffix(".pdf")
            .tempfile_in(&dir)?;

        let values = self.assigned_values()?;
        self.wrapper.fill_form(&self.template, tmp.path(), &values)?;
        tmp.persist(&self.template).map_err(|e| Error::Io(e.error))?;
        log::info!("Replaced {}", self.template.display());
        Ok(())
    }

    /// Values sent to pdftk on save: every field holding a value, including
    /// empty strings so cleared fields are cleared in the output.
    fn assigned_values(&mut self) -> Result<FieldValues> {
        Ok(self
            .load()?
            .iter()
            .filter_map(|f| f.value.as_ref().map(|v| (f.name.clone(), v.clone())))
            .collect())
    }

    fn file_spec(&self) -> String {
        self.template.to_string_lossy().into_owned()
    }

    fn load(&mut self) -> Result<&mut Vec<Field>> {
        if self.fields.is_none() {
            let mut fields = self.wrapper.fields(&self.template)?;
            dedup_by_name(&mut fields);
            self.fields = Some(fields);
        }
        Ok(self.fields.get_or_insert_with(Vec::new))
    }
}

/// Keep the first field for each name.
fn dedup_by_name(fields: &mut Vec<Field>) {
    let mut seen = std::collections::HashSet::new();
    fields.retain(|f| {
        let first = seen.insert(f.name.clone());
        if !first {
            log::warn!("Ignoring duplicate field {:?}", f.name);
        }
        first
    });
}

/// Template path with `suffix` appended to the file stem.
///
/// ```
/// use pdftk_forms::forms::default_output_path;
/// use std::path::Path;
///
/// assert_eq!(
///     default_output_path(Path::new("docs/form.pdf"), "_filled"),
///     Path::new("docs/form_filled.pdf")
/// );
/// ```
pub fn default_output_path(template: &Path, suffix: &str) -> PathBuf {
    let mut name = template.file_stem().unwrap_or_default().to_os_string();
    name.push(suffix);
    if let Some(ext) = template.extension() {
        name.push(".");
        name.push(ext);
    }
    template.with_file_name(name)
}
