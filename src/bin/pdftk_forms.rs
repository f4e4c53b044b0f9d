//! Inspect and fill PDF forms through pdftk.
//!
//! Usage:
//!   pdftk-forms fields form.pdf --format json
//!   pdftk-forms fill form.pdf -o out.pdf --set name=Jane --flatten
//!   pdftk-forms xfdf form.pdf --full -o data.xfdf
//!   pdftk-forms dummy form.pdf
//!
//! Set `RUST_LOG=debug` to see the pdftk invocations.

use clap::{Parser, Subcommand, ValueEnum};
use pdftk_forms::{Form, PdftkConfig, PdftkWrapper};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Inspect and fill PDF forms through pdftk.
#[derive(Debug, Parser)]
#[command(name = "pdftk-forms", about, version)]
struct Cli {
    /// pdftk program to run (default: $PDFTK_PATH or `pdftk`)
    #[arg(long, global = true, value_name = "PATH")]
    pdftk: Option<PathBuf>,

    /// Password for encrypted templates
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List form fields
    Fields {
        /// Path to the PDF template
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Fill fields and write a new PDF
    Fill {
        /// Path to the PDF template
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: FILE with `_filled` appended to the stem)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field assignment, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,

        /// Read values from an XFDF file before applying --set
        #[arg(long, value_name = "XFDF")]
        xfdf_input: Option<PathBuf>,

        /// Flatten the output
        #[arg(long)]
        flatten: bool,
    },

    /// Export field values as FDF
    Fdf {
        /// Path to the PDF template
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Include fields without a value
        #[arg(long)]
        full: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export field values as XFDF
    Xfdf {
        /// Path to the PDF template
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Include fields without a value
        #[arg(long)]
        full: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill every text field with its own name
    Dummy {
        /// Path to the PDF template
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: FILE with `_filled` appended to the stem)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {:?}", arg)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = PdftkConfig::from_env();
    if let Some(path) = cli.pdftk {
        config = config.with_path(path);
    }
    if let Some(password) = cli.password {
        config = config.with_input_password(password);
    }

    match cli.command {
        Commands::Fields { file, format } => {
            let mut form = Form::new(file, PdftkWrapper::new(config));
            let fields = form.fields()?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(fields)?),
                OutputFormat::Text => {
                    println!("name\ttype\tvalue\tflags\toptions");
                    for field in fields {
                        println!(
                            "{}\t{}\t{}\t{}\t{}",
                            field.name,
                            field.field_type,
                            field.value.as_deref().unwrap_or(""),
                            field.flags.bits(),
                            field.options.join("; "),
                        );
                    }
                },
            }
        },
        Commands::Fill {
            file,
            output,
            assignments,
            xfdf_input,
            flatten,
        } => {
            let mut form = Form::new(file, PdftkWrapper::new(config.with_flatten(flatten)));
            if let Some(xfdf) = xfdf_input {
                let applied = form.load_xfdf(&std::fs::read_to_string(xfdf)?)?;
                log::info!("Applied {} values from XFDF", applied);
            }
            for (name, value) in assignments {
                if !form.set(&name, value)? {
                    eprintln!("warning: {} is missing or read-only, skipped", name);
                }
            }
            let written = form.save(output.as_deref())?;
            println!("{}", written.display());
        },
        Commands::Fdf { file, full, output } => {
            let mut form = Form::new(file, PdftkWrapper::new(config));
            let bytes = form.to_fdf(full)?.to_bytes()?;
            emit(&bytes, output.as_deref())?;
        },
        Commands::Xfdf { file, full, output } => {
            let mut form = Form::new(file, PdftkWrapper::new(config));
            let bytes = form.to_xfdf(full)?.to_bytes();
            emit(&bytes, output.as_deref())?;
        },
        Commands::Dummy { file, output } => {
            let mut form = Form::new(file, PdftkWrapper::new(config));
            let changed = form.dummy_filling()?;
            let written = form.save(output.as_deref())?;
            println!("{} ({} fields)", written.display(), changed);
        },
    }

    Ok(())
}

fn emit(bytes: &[u8], output: Option<&Path>) -> std::io::Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes),
        None => std::io::stdout().lock().write_all(bytes),
    }
}
