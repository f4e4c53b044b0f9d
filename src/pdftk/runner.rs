//! Process execution seam.
//!
//! Every pdftk call goes through [`CommandRunner`], so tests can swap in a
//! fake that records arguments and returns canned output.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs an external program to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, feeding `stdin` when given.
    ///
    /// Returns captured standard output on a zero exit status.
    fn run(&self, program: &Path, args: &[OsString], stdin: Option<&[u8]>) -> Result<Vec<u8>>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &Path, args: &[OsString], stdin: Option<&[u8]>) -> Result<Vec<u8>> {
        (**self).run(program, args, stdin)
    }
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[OsString], stdin: Option<&[u8]>) -> Result<Vec<u8>> {
        log::debug!("Running {} {:?}", program.display(), args);

        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => Error::PdftkNotFound {
                    path: program.to_path_buf(),
                },
                _ => Error::Io(e),
            })?;

        // Feed stdin from a second thread while stdout and stderr drain.
        let pipe = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            let writer = stdin.zip(pipe).map(|(input, mut pipe)| {
                // Dropping the handle closes the pipe so pdftk sees EOF.
                scope.spawn(move || pipe.write_all(input))
            });
            let output = child.wait_with_output();
            let written = match writer {
                Some(handle) => handle.join().unwrap_or_else(|_| {
                    Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked"))
                }),
                None => Ok(()),
            };
            (output, written)
        });
        let output = output?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::warn!("{} failed ({}): {}", program.display(), output.status, stderr);
            return Err(Error::PdftkFailed {
                status: output.status.code(),
                stderr,
            });
        }

        match written {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                log::debug!("{} exited before reading all of stdin", program.display());
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(()) => {},
        }

        log::debug!("{} wrote {} bytes", program.display(), output.stdout.len());
        Ok(output.stdout)
    }
}
