//! Output destination for generated identifiers.

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Where identifiers are written: standard output or a freshly created file.
///
/// File output is buffered; `BufWriter` flushes on drop, so early returns
/// still push out completed lines. Callers flush explicitly on success to
/// surface write errors.
pub enum Sink {
    Stdout(Stdout),
    File(BufWriter<File>),
}

impl Sink {
    /// Open the destination once. `None` or an empty path selects stdout;
    /// an existing file is truncated.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if !p.as_os_str().is_empty() => {
                let file = File::create(p).map_err(|e| {
                    Error::io(format!("creating output file {}", p.display()), e)
                })?;
                tracing::debug!(path = %p.display(), "writing to file");
                Ok(Sink::File(BufWriter::new(file)))
            }
            _ => Ok(Sink::Stdout(io::stdout())),
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Sink::Stdout(_))
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(out) => out.write(buf),
            Sink::File(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.flush(),
            Sink::File(out) => out.flush(),
        }
    }
}
