//! Error type shared by every command.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A flag value is out of range (non-positive length or count).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The generator rejected its options.
    #[error("generator configuration: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The generator failed while producing an identifier.
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("logging setup: {0}")]
    Logging(String),
}

impl Error {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
