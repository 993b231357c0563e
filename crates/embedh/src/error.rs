use std::path::PathBuf;

use thiserror::Error;

/// Conversion errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read input {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot write output {}: {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Emit error: {0}")]
    Emit(#[from] embedh_emit::EmitError),
}

impl Error {
    pub(crate) fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnreadable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputUnwritable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
