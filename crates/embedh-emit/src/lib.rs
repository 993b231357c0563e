//! C header emission for embedded binary blobs.
//!
//! Renders a byte sequence as a pair of C declarations:
//!
//! ```text
//! const unsigned char <symbol>[] = {<b0>,<b1>,...};
//! unsigned int <symbol>_len = <n>;
//! ```
//!
//! Use [`render_header`] for an in-memory blob, or [`HeaderWriter`] to stream
//! bytes straight into any [`std::io::Write`] sink.

mod header;
mod symbol;

pub use header::*;
pub use symbol::*;

use std::path::PathBuf;

use thiserror::Error;

/// Emission errors.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Invalid C identifier: {0:?}")]
    InvalidSymbol(String),
    #[error("Cannot derive a symbol from {}: path has no file name", .0.display())]
    NoFileName(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmitError>;
