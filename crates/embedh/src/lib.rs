//! embedh - embed a binary file in a C header
//!
//! Reads a binary blob (typically a `.tflite` model) and writes a header that
//! declares its bytes as a `const unsigned char` array plus a `_len` constant,
//! ready to be compiled into firmware.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use embedh::{ConvertOptions, ReadMode};
//!
//! let options = ConvertOptions::new().with_read_mode(ReadMode::Streaming);
//! let report = embedh::convert_with_options(
//!     Path::new("motor_autoencoder.tflite"),
//!     Path::new("motor_autoencoder_tflite.h"),
//!     &options,
//! )?;
//! assert_eq!(report.symbol.as_str(), "motor_autoencoder_tflite");
//! ```

pub use embedh_emit::{EmitError, HeaderWriter, Symbol, render_header};

mod convert;
mod error;
pub mod metrics;

pub use convert::*;
pub use error::{Error, Result};
