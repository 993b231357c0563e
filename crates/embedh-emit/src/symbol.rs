//! C identifiers for the emitted declarations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{EmitError, Result};

/// Suffix appended to the symbol to name the length constant.
pub const LEN_SUFFIX: &str = "_len";

/// Extension of generated header files.
pub const HEADER_EXTENSION: &str = "h";

/// A valid C identifier naming the emitted array.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from an explicit name.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::InvalidSymbol`] if `name` is not a C identifier.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if is_c_identifier(&name) {
            Ok(Self(name))
        } else {
            Err(EmitError::InvalidSymbol(name))
        }
    }

    /// Derive a symbol from a file name.
    ///
    /// Every character that is not ASCII alphanumeric becomes `_`, and a
    /// leading digit gets a `_` prefix, so `motor_autoencoder.tflite` maps to
    /// `motor_autoencoder_tflite`.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::NoFileName`] if the path has no final component.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .ok_or_else(|| EmitError::NoFileName(path.to_path_buf()))?
            .to_string_lossy();

        let mut name = String::with_capacity(file_name.len() + 1);
        if file_name.starts_with(|c: char| c.is_ascii_digit()) {
            name.push('_');
        }
        name.extend(file_name.chars().map(|c| {
            if c.is_ascii_alphanumeric() { c } else { '_' }
        }));

        Self::new(name)
    }

    /// The array name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the length constant (`<symbol>_len`).
    #[must_use]
    pub fn len_name(&self) -> String {
        format!("{}{LEN_SUFFIX}", self.0)
    }

    /// Default header path for this symbol (`<symbol>.h`).
    #[must_use]
    pub fn default_output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{HEADER_EXTENSION}", self.0))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Symbol {
    type Err = EmitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_from_model_path() {
        let symbol = Symbol::from_path(Path::new("motor_autoencoder.tflite")).unwrap();
        assert_eq!(symbol.as_str(), "motor_autoencoder_tflite");
        assert_eq!(symbol.len_name(), "motor_autoencoder_tflite_len");
        assert_eq!(
            symbol.default_output_path(),
            PathBuf::from("motor_autoencoder_tflite.h")
        );
    }

    #[test]
    fn test_symbol_uses_file_name_only() {
        let symbol = Symbol::from_path(Path::new("models/v2/kws-model.bin")).unwrap();
        assert_eq!(symbol.as_str(), "kws_model_bin");
    }

    #[test]
    fn test_symbol_leading_digit() {
        let symbol = Symbol::from_path(Path::new("8bit.raw")).unwrap();
        assert_eq!(symbol.as_str(), "_8bit_raw");
    }

    #[test]
    fn test_symbol_non_ascii_replaced() {
        let symbol = Symbol::from_path(Path::new("modèle.tflite")).unwrap();
        assert_eq!(symbol.as_str(), "mod_le_tflite");
    }

    #[test]
    fn test_symbol_no_file_name() {
        let err = Symbol::from_path(Path::new("/")).unwrap_err();
        assert!(matches!(err, EmitError::NoFileName(_)));
    }

    #[test]
    fn test_symbol_validation() {
        assert!(Symbol::new("g_model").is_ok());
        assert!(Symbol::new("_x1").is_ok());
        assert!(matches!(Symbol::new(""), Err(EmitError::InvalidSymbol(_))));
        assert!(matches!(Symbol::new("1abc"), Err(EmitError::InvalidSymbol(_))));
        assert!(matches!(Symbol::new("a-b"), Err(EmitError::InvalidSymbol(_))));
        assert!(matches!(Symbol::new("a b"), Err(EmitError::InvalidSymbol(_))));
    }

    #[test]
    fn test_symbol_from_str() {
        let symbol: Symbol = "model_data".parse().unwrap();
        assert_eq!(symbol.to_string(), "model_data");
        assert!("model.data".parse::<Symbol>().is_err());
    }
}
