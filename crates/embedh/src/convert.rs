//! Blob-to-header conversion.

use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use embedh_emit::{EmitError, HeaderWriter, Symbol, render_header};
use tracing::{debug, info};

use crate::{Error, Result};

/// Input converted when no path is given.
pub const DEFAULT_INPUT: &str = "motor_autoencoder.tflite";

/// Chunk size for streaming reads.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Largest streaming chunk; bigger requests are clamped.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// How the input file is read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Read the whole file into memory, then render.
    #[default]
    Buffered,
    /// Read fixed-size chunks and emit entries as they arrive.
    Streaming,
}

impl ReadMode {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buffered => "buffered",
            Self::Streaming => "streaming",
        }
    }
}

/// Options for a conversion.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Array name. Derived from the input file name when unset.
    pub symbol: Option<Symbol>,
    /// Input read strategy.
    pub read_mode: ReadMode,
    /// Chunk size in bytes for [`ReadMode::Streaming`].
    pub chunk_size: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            symbol: None,
            read_mode: ReadMode::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ConvertOptions {
    /// Create default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit symbol name.
    #[must_use]
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Set the read mode.
    #[must_use]
    pub const fn with_read_mode(mut self, mode: ReadMode) -> Self {
        self.read_mode = mode;
        self
    }

    /// Set the streaming chunk size, clamped to `1..=MAX_CHUNK_SIZE`.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Symbol to emit for `input`: the explicit one, or one derived from the
    /// input file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Emit`] if no symbol can be derived from `input`.
    pub fn resolve_symbol(&self, input: &Path) -> Result<Symbol> {
        match &self.symbol {
            Some(symbol) => Ok(symbol.clone()),
            None => Ok(Symbol::from_path(input)?),
        }
    }

    const fn effective_chunk_size(&self) -> usize {
        if self.chunk_size == 0 {
            1
        } else if self.chunk_size > MAX_CHUNK_SIZE {
            MAX_CHUNK_SIZE
        } else {
            self.chunk_size
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub symbol: Symbol,
    /// Number of bytes read, equal to the emitted `_len` value.
    pub bytes: u64,
}

/// Convert `input` to a header at `output` with default options.
///
/// # Errors
///
/// See [`convert_with_options`].
pub fn convert(input: &Path, output: &Path) -> Result<ConvertReport> {
    convert_with_options(input, output, &ConvertOptions::default())
}

/// Convert `input` to a header at `output`, overwriting any existing file.
///
/// # Errors
///
/// Returns [`Error::InputUnreadable`] if the input cannot be opened or read,
/// [`Error::OutputUnwritable`] if the output cannot be created or written, and
/// [`Error::Emit`] if no symbol can be derived from the input path. A failed
/// write may leave a truncated output file behind.
pub fn convert_with_options(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertReport> {
    let symbol = options.resolve_symbol(input)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        symbol = %symbol,
        mode = options.read_mode.as_str(),
        "converting"
    );

    let start = Instant::now();
    let bytes = match options.read_mode {
        ReadMode::Buffered => convert_buffered(input, output, &symbol)?,
        ReadMode::Streaming => {
            convert_streaming(input, output, &symbol, options.effective_chunk_size())?
        }
    };
    let elapsed = start.elapsed().as_secs_f64();

    crate::metrics::record_conversion(options.read_mode, bytes, elapsed);
    info!(bytes, output = %output.display(), "wrote header");

    Ok(ConvertReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        symbol,
        bytes,
    })
}

fn convert_buffered(input: &Path, output: &Path, symbol: &Symbol) -> Result<u64> {
    let data = std::fs::read(input).map_err(|e| Error::input(input, e))?;
    debug!(bytes = data.len(), "read input");

    let text = render_header(symbol, &data);
    std::fs::write(output, text).map_err(|e| Error::output(output, e))?;
    Ok(data.len() as u64)
}

fn convert_streaming(
    input: &Path,
    output: &Path,
    symbol: &Symbol,
    chunk_size: usize,
) -> Result<u64> {
    let (mut reader, input_len) = open_input(input)?;
    let file = File::create(output).map_err(|e| Error::output(output, e))?;
    let mut writer = HeaderWriter::new(BufWriter::new(file), symbol.clone());

    // Sized to the file at open time; a file that grows is still read to the end.
    let buf_len = usize::try_from(input_len.max(1)).map_or(chunk_size, |len| len.min(chunk_size));
    let mut buf = vec![0u8; buf_len];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::input(input, e)),
        };
        writer
            .write_bytes(&buf[..n])
            .map_err(|e| sink_error(output, e))?;
    }
    debug!(chunks_of = buf_len, bytes = writer.count(), "streamed input");

    let (_, count) = writer.finish().map_err(|e| sink_error(output, e))?;
    Ok(count)
}

/// Open the input and report its size, rejecting directories before the
/// output is touched.
fn open_input(input: &Path) -> Result<(File, u64)> {
    let file = File::open(input).map_err(|e| Error::input(input, e))?;
    let metadata = file.metadata().map_err(|e| Error::input(input, e))?;
    if metadata.is_dir() {
        return Err(Error::input(
            input,
            io::Error::new(io::ErrorKind::IsADirectory, "input is a directory"),
        ));
    }
    Ok((file, metadata.len()))
}

fn sink_error(output: &Path, err: EmitError) -> Error {
    match err {
        EmitError::Io(source) => Error::output(output, source),
        other => Error::Emit(other),
    }
}
