//! CLI definitions.

use std::path::PathBuf;

use clap::Parser;
use embedh::{ConvertOptions, DEFAULT_CHUNK_SIZE, DEFAULT_INPUT, ReadMode, Symbol};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "embedh")]
#[command(about = "Embed a binary file in a C header as a byte array")]
#[command(version)]
pub struct Cli {
    /// Input file
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output header (default: <SYMBOL>.h in the current directory)
    #[arg(short, long, value_name = "HEADER")]
    pub output: Option<PathBuf>,

    /// Array name; the length constant is <SYMBOL>_len (default: derived from INPUT)
    #[arg(long)]
    pub symbol: Option<Symbol>,

    /// Stream the input in chunks instead of reading it whole
    #[arg(long)]
    pub stream: bool,

    /// Chunk size in bytes for --stream
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, requires = "stream")]
    pub chunk_size: usize,

    /// Show metrics summary after execution
    #[arg(long)]
    pub metrics: bool,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub silent: bool,
}

impl Cli {
    /// Default log directive for the selected verbosity.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "embedh=debug"
        } else if self.silent {
            "embedh=error"
        } else {
            "embedh=info"
        }
    }

    #[must_use]
    pub const fn read_mode(&self) -> ReadMode {
        if self.stream {
            ReadMode::Streaming
        } else {
            ReadMode::Buffered
        }
    }

    /// Conversion options from the parsed flags.
    #[must_use]
    pub fn convert_options(&self) -> ConvertOptions {
        let options = ConvertOptions::new()
            .with_read_mode(self.read_mode())
            .with_chunk_size(self.chunk_size);
        match &self.symbol {
            Some(symbol) => options.with_symbol(symbol.clone()),
            None => options,
        }
    }
}
