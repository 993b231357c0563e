//! Header generation for embedded blobs.
//!
//! The generated text has exactly two declarations:
//! - `const unsigned char <symbol>[] = {...};` with one decimal entry per byte
//! - `unsigned int <symbol>_len = <n>;`
//!
//! Entries are comma-separated with no whitespace and no trailing comma.

use std::fmt::Write as _;
use std::io;

use tracing::debug;

use crate::{Result, Symbol};

/// Element type of the emitted array.
pub const ARRAY_TYPE: &str = "const unsigned char";

/// Type of the emitted length constant.
pub const LEN_TYPE: &str = "unsigned int";

/// Input bytes formatted per sink write; bounds the scratch buffer.
const SCRATCH_BYTES: usize = 16 * 1024;

/// Opening of the array declaration, up to and including `{`.
#[must_use]
pub fn array_open(symbol: &Symbol) -> String {
    format!("{ARRAY_TYPE} {symbol}[] = {{")
}

/// Closing of the array declaration followed by the length declaration.
#[must_use]
pub fn array_close(symbol: &Symbol, len: u64) -> String {
    format!("}};\n{LEN_TYPE} {} = {len};\n", symbol.len_name())
}

/// Render the complete header for an in-memory blob.
#[must_use]
pub fn render_header(symbol: &Symbol, bytes: &[u8]) -> String {
    let open = array_open(symbol);
    let close = array_close(symbol, bytes.len() as u64);
    // "255," is the widest entry
    let mut out = String::with_capacity(open.len() + bytes.len() * 4 + close.len());

    out.push_str(&open);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write!(out, "{byte}").expect("formatting byte entry");
    }
    out.push_str(&close);
    out
}

/// Streaming header emitter.
///
/// Bytes can be fed in arbitrary chunks; the length line is written by
/// [`HeaderWriter::finish`] once the total is known, so the blob never needs
/// to be held in memory. Output is identical to [`render_header`].
pub struct HeaderWriter<W: io::Write> {
    sink: W,
    symbol: Symbol,
    count: u64,
    started: bool,
    scratch: Vec<u8>,
}

impl<W: io::Write> HeaderWriter<W> {
    /// Create an emitter writing to `sink`.
    pub const fn new(sink: W, symbol: Symbol) -> Self {
        Self {
            sink,
            symbol,
            count: 0,
            started: false,
            scratch: Vec::new(),
        }
    }

    /// Symbol being emitted.
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Number of entries written so far.
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Append a chunk of bytes to the array.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EmitError::Io`] if the sink fails.
    pub fn write_bytes(&mut self, chunk: &[u8]) -> Result<()> {
        self.start()?;
        if chunk.is_empty() {
            return Ok(());
        }

        for piece in chunk.chunks(SCRATCH_BYTES) {
            self.scratch.clear();
            self.scratch.reserve(piece.len() * 4);
            for &byte in piece {
                if self.count > 0 {
                    self.scratch.push(b',');
                }
                push_decimal(&mut self.scratch, byte);
                self.count += 1;
            }
            self.sink.write_all(&self.scratch)?;
        }
        Ok(())
    }

    /// Close the array, write the length line, and flush.
    ///
    /// Returns the sink and the number of entries written.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EmitError::Io`] if the sink fails.
    pub fn finish(mut self) -> Result<(W, u64)> {
        self.start()?;
        self.sink
            .write_all(array_close(&self.symbol, self.count).as_bytes())?;
        self.sink.flush()?;
        debug!(symbol = %self.symbol, entries = self.count, "header finished");
        Ok((self.sink, self.count))
    }

    fn start(&mut self) -> Result<()> {
        if !self.started {
            self.sink.write_all(array_open(&self.symbol).as_bytes())?;
            self.started = true;
        }
        Ok(())
    }
}

fn push_decimal(buf: &mut Vec<u8>, byte: u8) {
    if byte >= 100 {
        buf.push(b'0' + byte / 100);
    }
    if byte >= 10 {
        buf.push(b'0' + (byte / 10) % 10);
    }
    buf.push(b'0' + byte % 10);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_symbol() -> Symbol {
        Symbol::new("motor_autoencoder_tflite").unwrap()
    }

    fn stream(bytes: &[u8], chunk_size: usize) -> String {
        let mut writer = HeaderWriter::new(Vec::new(), model_symbol());
        for chunk in bytes.chunks(chunk_size) {
            writer.write_bytes(chunk).unwrap();
        }
        let (out, count) = writer.finish().unwrap();
        assert_eq!(count, bytes.len() as u64);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_small_blob() {
        let text = render_header(&model_symbol(), &[0, 1, 255]);
        assert_eq!(
            text,
            "const unsigned char motor_autoencoder_tflite[] = {0,1,255};\nunsigned int motor_autoencoder_tflite_len = 3;\n"
        );
    }

    #[test]
    fn test_render_empty_blob() {
        let text = render_header(&model_symbol(), &[]);
        assert_eq!(
            text,
            "const unsigned char motor_autoencoder_tflite[] = {};\nunsigned int motor_autoencoder_tflite_len = 0;\n"
        );
    }

    #[test]
    fn test_render_single_byte() {
        let symbol = Symbol::new("one").unwrap();
        assert_eq!(
            render_header(&symbol, &[42]),
            "const unsigned char one[] = {42};\nunsigned int one_len = 1;\n"
        );
    }

    #[test]
    fn test_push_decimal_all_values() {
        for byte in 0..=u8::MAX {
            let mut buf = Vec::new();
            push_decimal(&mut buf, byte);
            assert_eq!(buf, byte.to_string().into_bytes());
        }
    }

    #[test]
    fn test_stream_matches_render() {
        let bytes: Vec<u8> = (0..=u8::MAX).cycle().take(1000).collect();
        let expected = render_header(&model_symbol(), &bytes);
        for chunk_size in [1, 2, 3, 7, 64, 999, 1000, 4096] {
            assert_eq!(stream(&bytes, chunk_size), expected, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn test_stream_empty_and_empty_chunks() {
        let expected = render_header(&model_symbol(), &[]);
        assert_eq!(stream(&[], 16), expected);

        let mut writer = HeaderWriter::new(Vec::new(), model_symbol());
        writer.write_bytes(&[]).unwrap();
        writer.write_bytes(&[7]).unwrap();
        writer.write_bytes(&[]).unwrap();
        writer.write_bytes(&[8, 9]).unwrap();
        assert_eq!(writer.count(), 3);
        let (out, _) = writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            render_header(&model_symbol(), &[7, 8, 9])
        );
    }

    #[test]
    fn test_large_chunk_formatted_in_pieces() {
        let bytes: Vec<u8> = (0..=u8::MAX).cycle().take(SCRATCH_BYTES * 3 + 5).collect();
        let mut writer = HeaderWriter::new(Vec::new(), model_symbol());
        writer.write_bytes(&bytes).unwrap();
        assert!(writer.scratch.capacity() < SCRATCH_BYTES * 8);
        let (out, count) = writer.finish().unwrap();
        assert_eq!(count, bytes.len() as u64);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            render_header(&model_symbol(), &bytes)
        );
    }

    #[test]
    fn test_stream_sink_error() {
        struct FailingSink;

        impl io::Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut writer = HeaderWriter::new(FailingSink, model_symbol());
        let err = writer.write_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, crate::EmitError::Io(_)));
    }
}
