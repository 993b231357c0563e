//! Helpers for reading generated headers back in tests.

#![allow(dead_code)]

/// Declarations recovered from a generated header.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedHeader {
    pub symbol: String,
    pub entries: Vec<u64>,
    pub len: u64,
}

impl ParsedHeader {
    /// Entries as bytes; panics on any value above 255.
    pub fn bytes(&self) -> Vec<u8> {
        self.entries
            .iter()
            .map(|&v| u8::try_from(v).unwrap_or_else(|_| panic!("entry {v} out of byte range")))
            .collect()
    }
}

/// Parse the two declarations of a generated header, panicking on any
/// deviation from the expected shape.
pub fn parse_header(text: &str) -> ParsedHeader {
    let (array_line, rest) = text.split_once('\n').expect("array line");
    let len_line = rest.strip_suffix('\n').expect("trailing newline");
    assert!(!len_line.contains('\n'), "unexpected extra lines: {rest:?}");

    let decl = array_line
        .strip_prefix("const unsigned char ")
        .expect("array type");
    let (symbol, body) = decl.split_once("[] = {").expect("array initializer");
    let body = body.strip_suffix("};").expect("array terminator");
    let entries = if body.is_empty() {
        Vec::new()
    } else {
        body.split(',')
            .map(|e| e.parse::<u64>().unwrap_or_else(|_| panic!("bad entry {e:?}")))
            .collect()
    };

    let len_decl = len_line
        .strip_prefix(&format!("unsigned int {symbol}_len = "))
        .expect("length declaration");
    let len = len_decl
        .strip_suffix(';')
        .expect("length terminator")
        .parse()
        .expect("length value");

    ParsedHeader {
        symbol: symbol.to_string(),
        entries,
        len,
    }
}
