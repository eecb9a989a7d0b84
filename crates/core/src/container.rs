//! Artifact serialization and parsing.
//!
//! An artifact packages the frequency table with the encoded payload. The
//! decoder rebuilds the code tree from the table, so nothing else is stored.
//!
//! # Text layout (default)
//!
//! ```text
//! <N>\n                    number of table rows
//! <symbol> <count>\n       N rows, symbol as a decimal byte value
//! \n                       separator
//! <0/1 characters>         payload, no trailing newline
//! ```
//!
//! This is the legacy on-disk format; artifacts written by older builds read
//! back unchanged.
//!
//! # Packed layout
//!
//! ```text
//! HUFB <N> <bit_len>\n     header with explicit payload length in bits
//! <symbol> <count>\n       N rows
//! \n                       separator
//! <ceil(bit_len/8) bytes>  payload bits, MSB-first, zero padded
//! ```
//!
//! [`deserialize`] detects the layout from the first bytes.

use crate::bits;
use crate::error::{FormatError, Result};
use crate::frequency::FrequencyTable;
use std::fmt::Write as _;
use tracing::debug;

/// Leading bytes of a packed artifact.
const PACKED_MAGIC: &[u8] = b"HUFB ";

/// A byte can take 256 values, so a table never has more rows.
const MAX_ROWS: usize = 256;

/// On-disk layout of an artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// Newline-delimited table followed by '0'/'1' characters
    #[default]
    Text,
    /// Length-prefixed header followed by bits packed eight per byte
    Packed,
}

impl Layout {
    /// Identify the layout of an existing artifact.
    pub fn detect(artifact: &[u8]) -> Self {
        if artifact.starts_with(PACKED_MAGIC) {
            Layout::Packed
        } else {
            Layout::Text
        }
    }
}

/// Serialize `table` and `bits` in the text layout.
pub fn serialize(table: &FrequencyTable, bits: &str) -> Vec<u8> {
    let mut out = format!("{}\n", table.len());
    write_rows(&mut out, table);
    out.push('\n');
    out.push_str(bits);
    out.into_bytes()
}

/// Serialize `table` and `bits` in the packed layout.
///
/// # Errors
/// `Error::InvalidBit` if `bits` contains anything but '0' and '1'.
pub fn serialize_packed(table: &FrequencyTable, bits: &str) -> Result<Vec<u8>> {
    let payload = bits::pack(bits)?;

    let mut head = format!("HUFB {} {}\n", table.len(), bits.len());
    write_rows(&mut head, table);
    head.push('\n');

    let mut out = head.into_bytes();
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Serialize in the requested layout.
pub fn serialize_with(layout: Layout, table: &FrequencyTable, bits: &str) -> Result<Vec<u8>> {
    match layout {
        Layout::Text => Ok(serialize(table, bits)),
        Layout::Packed => serialize_packed(table, bits),
    }
}

fn write_rows(out: &mut String, table: &FrequencyTable) {
    for (symbol, count) in table.iter() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{} {}", symbol, count);
    }
}

/// Parse an artifact in either layout back into its table and bit string.
///
/// # Errors
/// `Error::Format` describing the first structural problem found. The
/// payload characters themselves are not validated here; the decoder
/// reports stray characters as `Error::InvalidBit`.
pub fn deserialize(artifact: &[u8]) -> Result<(FrequencyTable, String)> {
    let mut cursor = LineCursor::new(artifact);

    match Layout::detect(artifact) {
        Layout::Text => {
            let count = parse_count(cursor.next_line())?;
            let table = parse_rows(&mut cursor, count)?;
            expect_separator(&mut cursor)?;

            let payload = strip_trailing_newline(cursor.rest());
            if payload.is_empty() {
                return Err(FormatError::EmptyPayload.into());
            }

            debug!(rows = count, bits = payload.len(), "parsed text artifact");
            Ok((table, String::from_utf8_lossy(payload).into_owned()))
        }
        Layout::Packed => {
            let (count, bit_len) = parse_packed_header(cursor.next_line())?;
            let table = parse_rows(&mut cursor, count)?;
            expect_separator(&mut cursor)?;

            if bit_len == 0 {
                return Err(FormatError::EmptyPayload.into());
            }
            let bits = bits::unpack(cursor.rest(), bit_len)?;

            debug!(rows = count, bits = bit_len, "parsed packed artifact");
            Ok((table, bits))
        }
    }
}

/// Splits a byte buffer into `\n`-terminated lines without copying.
struct LineCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Next line without its terminator (`\n` or `\r\n`).
    ///
    /// Returns `None` if no complete line remains.
    fn next_line(&mut self) -> Option<&'a [u8]> {
        let rest = &self.data[self.pos..];
        let end = rest.iter().position(|&b| b == b'\n')?;
        self.pos += end + 1;

        let line = &rest[..end];
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }

    fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

fn strip_trailing_newline(payload: &[u8]) -> &[u8] {
    payload
        .strip_suffix(b"\r\n")
        .or_else(|| payload.strip_suffix(b"\n"))
        .unwrap_or(payload)
}

fn parse_count(line: Option<&[u8]>) -> Result<usize> {
    let text = line
        .map(|l| String::from_utf8_lossy(l).trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(FormatError::MissingCount)?;

    match text.parse::<usize>() {
        Ok(n) if (1..=MAX_ROWS).contains(&n) => Ok(n),
        _ => Err(FormatError::InvalidCount(text).into()),
    }
}

fn parse_packed_header(line: Option<&[u8]>) -> Result<(usize, usize)> {
    let text = line
        .map(|l| String::from_utf8_lossy(l).into_owned())
        .ok_or(FormatError::MissingCount)?;

    let mut fields = text.split_ascii_whitespace().skip(1);
    let count = fields.next().and_then(|f| f.parse::<usize>().ok());
    let bit_len = fields.next().and_then(|f| f.parse::<usize>().ok());

    match (count, bit_len, fields.next()) {
        (Some(count), Some(bit_len), None) if (1..=MAX_ROWS).contains(&count) => {
            Ok((count, bit_len))
        }
        _ => Err(FormatError::InvalidHeader(text).into()),
    }
}

fn parse_rows(cursor: &mut LineCursor<'_>, count: usize) -> Result<FrequencyTable> {
    let mut table = FrequencyTable::new();

    for row in 1..=count {
        let line = cursor
            .next_line()
            .ok_or(FormatError::IncompleteRow { row })?;
        let line = String::from_utf8_lossy(line);
        let mut fields = line.split_ascii_whitespace();

        let (Some(symbol), Some(freq)) = (fields.next(), fields.next()) else {
            return Err(FormatError::IncompleteRow { row }.into());
        };
        if fields.next().is_some() {
            return Err(FormatError::InvalidFrequency { row }.into());
        }

        let symbol: u8 = symbol.parse().map_err(|_| FormatError::InvalidSymbol {
            row,
            value: symbol.to_string(),
        })?;
        let freq = parse_frequency(freq).ok_or(FormatError::InvalidFrequency { row })?;

        if table.insert(symbol, freq).is_some() {
            return Err(FormatError::DuplicateSymbol { row, symbol }.into());
        }
    }

    Ok(table)
}

/// Legacy writers could emit negative counts; those rows load as zero and
/// never become leaves.
fn parse_frequency(field: &str) -> Option<u64> {
    match field.parse::<u64>() {
        Ok(freq) => Some(freq),
        Err(_) => field.parse::<i64>().ok().filter(|&f| f < 0).map(|_| 0),
    }
}

fn expect_separator(cursor: &mut LineCursor<'_>) -> Result<()> {
    match cursor.next_line() {
        Some(line) if line.iter().all(u8::is_ascii_whitespace) => Ok(()),
        _ => Err(FormatError::MissingSeparator.into()),
    }
}
