//! Frequency table header.
//!
//! ```text
//! <N> <byte1><count1> <byte2><count2> ... <byteN><countN>
//! ```
//!
//! `N` is the decimal number of distinct byte values. Each entry is the raw
//! byte itself (not its textual form) immediately followed by its decimal
//! count; a single space terminates `N` and every count. Entries are written
//! in ascending byte order. The end-of-stream symbol is implicit on both
//! sides with a count of one.
//!
//! The reader accepts entries in any order but rejects duplicates, zero
//! counts, non-digit characters and `N` above 256.

use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{ErrorKind, Read, Write};
use tracing::debug;

/// Largest legal symbol count in a header.
pub const MAX_HEADER_SYMBOLS: u64 = 256;

const FIELD_TERMINATOR: u8 = b' ';

/// Serialize `frequencies` and return the number of bytes written.
pub fn write_header<W: Write>(frequencies: &FrequencyTable, writer: &mut W) -> Result<u64> {
    let mut header = format!("{} ", frequencies.distinct_bytes()).into_bytes();
    for (symbol, count) in frequencies.iter() {
        let Some(byte) = symbol.byte() else {
            continue;
        };
        header.push(byte);
        header.extend_from_slice(count.to_string().as_bytes());
        header.push(FIELD_TERMINATOR);
    }
    writer.write_all(&header)?;
    debug!(bytes = header.len(), "header written");
    Ok(header.len() as u64)
}

/// Parse a header from `reader`, leaving it positioned at the first body byte.
pub fn read_header<R: Read>(reader: &mut R) -> Result<FrequencyTable> {
    let mut parser = HeaderParser { reader, offset: 0 };

    let symbol_count = parser.read_number("symbol count")?;
    if symbol_count > MAX_HEADER_SYMBOLS {
        return Err(OxiHuffError::invalid_header(
            0,
            format!("symbol count {symbol_count} exceeds {MAX_HEADER_SYMBOLS}"),
        ));
    }

    let mut frequencies = FrequencyTable::new();
    for _ in 0..symbol_count {
        let entry_offset = parser.offset;
        let byte = parser.next_byte()?;
        let count = parser.read_number("count")?;
        if frequencies.contains(byte) {
            return Err(OxiHuffError::invalid_header(
                entry_offset,
                format!("duplicate entry for {}", Symbol::Byte(byte)),
            ));
        }
        if count == 0 {
            return Err(OxiHuffError::invalid_tree(format!(
                "{} has a zero count",
                Symbol::Byte(byte)
            )));
        }
        frequencies.set_count(byte, count);
    }

    debug!(
        bytes = parser.offset,
        symbols = symbol_count,
        "header parsed"
    );
    Ok(frequencies)
}

struct HeaderParser<'a, R> {
    reader: &'a mut R,
    offset: u64,
}

impl<R: Read> HeaderParser<'_, R> {
    fn next_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    return Err(OxiHuffError::invalid_header(
                        self.offset,
                        "unexpected end of data",
                    ));
                }
                Ok(_) => {
                    self.offset += 1;
                    return Ok(byte[0]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read decimal digits up to the terminating space.
    fn read_number(&mut self, field: &str) -> Result<u64> {
        let start = self.offset;
        let mut value: u64 = 0;
        let mut digits = 0usize;
        loop {
            let offset = self.offset;
            let byte = self.next_byte()?;
            if byte == FIELD_TERMINATOR {
                break;
            }
            if !byte.is_ascii_digit() {
                return Err(OxiHuffError::invalid_header(
                    offset,
                    format!("expected a digit in {field}, found 0x{byte:02x}"),
                ));
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(byte - b'0')))
                .ok_or_else(|| {
                    OxiHuffError::invalid_header(start, format!("{field} does not fit in 64 bits"))
                })?;
            digits += 1;
        }
        if digits == 0 {
            return Err(OxiHuffError::invalid_header(
                start,
                format!("empty {field}"),
            ));
        }
        Ok(value)
    }
}
