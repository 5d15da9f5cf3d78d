//! Symbol frequency counting.

use crate::symbol::Symbol;
use oxihuff_core::error::Result;
use std::io::{ErrorKind, Read};
use tracing::debug;

const READ_CHUNK: usize = 8192;

/// Occurrence counts for every symbol of the alphabet.
///
/// Byte counts start at zero; [`Symbol::EndOfStream`] always reports a
/// count of exactly one and is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// A table holding only the end-of-stream symbol.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count the bytes of an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.increment(byte);
        }
        table
    }

    /// Count every byte `reader` yields until end of data.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut buf = [0u8; READ_CHUNK];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in &buf[..n] {
                table.increment(byte);
            }
        }
        debug!(
            total_bytes = table.total_bytes(),
            distinct = table.distinct_bytes(),
            "frequency pass complete"
        );
        Ok(table)
    }

    /// Record one occurrence of `byte`.
    #[inline]
    pub fn increment(&mut self, byte: u8) {
        self.counts[byte as usize] += 1;
    }

    /// Set the count for `byte`. A count of zero removes it.
    pub fn set_count(&mut self, byte: u8, count: u64) {
        self.counts[byte as usize] = count;
    }

    /// Count for `symbol` (0 for bytes never seen, 1 for end-of-stream).
    pub fn count(&self, symbol: Symbol) -> u64 {
        match symbol {
            Symbol::Byte(b) => self.counts[b as usize],
            Symbol::EndOfStream => 1,
        }
    }

    /// Whether `byte` has a non-zero count.
    pub fn contains(&self, byte: u8) -> bool {
        self.counts[byte as usize] > 0
    }

    /// Present symbols with their counts, in ascending symbol order.
    ///
    /// The end-of-stream symbol always comes last.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (Symbol::Byte(byte as u8), count))
            .chain(std::iter::once((Symbol::EndOfStream, 1)))
    }

    /// Number of distinct byte values (end-of-stream excluded).
    pub fn distinct_bytes(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Number of distinct symbols, end-of-stream included.
    pub fn symbol_count(&self) -> usize {
        self.distinct_bytes() + 1
    }

    /// Sum of all byte counts (the input length). Saturates on overflow.
    pub fn total_bytes(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_input_has_only_eof() {
        let table = FrequencyTable::from_bytes(b"");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(Symbol::EndOfStream, 1)]);
        assert_eq!(table.symbol_count(), 1);
        assert_eq!(table.total_bytes(), 0);
    }

    #[test]
    fn test_counts() {
        let table = FrequencyTable::from_bytes(b"AAAAB");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(
            entries,
            vec![
                (Symbol::Byte(b'A'), 4),
                (Symbol::Byte(b'B'), 1),
                (Symbol::EndOfStream, 1),
            ]
        );
        assert_eq!(table.distinct_bytes(), 2);
        assert_eq!(table.total_bytes(), 5);
    }

    #[test]
    fn test_eof_distinct_from_byte_with_count_one() {
        // 0xFF with count 1 must not be confused with end-of-stream.
        let table = FrequencyTable::from_bytes(&[0xFF]);
        assert_eq!(table.count(Symbol::Byte(0xFF)), 1);
        assert_eq!(table.count(Symbol::EndOfStream), 1);
        assert_eq!(table.symbol_count(), 2);
    }

    #[test]
    fn test_from_reader_matches_from_bytes() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * 7 % 251) as u8).collect();
        let from_reader = FrequencyTable::from_reader(Cursor::new(&data)).unwrap();
        assert_eq!(from_reader, FrequencyTable::from_bytes(&data));
    }

    #[test]
    fn test_set_count_zero_removes() {
        let mut table = FrequencyTable::from_bytes(b"xy");
        table.set_count(b'x', 0);
        assert!(!table.contains(b'x'));
        assert!(table.contains(b'y'));
        assert_eq!(table.distinct_bytes(), 1);
    }
}
