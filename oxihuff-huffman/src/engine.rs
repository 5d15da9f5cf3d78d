//! Compression and decompression.
//!
//! Compression is two-pass: the input is counted once, the header is
//! written, then the input is rewound and every byte is replaced by its
//! code, followed by the end-of-stream code. Decompression rebuilds the
//! same tree from the header and walks it one bit at a time until the
//! end-of-stream leaf.

use crate::codes::CodeTable;
use crate::frequency::FrequencyTable;
use crate::header::{read_header, write_header};
use crate::symbol::Symbol;
use crate::tree::{HuffmanNode, HuffmanTree};
use oxihuff_core::bitstream::BitStream;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{Cursor, ErrorKind, Read, Seek, Write};
use tracing::debug;

const READ_CHUNK: usize = 8192;

/// Summary of a finished compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressStats {
    /// Bytes consumed from the input.
    pub input_bytes: u64,
    /// Bytes of header written.
    pub header_bytes: u64,
    /// Bits of body written, end-of-stream code included.
    pub body_bits: u64,
    /// Distinct byte values in the input.
    pub distinct_bytes: usize,
}

impl CompressStats {
    /// Total bytes produced (header plus the bit-packed body).
    pub fn output_bytes(&self) -> u64 {
        self.header_bytes + self.body_bits.div_ceil(8)
    }

    /// Size reduction relative to the input, in percent.
    ///
    /// Negative when the output is larger than the input; `None` for empty
    /// input, which has no meaningful ratio.
    pub fn savings_percent(&self) -> Option<f64> {
        if self.input_bytes == 0 {
            return None;
        }
        Some(100.0 - 100.0 * self.output_bytes() as f64 / self.input_bytes as f64)
    }

    /// Whether compression made the data bigger.
    pub fn is_expansion(&self) -> bool {
        self.output_bytes() > self.input_bytes
    }
}

/// Summary of a finished decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressStats {
    /// Bytes of header consumed.
    pub header_bytes: u64,
    /// Bits of body consumed, end-of-stream code included.
    pub body_bits: u64,
    /// Bytes written to the output.
    pub output_bytes: u64,
}

/// Compress `input` into `output`.
///
/// `input` is read twice and left at its end. Neither stream is closed.
pub fn compress<R, W>(input: &mut BitStream<R>, output: &mut BitStream<W>) -> Result<CompressStats>
where
    R: Read + Seek,
    W: Write + Seek,
{
    let frequencies = FrequencyTable::from_reader(&mut *input)?;
    let tree = HuffmanTree::build(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);
    debug!(
        symbols = codes.len(),
        max_code_length = codes.max_length(),
        "code table ready"
    );

    let header_bytes = write_header(&frequencies, output)?;

    input.rewind()?;
    let start_bits = output.bits_written();
    let mut input_bytes = 0u64;
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buf[..n] {
            let code = codes.get(Symbol::Byte(byte)).ok_or_else(|| {
                OxiHuffError::invalid_tree(format!(
                    "{} was not seen by the counting pass; input changed",
                    Symbol::Byte(byte)
                ))
            })?;
            write_code(output, code)?;
        }
        input_bytes += n as u64;
    }

    // Always present: the table never lacks end-of-stream.
    if let Some(code) = codes.get(Symbol::EndOfStream) {
        write_code(output, code)?;
    }

    let stats = CompressStats {
        input_bytes,
        header_bytes,
        body_bits: output.bits_written() - start_bits,
        distinct_bytes: frequencies.distinct_bytes(),
    };
    debug!(
        input_bytes = stats.input_bytes,
        header_bytes = stats.header_bytes,
        body_bits = stats.body_bits,
        "compression complete"
    );
    Ok(stats)
}

fn write_code<W: Write + Seek>(output: &mut BitStream<W>, code: &[u8]) -> Result<()> {
    for &bit in code {
        output.write_bit(bit)?;
    }
    Ok(())
}

/// Decompress `input` into `output`.
///
/// Fails with [`OxiHuffError::TruncatedBody`] if the input runs out before
/// the end-of-stream code. The decoded bytes are written to `output` only
/// once the end-of-stream code has been reached, so a failed call leaves
/// `output` untouched. Neither stream is closed.
pub fn decompress<R, W>(
    input: &mut BitStream<R>,
    output: &mut BitStream<W>,
) -> Result<DecompressStats>
where
    R: Read + Seek,
    W: Write,
{
    let header_start = input.position()?;
    let frequencies = read_header(&mut *input)?;
    let header_bytes = input.position()? - header_start;
    let tree = HuffmanTree::build(&frequencies)?;

    let start_bits = input.bits_read();
    let mut decoded = Vec::new();

    let root = tree.root();
    let mut current = root;
    loop {
        match current {
            HuffmanNode::Leaf(Symbol::EndOfStream) => break,
            HuffmanNode::Leaf(Symbol::Byte(byte)) => {
                decoded.push(*byte);
                current = root;
            }
            HuffmanNode::Internal(left, right) => {
                let bit = input
                    .read_bit()?
                    .ok_or_else(|| OxiHuffError::truncated_body(input.bits_read() - start_bits))?;
                current = if bit == 0 { left } else { right };
            }
        }
    }
    output.write_all(&decoded)?;
    output.flush()?;

    let stats = DecompressStats {
        header_bytes,
        body_bits: input.bits_read() - start_bits,
        output_bytes: decoded.len() as u64,
    };
    debug!(
        header_bytes = stats.header_bytes,
        body_bits = stats.body_bits,
        output_bytes = stats.output_bytes,
        "decompression complete"
    );
    Ok(stats)
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = BitStream::new(Cursor::new(data));
    let mut output = BitStream::new(Cursor::new(Vec::new()));
    compress(&mut input, &mut output)?;
    Ok(output.into_inner().map(Cursor::into_inner).unwrap_or_default())
}

/// Decompress an in-memory buffer.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = BitStream::new(Cursor::new(data));
    let mut output = BitStream::new(Cursor::new(Vec::new()));
    decompress(&mut input, &mut output)?;
    Ok(output.into_inner().map(Cursor::into_inner).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_a_exact_output() {
        // Codes: A=1, B=00, EOF=01. Body bits 1111 00 01 -> 0b1000_1111.
        let compressed = compress_bytes(b"AAAAB").unwrap();
        assert_eq!(compressed, b"2 A4 B1 \x8F");
        assert_eq!(decompress_bytes(&compressed).unwrap(), b"AAAAB");
    }

    #[test]
    fn test_scenario_b_empty() {
        let compressed = compress_bytes(b"").unwrap();
        assert_eq!(compressed, b"0 ");
        assert!(decompress_bytes(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let data = b"AAAAB";
        let mut input = BitStream::new(Cursor::new(&data[..]));
        let mut output = BitStream::new(Cursor::new(Vec::new()));
        let stats = compress(&mut input, &mut output).unwrap();

        assert_eq!(stats.input_bytes, 5);
        assert_eq!(stats.header_bytes, 8);
        assert_eq!(stats.body_bits, 8);
        assert_eq!(stats.distinct_bytes, 2);
        assert_eq!(stats.output_bytes(), 9);
        assert_eq!(output.size().unwrap(), 9);
        assert!(stats.is_expansion());

        let compressed = output.into_inner().unwrap().into_inner();
        let mut input = BitStream::new(Cursor::new(compressed));
        let mut output = BitStream::new(Cursor::new(Vec::new()));
        let stats = decompress(&mut input, &mut output).unwrap();
        assert_eq!(
            stats,
            DecompressStats {
                header_bytes: 8,
                body_bits: 8,
                output_bytes: 5,
            }
        );
    }

    #[test]
    fn test_savings_percent() {
        let stats = CompressStats {
            input_bytes: 200,
            header_bytes: 10,
            body_bits: 400,
            distinct_bytes: 3,
        };
        assert_eq!(stats.output_bytes(), 60);
        assert!((stats.savings_percent().unwrap() - 70.0).abs() < 1e-9);
        assert!(!stats.is_expansion());
    }

    #[test]
    fn test_savings_percent_empty_input() {
        let mut input = BitStream::new(Cursor::new(&b""[..]));
        let mut output = BitStream::new(Cursor::new(Vec::new()));
        let stats = compress(&mut input, &mut output).unwrap();
        assert_eq!(stats.output_bytes(), 2);
        assert!(stats.is_expansion());
        assert_eq!(stats.savings_percent(), None);
    }

    #[test]
    fn test_truncated_body() {
        let mut compressed = compress_bytes(b"hello, world").unwrap();
        compressed.pop();
        let err = decompress_bytes(&compressed).unwrap_err();
        assert!(matches!(err, OxiHuffError::TruncatedBody { .. }));
    }

    #[test]
    fn test_failed_decode_leaves_output_untouched() {
        let mut compressed = compress_bytes(b"hello, world, hello, world").unwrap();
        compressed.truncate(compressed.len() - 2);

        let mut input = BitStream::new(Cursor::new(compressed));
        let mut output = BitStream::new(Cursor::new(Vec::new()));
        let err = decompress(&mut input, &mut output).unwrap_err();
        assert!(matches!(err, OxiHuffError::TruncatedBody { .. }));
        assert!(output.get_ref().get_ref().is_empty());
    }

    #[test]
    fn test_missing_body() {
        // Header present, body absent entirely.
        let err = decompress_bytes(b"2 A4 B1 ").unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::TruncatedBody { bit_position: 0 }
        ));
    }

    #[test]
    fn test_streams_stay_open() {
        let mut input = BitStream::new(Cursor::new(&b"abc"[..]));
        let mut output = BitStream::new(Cursor::new(Vec::new()));
        compress(&mut input, &mut output).unwrap();
        assert!(input.is_open());
        assert!(output.is_open());
    }

    #[test]
    fn test_closed_output_fails() {
        let mut input = BitStream::new(Cursor::new(&b"abc"[..]));
        let mut output = BitStream::new(Cursor::new(Vec::new()));
        output.close().unwrap();
        let err = compress(&mut input, &mut output).unwrap_err();
        assert!(matches!(err, OxiHuffError::Io(_)));
    }
}
