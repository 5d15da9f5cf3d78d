//! # OxiHuff Huffman
//!
//! Pure Rust static Huffman compression with a self-describing text header.
//!
//! A compressed file is a frequency header followed by a bit-packed body:
//!
//! ```text
//! <N> <byte1><count1> ... <byteN><countN> <body bits, LSB-first>
//! ```
//!
//! The body ends with the code of a synthetic end-of-stream symbol, so no
//! length field is stored. Both sides rebuild the same tree from the header;
//! see [`tree`] for the tie-break rules that make this deterministic.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_huffman::{compress_bytes, decompress_bytes};
//!
//! let compressed = compress_bytes(b"AAAAB").unwrap();
//! assert_eq!(&compressed[..8], b"2 A4 B1 ");
//! assert_eq!(decompress_bytes(&compressed).unwrap(), b"AAAAB");
//! ```
//!
//! ## Streams
//!
//! ```rust
//! use oxihuff_core::BitStream;
//! use oxihuff_huffman::{compress, decompress};
//! use std::io::Cursor;
//!
//! let mut input = BitStream::new(Cursor::new(b"mississippi".to_vec()));
//! let mut packed = BitStream::new(Cursor::new(Vec::new()));
//! let stats = compress(&mut input, &mut packed).unwrap();
//! assert_eq!(stats.input_bytes, 11);
//!
//! packed.rewind().unwrap();
//! let mut restored = BitStream::new(Cursor::new(Vec::new()));
//! decompress(&mut packed, &mut restored).unwrap();
//! assert_eq!(restored.get_ref().get_ref(), b"mississippi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codes;
pub mod engine;
pub mod frequency;
pub mod header;
pub mod symbol;
pub mod tree;

// Re-exports
pub use codes::{CodeTable, format_code};
pub use engine::{
    CompressStats, DecompressStats, compress, compress_bytes, decompress, decompress_bytes,
};
pub use frequency::FrequencyTable;
pub use header::{MAX_HEADER_SYMBOLS, read_header, write_header};
pub use symbol::{SYMBOL_COUNT, Symbol};
pub use tree::{HuffmanNode, HuffmanTree};
