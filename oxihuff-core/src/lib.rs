//! # OxiHuff Core
//!
//! Core components for the OxiHuff compressor.
//!
//! - [`bitstream`]: Single-bit I/O layered over seekable byte handles
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     compress / decompress / info / compare / verify     │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Frequency table, Huffman tree, header, engine       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitStream, bit copy/compare, errors                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::BitStream;
//! use std::io::{Cursor, Write};
//!
//! let mut stream = BitStream::new(Cursor::new(Vec::new()));
//! stream.write_all(b"3 ").unwrap();
//! stream.write_bit(1).unwrap();
//! assert_eq!(stream.size().unwrap(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitStream, copy_bits, count_bit_differences};
pub use error::{ErrorPhase, OxiHuffError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::BitStream;
    pub use crate::error::{ErrorPhase, OxiHuffError, Result};
}
