//! The Huffman alphabet: 256 byte values plus an end-of-stream marker.

use std::fmt;

/// Number of distinct symbols (256 bytes + end-of-stream).
pub const SYMBOL_COUNT: usize = 257;

/// Dense index of [`Symbol::EndOfStream`].
pub const END_OF_STREAM_INDEX: usize = 256;

/// A symbol of the Huffman alphabet.
///
/// Ordering puts every byte before the end-of-stream marker, and bytes in
/// numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A literal byte value.
    Byte(u8),
    /// Synthetic marker terminating the compressed body. Always present
    /// with a count of one.
    EndOfStream,
}

impl Symbol {
    /// Dense table index: the byte value, or 256 for end-of-stream.
    pub const fn index(self) -> usize {
        match self {
            Self::Byte(b) => b as usize,
            Self::EndOfStream => END_OF_STREAM_INDEX,
        }
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0..=255 => Some(Self::Byte(index as u8)),
            END_OF_STREAM_INDEX => Some(Self::EndOfStream),
            _ => None,
        }
    }

    /// The byte value, if this is not the end-of-stream marker.
    pub fn byte(self) -> Option<u8> {
        match self {
            Self::Byte(b) => Some(b),
            Self::EndOfStream => None,
        }
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Self::Byte(byte)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(b) if b.is_ascii_graphic() => write!(f, "'{}'", *b as char),
            Self::Byte(b) => write!(f, "0x{b:02x}"),
            Self::EndOfStream => f.write_str("EOF"),
        }
    }
}
