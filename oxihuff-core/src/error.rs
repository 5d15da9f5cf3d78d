//! Error types for OxiHuff operations.
//!
//! A single error type covers every failure a compression or decompression
//! call can hit: I/O on the underlying handles, misuse of the bit stream, and
//! malformed compressed input. Malformed input is reported per phase so a
//! caller can tell a damaged header apart from a truncated body.

use std::fmt;
use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stream operation was invoked after the stream was closed.
    #[error("Cannot {operation} on a stream which is not open")]
    StreamClosed {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// `write_bit` was given something other than 0 or 1.
    #[error("write_bit expects 0 or 1, got {value}")]
    InvalidBit {
        /// The rejected value.
        value: u8,
    },

    /// The frequency header could not be parsed.
    #[error("Invalid header at offset {offset}: {message}")]
    InvalidHeader {
        /// Byte offset (from the start of the header) where parsing failed.
        offset: u64,
        /// Description of the header error.
        message: String,
    },

    /// The recovered frequency table cannot produce a Huffman tree.
    #[error("Cannot rebuild Huffman tree: {message}")]
    InvalidTree {
        /// Description of the problem.
        message: String,
    },

    /// The compressed body ended before the end-of-stream code was seen.
    #[error("Compressed body truncated at bit position {bit_position}")]
    TruncatedBody {
        /// Number of body bits consumed before the data ran out.
        bit_position: u64,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

/// The phase of a compress/decompress call an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    /// Underlying I/O.
    Io,
    /// Bit stream misuse (closed stream, bad bit value).
    Stream,
    /// Header parsing.
    Header,
    /// Tree reconstruction from the parsed counts.
    Tree,
    /// Body decoding.
    Body,
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Io => "I/O",
            Self::Stream => "bit stream",
            Self::Header => "header parse",
            Self::Tree => "tree reconstruction",
            Self::Body => "body decode",
        };
        f.write_str(name)
    }
}

impl OxiHuffError {
    /// Create a closed-stream error for `operation`.
    pub fn stream_closed(operation: &'static str) -> Self {
        Self::StreamClosed { operation }
    }

    /// Create an invalid bit error.
    pub fn invalid_bit(value: u8) -> Self {
        Self::InvalidBit { value }
    }

    /// Create an invalid header error.
    pub fn invalid_header(offset: u64, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid tree error.
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree {
            message: message.into(),
        }
    }

    /// Create a truncated body error.
    pub fn truncated_body(bit_position: u64) -> Self {
        Self::TruncatedBody { bit_position }
    }

    /// The phase this error was raised in.
    pub fn phase(&self) -> ErrorPhase {
        match self {
            Self::Io(_) => ErrorPhase::Io,
            Self::StreamClosed { .. } | Self::InvalidBit { .. } => ErrorPhase::Stream,
            Self::InvalidHeader { .. } => ErrorPhase::Header,
            Self::InvalidTree { .. } => ErrorPhase::Tree,
            Self::TruncatedBody { .. } => ErrorPhase::Body,
        }
    }

    /// Whether the error means the compressed input itself is malformed.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self.phase(),
            ErrorPhase::Header | ErrorPhase::Tree | ErrorPhase::Body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiHuffError::invalid_header(3, "expected a digit");
        assert!(err.to_string().contains("offset 3"));
        assert!(err.to_string().contains("expected a digit"));

        let err = OxiHuffError::stream_closed("rewind");
        assert_eq!(
            err.to_string(),
            "Cannot rewind on a stream which is not open"
        );

        let err = OxiHuffError::invalid_bit(2);
        assert!(err.to_string().contains("got 2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: OxiHuffError = io_err.into();
        assert!(matches!(err, OxiHuffError::Io(_)));
        assert_eq!(err.phase(), ErrorPhase::Io);
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn test_phases() {
        assert_eq!(
            OxiHuffError::invalid_header(0, "x").phase(),
            ErrorPhase::Header
        );
        assert_eq!(OxiHuffError::invalid_tree("x").phase(), ErrorPhase::Tree);
        assert_eq!(OxiHuffError::truncated_body(9).phase(), ErrorPhase::Body);
        assert_eq!(OxiHuffError::invalid_bit(7).phase(), ErrorPhase::Stream);

        assert!(OxiHuffError::truncated_body(9).is_malformed_input());
        assert!(!OxiHuffError::stream_closed("size").is_malformed_input());
        assert_eq!(ErrorPhase::Body.to_string(), "body decode");
    }
}
