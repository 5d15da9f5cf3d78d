//! Bit-level I/O over a seekable byte handle.
//!
//! [`BitStream`] wraps any byte handle and adds single-bit reads and writes
//! on top of the ordinary byte I/O the handle already offers. Byte and bit
//! operations may be freely interleaved: the stream remembers the handle
//! position after its last bit operation and starts a fresh byte whenever
//! that position has moved underneath it.
//!
//! # Bit Ordering
//!
//! Bits are packed LSB-first: the first bit written into a byte lands in
//! bit position 0, the eighth in position 7. Reads consume bits in the same
//! order.
//!
//! # Write Persistence
//!
//! Every `write_bit` stores the byte in progress immediately, overwriting
//! the partial byte written by the previous call. There is no flush step and
//! no padding: after the last bit the output is already complete.
//!
//! # Preconditions
//!
//! Interleaving bit operations with ordinary reads and writes is supported.
//! Seeking the underlying handle directly (other than through [`BitStream::rewind`])
//! between bit operations is not.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::BitStream;
//! use std::io::Cursor;
//!
//! let mut out = BitStream::new(Cursor::new(Vec::new()));
//! for bit in [1, 0, 1, 1] {
//!     out.write_bit(bit).unwrap();
//! }
//! assert_eq!(out.get_ref().get_ref(), &vec![0b1101]);
//!
//! let mut input = BitStream::new(Cursor::new(vec![0b1101u8]));
//! assert_eq!(input.read_bit().unwrap(), Some(1));
//! assert_eq!(input.read_bit().unwrap(), Some(0));
//! ```

use crate::error::{OxiHuffError, Result};
use std::fs::File;
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

const BITS_PER_BYTE: u8 = 8;

/// A byte handle with an added single-bit read/write interface.
#[derive(Debug)]
pub struct BitStream<S> {
    /// Underlying handle; `None` once the stream has been closed.
    inner: Option<S>,
    /// Byte currently being consumed or assembled.
    current: u8,
    /// Next bit position within `current` (0-7); 8 means no byte in progress.
    cursor: u8,
    /// Handle position right after the last bit operation.
    last_position: u64,
    bits_read: u64,
    bits_written: u64,
}

impl<S> BitStream<S> {
    /// Wrap an already open handle.
    pub fn new(inner: S) -> Self {
        Self {
            inner: Some(inner),
            current: 0,
            cursor: BITS_PER_BYTE,
            last_position: 0,
            bits_read: 0,
            bits_written: 0,
        }
    }

    /// Whether the stream still owns its handle.
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Close the stream and hand the underlying handle back.
    ///
    /// Every later operation on this stream fails with
    /// [`OxiHuffError::StreamClosed`].
    pub fn close(&mut self) -> Result<S> {
        let inner = self
            .inner
            .take()
            .ok_or_else(|| OxiHuffError::stream_closed("close"))?;
        self.cursor = BITS_PER_BYTE;
        Ok(inner)
    }

    /// Get a reference to the underlying handle.
    ///
    /// # Panics
    ///
    /// Panics if the stream has been closed.
    pub fn get_ref(&self) -> &S {
        self.inner.as_ref().expect("bit stream is closed")
    }

    /// Get a mutable reference to the underlying handle.
    ///
    /// # Panics
    ///
    /// Panics if the stream has been closed.
    pub fn get_mut(&mut self) -> &mut S {
        self.inner.as_mut().expect("bit stream is closed")
    }

    /// Consume the stream and return the underlying handle, if still open.
    pub fn into_inner(self) -> Option<S> {
        self.inner
    }

    /// Total bits returned by [`read_bit`](Self::read_bit) so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Total bits stored by [`write_bit`](Self::write_bit) so far.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    fn handle(&mut self, operation: &'static str) -> Result<&mut S> {
        self.inner
            .as_mut()
            .ok_or_else(|| OxiHuffError::stream_closed(operation))
    }

    fn handle_io(&mut self) -> io::Result<&mut S> {
        self.inner
            .as_mut()
            .ok_or_else(|| io::Error::new(ErrorKind::NotConnected, "bit stream is closed"))
    }
}

impl BitStream<File> {
    /// Open an existing file for reading.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }

    /// Create (or truncate) a file for writing.
    ///
    /// The file is also opened for reading so that `size` and mixed
    /// operations behave the same as on an in-memory cursor.
    pub fn create_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::new(file))
    }
}

impl<S: Seek> BitStream<S> {
    /// Current byte offset of the underlying handle.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.handle("query position of")?.stream_position()?)
    }

    /// Seek back to the start of the stream.
    pub fn rewind(&mut self) -> Result<()> {
        self.handle("rewind")?.seek(SeekFrom::Start(0))?;
        self.cursor = BITS_PER_BYTE;
        Ok(())
    }

    /// Total length of the stream in bytes.
    ///
    /// The current position is restored before returning, including when
    /// seeking to the end fails.
    pub fn size(&mut self) -> Result<u64> {
        let inner = self.handle("get size of")?;
        let current = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0));
        let restored = inner.seek(SeekFrom::Start(current));
        let end = end?;
        restored?;
        Ok(end)
    }
}

impl<S: Read + Seek> BitStream<S> {
    /// Read a single bit.
    ///
    /// Returns `Some(0)` or `Some(1)`, or `None` once the underlying handle
    /// has no more bytes.
    pub fn read_bit(&mut self) -> Result<Option<u8>> {
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| OxiHuffError::stream_closed("read_bit"))?;
        let position = inner.stream_position()?;

        if self.cursor >= BITS_PER_BYTE || position != self.last_position {
            let Some(byte) = read_one(inner)? else {
                return Ok(None);
            };
            self.current = byte;
            self.cursor = 0;
            self.last_position = position + 1;
        }

        let bit = (self.current >> self.cursor) & 1;
        self.cursor += 1;
        self.bits_read += 1;
        Ok(Some(bit))
    }

    /// Read one ordinary byte, or `None` at end of data.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        read_one(self.handle("read_byte")?)
    }
}

impl<S: Write + Seek> BitStream<S> {
    /// Write a single bit (0 or 1).
    ///
    /// The byte in progress is written through to the handle on every call.
    pub fn write_bit(&mut self, bit: u8) -> Result<()> {
        if bit > 1 {
            return Err(OxiHuffError::invalid_bit(bit));
        }
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| OxiHuffError::stream_closed("write_bit"))?;
        let position = inner.stream_position()?;

        let fresh = self.cursor >= BITS_PER_BYTE || position != self.last_position;
        if fresh {
            self.current = 0;
            self.cursor = 0;
        }
        self.current |= bit << self.cursor;

        if fresh {
            inner.write_all(&[self.current])?;
            self.last_position = position + 1;
        } else {
            inner.seek(SeekFrom::Current(-1))?;
            inner.write_all(&[self.current])?;
        }

        self.cursor += 1;
        self.bits_written += 1;
        Ok(())
    }
}

impl<S: Read> Read for BitStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.handle_io()?.read(buf)
    }
}

impl<S: Write> Write for BitStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.handle_io()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.handle_io()?.flush()
    }
}

/// Read exactly one byte, retrying on interruption.
fn read_one<R: Read>(reader: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Copy `input` to `output` one bit at a time until `input` runs dry.
///
/// Returns the number of bits copied.
pub fn copy_bits<R, W>(input: &mut BitStream<R>, output: &mut BitStream<W>) -> Result<u64>
where
    R: Read + Seek,
    W: Write + Seek,
{
    let mut copied = 0u64;
    while let Some(bit) = input.read_bit()? {
        output.write_bit(bit)?;
        copied += 1;
    }
    Ok(copied)
}

/// Count the bit positions at which two streams differ.
///
/// Both streams are read in lockstep until both are exhausted. Once one side
/// runs out its end-of-data marker is compared against the other side's
/// bits, so every surplus bit of the longer stream counts as a difference.
pub fn count_bit_differences<A, B>(a: &mut BitStream<A>, b: &mut BitStream<B>) -> Result<u64>
where
    A: Read + Seek,
    B: Read + Seek,
{
    let mut differences = 0u64;
    loop {
        let left = a.read_bit()?;
        let right = b.read_bit()?;
        if left.is_none() && right.is_none() {
            return Ok(differences);
        }
        if left != right {
            differences += 1;
        }
    }
}
