//! Stream capability contracts and backends.
//!
//! The serializer never touches a concrete backend. It only sees the three
//! capabilities below:
//! - [`StreamReader`]: pull bytes and advance the cursor
//! - [`StreamWriter`]: push bytes at the cursor and advance it
//! - [`StreamBase`]: seek, tell and length queries
//!
//! Backends provided here:
//! - [`MemoryStream`]: growable in-memory buffer
//! - [`FileStream`]: file on disk with position-explicit I/O
//! - [`SliceReader`]: read-only view over a borrowed byte slice

pub mod file;
pub mod memory;
pub mod slice;

use std::io;

use crate::error::StreamError;

pub use file::{FileMode, FileStream};
pub use memory::MemoryStream;
pub use slice::SliceReader;

/// Reference point for [`StreamBase::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamOrigin {
    /// Offset from byte 0.
    Start,
    /// Offset from the current cursor.
    Current,
    /// Offset from the total length.
    End,
}

/// A byte source with a cursor.
pub trait StreamReader {
    /// Reads up to `out.len()` bytes and advances by the number read.
    ///
    /// Returns fewer bytes than requested only when the stream has no more.
    fn read(&mut self, out: &mut [u8]) -> Result<usize, StreamError>;

    /// Fills `out` completely or fails with [`StreamError::Underflow`].
    ///
    /// The default implementation may have consumed a prefix when it fails.
    /// Backends that know their remaining length override it so the cursor
    /// is left untouched on underflow.
    fn read_exact(&mut self, out: &mut [u8]) -> Result<(), StreamError> {
        let mut filled = 0;
        while filled < out.len() {
            let n = self.read(&mut out[filled..])?;
            if n == 0 {
                return Err(StreamError::Underflow {
                    requested: out.len(),
                    available: filled,
                });
            }
            filled += n;
        }
        Ok(())
    }

    /// Appends every remaining byte to `out` and returns how many were read.
    fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize, StreamError> {
        let mut chunk = [0u8; 4096];
        let mut total = 0;
        loop {
            let n = self.read(&mut chunk)?;
            if n == 0 {
                return Ok(total);
            }
            out.extend_from_slice(&chunk[..n]);
            total += n;
        }
    }

    /// Total size of the stream in bytes. May block for file-backed streams.
    fn stream_size(&self) -> Result<u64, StreamError>;

    /// Returns true once the cursor has reached the end.
    fn is_end_of_stream(&self) -> Result<bool, StreamError>;
}

/// A byte sink with a cursor.
pub trait StreamWriter {
    /// Writes bytes at the cursor and advances by the number written.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, StreamError>;

    /// Writes every byte of `bytes`.
    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), StreamError> {
        while !bytes.is_empty() {
            let n = self.write(bytes)?;
            if n == 0 {
                return Err(StreamError::Io(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "stream accepted zero bytes",
                )));
            }
            bytes = &bytes[n..];
        }
        Ok(())
    }

    /// Flushes buffered data to the underlying medium.
    fn flush(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}

/// Cursor positioning shared by readers and writers.
pub trait StreamBase {
    /// Moves the cursor and returns the new absolute position.
    ///
    /// Fails with [`StreamError::SeekOutOfRange`] without moving the cursor
    /// when the target is not addressable.
    fn seek(&mut self, offset: i64, origin: StreamOrigin) -> Result<u64, StreamError>;

    /// Current cursor position.
    fn tell(&self) -> u64;

    /// Total addressable length. Never disturbs the cursor.
    fn length(&self) -> Result<u64, StreamError>;

    /// Seeks back to byte 0.
    fn rewind(&mut self) -> Result<(), StreamError> {
        self.seek(0, StreamOrigin::Start).map(|_| ())
    }
}

/// Resolves `offset` from `origin` into an absolute position within `[0, max]`.
pub(crate) fn resolve_seek(
    offset: i64,
    origin: StreamOrigin,
    current: u64,
    length: u64,
    max: u64,
) -> Result<u64, StreamError> {
    let base = match origin {
        StreamOrigin::Start => 0,
        StreamOrigin::Current => current,
        StreamOrigin::End => length,
    };
    let target = if offset >= 0 {
        base.checked_add(offset.unsigned_abs())
    } else {
        base.checked_sub(offset.unsigned_abs())
    };
    match target {
        Some(pos) if pos <= max => Ok(pos),
        _ => Err(StreamError::SeekOutOfRange {
            offset,
            origin,
            length,
        }),
    }
}
