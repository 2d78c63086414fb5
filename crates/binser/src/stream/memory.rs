//! Growable in-memory stream.

use crate::error::StreamError;
use crate::stream::{StreamBase, StreamOrigin, StreamReader, StreamWriter, resolve_seek};

/// In-memory stream backed by a `Vec<u8>`.
///
/// Writing inserts at the cursor and shifts any trailing bytes, so a stream
/// rewound to an earlier position keeps its tail instead of overwriting it.
/// Reading past the end returns only the bytes that remain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStream {
    buf: Vec<u8>,
    pos: usize,
}

impl MemoryStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty stream with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            pos: 0,
        }
    }

    /// Returns the full buffer regardless of the cursor.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the stream and returns its buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns the buffer length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of bytes between the cursor and the end.
    pub fn remaining_len(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Drops every byte and resets the cursor.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }

    /// Sets the buffer to exactly `len` bytes, zero-filling on growth.
    ///
    /// The cursor is clamped to the new length.
    pub fn resize(&mut self, len: usize) {
        self.buf.resize(len, 0);
        self.pos = self.pos.min(len);
    }
}

impl From<Vec<u8>> for MemoryStream {
    fn from(buf: Vec<u8>) -> Self {
        Self { buf, pos: 0 }
    }
}

impl StreamReader for MemoryStream {
    fn read(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        let n = out.len().min(self.remaining_len());
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn read_exact(&mut self, out: &mut [u8]) -> Result<(), StreamError> {
        let available = self.remaining_len();
        if out.len() > available {
            return Err(StreamError::Underflow {
                requested: out.len(),
                available,
            });
        }
        out.copy_from_slice(&self.buf[self.pos..self.pos + out.len()]);
        self.pos += out.len();
        Ok(())
    }

    fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize, StreamError> {
        let n = self.remaining_len();
        out.extend_from_slice(&self.buf[self.pos..]);
        self.pos = self.buf.len();
        Ok(n)
    }

    fn stream_size(&self) -> Result<u64, StreamError> {
        Ok(self.buf.len() as u64)
    }

    fn is_end_of_stream(&self) -> Result<bool, StreamError> {
        Ok(self.pos >= self.buf.len())
    }
}

impl StreamWriter for MemoryStream {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, StreamError> {
        if self.pos == self.buf.len() {
            self.buf.extend_from_slice(bytes);
        } else {
            self.buf.splice(self.pos..self.pos, bytes.iter().copied());
        }
        self.pos += bytes.len();
        Ok(bytes.len())
    }
}

impl StreamBase for MemoryStream {
    fn seek(&mut self, offset: i64, origin: StreamOrigin) -> Result<u64, StreamError> {
        let len = self.buf.len() as u64;
        let target = resolve_seek(offset, origin, self.pos as u64, len, len)?;
        // target <= buf.len(), so it fits in usize
        self.pos = target as usize;
        Ok(target)
    }

    fn tell(&self) -> u64 {
        self.pos as u64
    }

    fn length(&self) -> Result<u64, StreamError> {
        Ok(self.buf.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_appends_and_advances() {
        let mut stream = MemoryStream::new();
        stream.write_all(b"hello").unwrap();
        stream.write_all(b" world").unwrap();
        assert_eq!(stream.as_bytes(), b"hello world");
        assert_eq!(stream.tell(), 11);
        assert!(stream.is_end_of_stream().unwrap());
    }

    #[test]
    fn test_write_mid_buffer_inserts() {
        let mut stream = MemoryStream::from(b"abef".to_vec());
        stream.seek(2, StreamOrigin::Start).unwrap();
        stream.write_all(b"cd").unwrap();
        assert_eq!(stream.as_bytes(), b"abcdef");
        assert_eq!(stream.tell(), 4);
    }

    #[test]
    fn test_read_caps_at_tail() {
        let mut stream = MemoryStream::from(vec![1, 2, 3]);
        let mut out = [0u8; 8];
        let n = stream.read(&mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&out[..3], &[1, 2, 3]);
        assert_eq!(stream.read(&mut out).unwrap(), 0);
    }

    #[test]
    fn test_read_exact_underflow_keeps_cursor() {
        let mut stream = MemoryStream::from(vec![1, 2, 3]);
        stream.seek(1, StreamOrigin::Start).unwrap();
        let mut out = [0u8; 4];
        let result = stream.read_exact(&mut out);
        assert!(matches!(
            result,
            Err(StreamError::Underflow {
                requested: 4,
                available: 2
            })
        ));
        assert_eq!(stream.tell(), 1);
    }

    #[test]
    fn test_read_to_end() {
        let mut stream = MemoryStream::from(vec![9, 8, 7, 6]);
        stream.seek(1, StreamOrigin::Start).unwrap();
        let mut out = Vec::new();
        assert_eq!(stream.read_to_end(&mut out).unwrap(), 3);
        assert_eq!(out, vec![8, 7, 6]);
        assert!(stream.is_end_of_stream().unwrap());
    }

    #[test]
    fn test_seek_bounds() {
        let mut stream = MemoryStream::from(vec![0u8; 10]);
        assert_eq!(stream.seek(4, StreamOrigin::Start).unwrap(), 4);
        assert_eq!(stream.seek(3, StreamOrigin::Current).unwrap(), 7);
        assert_eq!(stream.seek(-10, StreamOrigin::End).unwrap(), 0);
        assert_eq!(stream.seek(0, StreamOrigin::End).unwrap(), 10);

        stream.seek(5, StreamOrigin::Start).unwrap();
        assert!(stream.seek(11, StreamOrigin::Start).is_err());
        assert!(stream.seek(-6, StreamOrigin::Current).is_err());
        assert!(stream.seek(1, StreamOrigin::End).is_err());
        assert_eq!(stream.tell(), 5);
    }

    #[test]
    fn test_resize_clamps_cursor() {
        let mut stream = MemoryStream::from(vec![1u8; 8]);
        stream.seek(0, StreamOrigin::End).unwrap();
        stream.resize(4);
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.tell(), 4);

        stream.resize(6);
        assert_eq!(stream.as_bytes(), &[1, 1, 1, 1, 0, 0]);
        assert_eq!(stream.length().unwrap(), 6);
    }
}
