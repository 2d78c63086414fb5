//! Read-only stream over a borrowed byte slice.

use crate::error::StreamError;
use crate::stream::{StreamBase, StreamOrigin, StreamReader, resolve_seek};

/// Reader for decoding from borrowed bytes.
///
/// Wraps a byte slice and tracks a cursor with bounds checking.
/// Nothing is copied until a decode asks for it.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl StreamReader for SliceReader<'_> {
    #[inline]
    fn read(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        let n = out.len().min(self.remaining_len());
        out[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    #[inline]
    fn read_exact(&mut self, out: &mut [u8]) -> Result<(), StreamError> {
        let available = self.remaining_len();
        if out.len() > available {
            return Err(StreamError::Underflow {
                requested: out.len(),
                available,
            });
        }
        out.copy_from_slice(&self.data[self.pos..self.pos + out.len()]);
        self.pos += out.len();
        Ok(())
    }

    fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize, StreamError> {
        let rest = self.remaining();
        out.extend_from_slice(rest);
        self.pos = self.data.len();
        Ok(rest.len())
    }

    fn stream_size(&self) -> Result<u64, StreamError> {
        Ok(self.data.len() as u64)
    }

    fn is_end_of_stream(&self) -> Result<bool, StreamError> {
        Ok(self.pos >= self.data.len())
    }
}

impl StreamBase for SliceReader<'_> {
    fn seek(&mut self, offset: i64, origin: StreamOrigin) -> Result<u64, StreamError> {
        let len = self.data.len() as u64;
        let target = resolve_seek(offset, origin, self.pos as u64, len, len)?;
        self.pos = target as usize;
        Ok(target)
    }

    fn tell(&self) -> u64 {
        self.pos as u64
    }

    fn length(&self) -> Result<u64, StreamError> {
        Ok(self.data.len() as u64)
    }
}
