//! The serializer session bound to a reader and/or a writer.

use std::fmt;

use tracing::debug;

use crate::codec::shape::Binary;
use crate::error::SerializeError;
use crate::limits::{
    DEFAULT_MAX_COLLECTION_LEN, LENGTH_PREFIX_BYTES, PRESENCE_ABSENT, PRESENCE_PRESENT,
};
use crate::stream::{StreamReader, StreamWriter};

/// Runtime knobs for a [`BinarySerializer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Largest element or pair count a decode accepts for a variable-length
    /// sequence, string or map.
    ///
    /// Counts above this fail with [`SerializeError::LengthExceedsLimit`]
    /// before anything is allocated.
    pub max_collection_len: u64,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
        }
    }
}

impl SerializerOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum decoded collection length.
    pub fn max_collection_len(mut self, max: u64) -> Self {
        self.max_collection_len = max;
        self
    }
}

/// A binary encode/decode session.
///
/// The session borrows its reader and writer for `'a` and owns no buffer of
/// its own: every call goes straight through to the bound stream and
/// advances its cursor. Either side may be absent, which restricts the
/// session to one direction of traffic. Encoding without a writer fails with
/// [`SerializeError::MissingWriter`], decoding without a reader with
/// [`SerializeError::MissingReader`].
///
/// After any error the stream position is unspecified; callers should treat
/// the whole pass as failed and re-position the stream before reusing it.
///
/// ```rust
/// use binser::{BinarySerializer, MemoryStream, StreamBase};
///
/// let mut stream = MemoryStream::new();
/// BinarySerializer::for_writer(&mut stream)
///     .encode(&123456u32)?
///     .encode(&vec![1u32, 2, 3])?;
///
/// stream.rewind()?;
/// let mut ser = BinarySerializer::for_reader(&mut stream);
/// assert_eq!(ser.decode::<u32>()?, 123456);
/// assert_eq!(ser.decode::<Vec<u32>>()?, vec![1, 2, 3]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BinarySerializer<'a> {
    reader: Option<&'a mut dyn StreamReader>,
    writer: Option<&'a mut dyn StreamWriter>,
    options: SerializerOptions,
}

impl<'a> BinarySerializer<'a> {
    /// Creates a session from an optional reader and an optional writer.
    pub fn new(
        reader: Option<&'a mut dyn StreamReader>,
        writer: Option<&'a mut dyn StreamWriter>,
    ) -> Self {
        Self {
            reader,
            writer,
            options: SerializerOptions::default(),
        }
    }

    /// Creates a decode-only session.
    pub fn for_reader(reader: &'a mut dyn StreamReader) -> Self {
        Self::new(Some(reader), None)
    }

    /// Creates an encode-only session.
    pub fn for_writer(writer: &'a mut dyn StreamWriter) -> Self {
        Self::new(None, Some(writer))
    }

    /// Creates a session that can both encode and decode.
    pub fn bidirectional(
        reader: &'a mut dyn StreamReader,
        writer: &'a mut dyn StreamWriter,
    ) -> Self {
        Self::new(Some(reader), Some(writer))
    }

    /// Replaces the session options.
    pub fn with_options(mut self, options: SerializerOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the session options.
    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Returns true if a reader is bound.
    pub fn has_reader(&self) -> bool {
        self.reader.is_some()
    }

    /// Returns true if a writer is bound.
    pub fn has_writer(&self) -> bool {
        self.writer.is_some()
    }

    /// Encodes `value` to the writer.
    pub fn encode<T: Binary>(&mut self, value: &T) -> Result<&mut Self, SerializeError> {
        value.encode(self)?;
        Ok(self)
    }

    /// Decodes a new value of type `T` from the reader.
    pub fn decode<T: Binary>(&mut self) -> Result<T, SerializeError> {
        T::decode(self)
    }

    /// Decodes into an existing value, reusing its storage where possible.
    pub fn decode_into<T: Binary>(&mut self, value: &mut T) -> Result<&mut Self, SerializeError> {
        value.decode_in_place(self)?;
        Ok(self)
    }

    /// Writes raw bytes to the writer.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerializeError> {
        let writer = self.writer.as_deref_mut().ok_or(SerializeError::MissingWriter)?;
        writer.write_all(bytes)?;
        Ok(())
    }

    /// Fills `out` from the reader, failing on underflow.
    #[inline]
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), SerializeError> {
        let reader = self.reader.as_deref_mut().ok_or(SerializeError::MissingReader)?;
        reader.read_exact(out)?;
        Ok(())
    }

    /// Writes a length prefix.
    pub fn write_len(&mut self, len: usize) -> Result<(), SerializeError> {
        self.write_bytes(&(len as u64).to_ne_bytes())
    }

    /// Reads a raw length prefix without applying limits.
    pub fn read_count(&mut self) -> Result<u64, SerializeError> {
        let mut buf = [0u8; LENGTH_PREFIX_BYTES];
        self.read_bytes(&mut buf)?;
        Ok(u64::from_ne_bytes(buf))
    }

    /// Reads a length prefix and checks it against the configured limit.
    pub fn read_len(&mut self, field: &'static str) -> Result<usize, SerializeError> {
        let len = self.read_count()?;
        let max = self.options.max_collection_len;
        if len > max {
            debug!(field, len, max, "collection length exceeds limit");
            return Err(SerializeError::LengthExceedsLimit { field, len, max });
        }
        usize::try_from(len).map_err(|_| SerializeError::LengthExceedsLimit {
            field,
            len,
            max: usize::MAX as u64,
        })
    }

    /// Reads a length prefix that must equal `expected`.
    ///
    /// Fails with [`SerializeError::SizeMismatch`] otherwise.
    pub fn read_fixed_len(&mut self, expected: usize) -> Result<(), SerializeError> {
        let found = self.read_count()?;
        if found != expected as u64 {
            debug!(expected, found, "fixed-size sequence length mismatch");
            return Err(SerializeError::SizeMismatch { expected, found });
        }
        Ok(())
    }

    /// Writes an optional-value presence byte.
    pub fn write_presence(&mut self, present: bool) -> Result<(), SerializeError> {
        let byte = if present { PRESENCE_PRESENT } else { PRESENCE_ABSENT };
        self.write_bytes(&[byte])
    }

    /// Reads a presence byte. Zero means absent, anything else present.
    pub fn read_presence(&mut self) -> Result<bool, SerializeError> {
        let mut byte = [0u8; 1];
        self.read_bytes(&mut byte)?;
        Ok(byte[0] != PRESENCE_ABSENT)
    }
}

impl fmt::Debug for BinarySerializer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinarySerializer")
            .field("has_reader", &self.has_reader())
            .field("has_writer", &self.has_writer())
            .field("options", &self.options)
            .finish()
    }
}
