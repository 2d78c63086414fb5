//! Shape-dispatched binary encoding and decoding.
//!
//! Every value belongs to one [`Shape`]; the [`Binary`] impl for its type
//! picks the wire strategy at compile time. See the crate docs for the wire
//! format.

pub mod aggregate;
pub mod map;
pub mod optional;
pub mod sequence;
pub mod serializer;
pub mod shape;
pub mod trivial;

use sha2::{Digest, Sha256};

pub use aggregate::Serializable;
pub use serializer::{BinarySerializer, SerializerOptions};
pub use shape::{Binary, Shape};

use crate::error::SerializeError;
use crate::stream::{MemoryStream, SliceReader};

/// Encodes `value` into a fresh byte vector.
pub fn encode_to_vec<T: Binary>(value: &T) -> Result<Vec<u8>, SerializeError> {
    let mut stream = MemoryStream::new();
    BinarySerializer::for_writer(&mut stream).encode(value)?;
    Ok(stream.into_bytes())
}

/// Decodes one `T` from the front of `input`.
///
/// Bytes after the value are ignored.
pub fn decode_from_slice<T: Binary>(input: &[u8]) -> Result<T, SerializeError> {
    let mut reader = SliceReader::new(input);
    let value = BinarySerializer::for_reader(&mut reader).decode()?;
    Ok(value)
}

/// Computes the SHA-256 digest of the encoding of `value`.
///
/// Equal values of a type with a deterministic encoding give equal digests.
/// Hashed maps and sets encode in iteration order, so theirs may differ.
pub fn content_digest<T: Binary>(value: &T) -> Result<[u8; 32], SerializeError> {
    let bytes = encode_to_vec(value)?;
    let hash = Sha256::digest(&bytes);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hash);
    Ok(digest)
}
