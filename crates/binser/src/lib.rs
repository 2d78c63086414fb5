//! binser: shape-dispatched binary serialization over pluggable streams.
//!
//! This crate encodes Rust values into a compact binary form and decodes
//! them back, reading from and writing to any stream that implements the
//! capability traits in [`stream`].
//!
//! # Overview
//!
//! Every serializable type falls into exactly one [`Shape`]:
//! - **Trivial**: fixed-size scalars, copied as raw bytes
//! - **Aggregate**: user types implementing [`Serializable`]
//! - **Sequence**: `Vec`, arrays, `String`, deques, lists and sets
//! - **Map**: `HashMap` and `BTreeMap`
//! - **Optional**: `Option`
//!
//! The shape is resolved at compile time through the [`Binary`] trait, and
//! nesting is unrestricted: a `Vec<[Option<String>; 4]>` or a
//! `HashMap<String, Vec<MyStruct>>` needs no extra code.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use binser::{BinarySerializer, MemoryStream, StreamBase};
//!
//! let mut scores = BTreeMap::new();
//! scores.insert(1i32, 1.5f32);
//! scores.insert(2, -3.25);
//!
//! let mut stream = MemoryStream::new();
//! BinarySerializer::for_writer(&mut stream)
//!     .encode(&scores)?
//!     .encode(&Some("done".to_string()))?;
//!
//! stream.rewind()?;
//! let mut ser = BinarySerializer::for_reader(&mut stream);
//! let decoded: BTreeMap<i32, f32> = ser.decode()?;
//! let status: Option<String> = ser.decode()?;
//! assert_eq!(decoded, scores);
//! assert_eq!(status.as_deref(), Some("done"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`codec`]: The serializer session and per-shape encodings
//! - [`stream`]: Stream capability traits and memory/file backends
//! - [`model`]: Fixed-width value types (GUID, version)
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and decoding limits
//!
//! # Wire Format
//!
//! - Trivial: the value's in-memory bytes in host byte order
//! - Sequence and map: a `u64` count in host byte order, then each element
//!   (or key then value) back to back with no padding
//! - Optional: one presence byte (`0` absent, `1` present), then the value
//! - Aggregate: the concatenation of whatever its fields write
//!
//! Nothing is self-describing: the reader must decode the same types in the
//! same order the writer encoded them. Data written on one byte order is not
//! portable to the other.
//!
//! # Security
//!
//! Decoding untrusted input is bounded: collection counts are checked
//! against [`SerializerOptions::max_collection_len`] and storage grows in
//! chunks, so a forged count fails with an underflow instead of exhausting
//! memory.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod stream;

// Re-export commonly used types at crate root
pub use codec::{
    Binary, BinarySerializer, Serializable, SerializerOptions, Shape, content_digest,
    decode_from_slice, encode_to_vec,
};
pub use error::{ErrorCategory, GuidParseError, SerializeError, StreamError};
pub use model::{Guid, Version};
pub use stream::{
    FileMode, FileStream, MemoryStream, SliceReader, StreamBase, StreamOrigin, StreamReader,
    StreamWriter,
};

#[doc(hidden)]
pub mod __private {
    pub use uuid;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
