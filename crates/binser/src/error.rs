//! Error types for stream I/O and binary encoding/decoding.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::stream::StreamOrigin;

/// Coarse failure categories shared by every error in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// An encode with no writer bound, or a decode with no reader bound.
    CapabilityMissing,
    /// A read asked for more bytes than the stream holds.
    Underflow,
    /// A fixed-capacity container disagrees with the decoded count.
    SizeMismatch,
    /// The underlying medium rejected an operation.
    Io,
    /// A seek target fell outside the addressable range.
    InvalidSeek,
    /// The bytes do not form a valid value of the requested type.
    Malformed,
}

impl ErrorCategory {
    /// Returns a short lowercase name (e.g., "underflow").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::CapabilityMissing => "capability-missing",
            ErrorCategory::Underflow => "underflow",
            ErrorCategory::SizeMismatch => "size-mismatch",
            ErrorCategory::Io => "io",
            ErrorCategory::InvalidSeek => "invalid-seek",
            ErrorCategory::Malformed => "malformed",
        }
    }
}

/// Error raised by a stream backend.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("stream underflow: requested {requested} bytes, {available} available")]
    Underflow { requested: usize, available: usize },

    #[error("seek by {offset} from {origin:?} is out of range (length: {length})")]
    SeekOutOfRange {
        offset: i64,
        origin: StreamOrigin,
        length: u64,
    },

    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StreamError {
    /// Returns the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StreamError::Underflow { .. } => ErrorCategory::Underflow,
            StreamError::SeekOutOfRange { .. } => ErrorCategory::InvalidSeek,
            StreamError::Open { .. } | StreamError::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Error during binary encoding or decoding.
#[derive(Debug, Error)]
pub enum SerializeError {
    // === Capability missing ===
    #[error("no stream reader is bound to this serializer")]
    MissingReader,

    #[error("no stream writer is bound to this serializer")]
    MissingWriter,

    // === Stream failures (underflow, seek, I/O) ===
    #[error(transparent)]
    Stream(#[from] StreamError),

    // === Structure ===
    #[error("fixed-size sequence holds {expected} elements but the stream declares {found}")]
    SizeMismatch { expected: usize, found: u64 },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: u64,
        max: u64,
    },

    // === Invalid payloads ===
    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,

    #[error("invalid bool value: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("invalid char scalar value: {value:#x}")]
    InvalidChar { value: u32 },

    #[error("malformed encoding: {context}")]
    Malformed { context: &'static str },
}

impl SerializeError {
    /// Returns the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SerializeError::MissingReader | SerializeError::MissingWriter => {
                ErrorCategory::CapabilityMissing
            }
            SerializeError::Stream(e) => e.category(),
            SerializeError::SizeMismatch { .. } => ErrorCategory::SizeMismatch,
            SerializeError::LengthExceedsLimit { .. }
            | SerializeError::InvalidUtf8
            | SerializeError::InvalidBool { .. }
            | SerializeError::InvalidChar { .. }
            | SerializeError::Malformed { .. } => ErrorCategory::Malformed,
        }
    }

    /// Returns true if the stream ran out of bytes.
    pub fn is_underflow(&self) -> bool {
        self.category() == ErrorCategory::Underflow
    }
}

/// Error while parsing a GUID from text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GuidParseError {
    #[error("invalid GUID string {input:?}: {source}")]
    Invalid {
        input: String,
        #[source]
        source: uuid::Error,
    },
}
