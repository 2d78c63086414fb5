//! Wire constants and decoding limits.

/// Size in bytes of the length prefix before every sequence and map.
pub const LENGTH_PREFIX_BYTES: usize = std::mem::size_of::<u64>();

/// Presence byte written for `None`.
pub const PRESENCE_ABSENT: u8 = 0;

/// Presence byte written for `Some(_)`.
pub const PRESENCE_PRESENT: u8 = 1;

/// Default maximum element (or pair) count accepted by a decode.
pub const DEFAULT_MAX_COLLECTION_LEN: u64 = 1 << 32;

/// Upper bound on elements reserved up front when decoding element by element.
///
/// Counts come from the stream and may be corrupt, so capacity grows with
/// the data actually decoded past this point.
pub const MAX_PREALLOC_ELEMENTS: usize = 4096;

/// Bytes transferred per step when bulk-reading trivial elements.
pub const BULK_CHUNK_BYTES: usize = 64 * 1024;
