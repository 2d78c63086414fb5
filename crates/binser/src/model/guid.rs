//! 16-byte globally unique identifiers.
//!
//! A [`Guid`] is an RFC 4122 UUID held as raw bytes. On the wire it is a
//! trivial scalar: its 16 bytes, no prefix.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::GuidParseError;

/// A 16-byte identifier.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct Guid([u8; 16]);

crate::impl_trivial_binary!(Guid);

/// Builds a [`Guid`] from a string literal, checked at compile time.
///
/// The literal is parsed by [`uuid::uuid!`], so a malformed string is a
/// compile error rather than a runtime one. The result is a constant
/// expression.
///
/// ```rust
/// use binser::{Guid, guid};
///
/// const ROOT: Guid = guid!("c0ffeeba-bede-adbe-ef01-2345678910cc");
/// assert_eq!(ROOT.to_string(), "c0ffeeba-bede-adbe-ef01-2345678910cc");
/// ```
///
/// ```compile_fail
/// let bad = binser::guid!("c0ffeeba-bede-adbe-ef01");
/// ```
#[macro_export]
macro_rules! guid {
    ($literal:literal) => {
        $crate::model::Guid::from_bytes($crate::__private::uuid::uuid!($literal).into_bytes())
    };
}

impl Guid {
    /// Creates a random (version 4) identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().into_bytes())
    }

    /// Derives a version 8 identifier from arbitrary bytes.
    ///
    /// ```text
    /// hash = SHA-256(input)[0:16]
    /// hash[6] = (hash[6] & 0x0F) | 0x80  // version 8
    /// hash[8] = (hash[8] & 0x3F) | 0x80  // RFC 4122 variant
    /// ```
    pub fn derived(input: &[u8]) -> Self {
        let hash = Sha256::digest(input);
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash[..16]);
        bytes[6] = (bytes[6] & 0x0F) | 0x80;
        bytes[8] = (bytes[8] & 0x3F) | 0x80;
        Self(bytes)
    }

    /// The all-zero identifier.
    pub const fn nil() -> Self {
        Self([0u8; 16])
    }

    /// Wraps 16 raw bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns false for the nil identifier.
    pub fn is_valid(&self) -> bool {
        self.0 != [0u8; 16]
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Uuid::from_bytes(self.0).hyphenated(), f)
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({self})")
    }
}

impl FromStr for Guid {
    type Err = GuidParseError;

    /// Parses hyphenated or bare hex, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s)
            .map(|uuid| Self(uuid.into_bytes()))
            .map_err(|source| GuidParseError::Invalid {
                input: s.to_string(),
                source,
            })
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.into_bytes())
    }
}

impl From<Guid> for Uuid {
    fn from(guid: Guid) -> Self {
        Uuid::from_bytes(guid.0)
    }
}
