//! Packed version numbers.

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// A release version packed into one `u64`.
///
/// ```text
/// bits 63..56  major       (u8)
/// bits 55..48  minor       (u8)
/// bits 47..32  revision    (u16)
/// bits 31..0   build date  (u32, e.g. 20250726)
/// ```
///
/// Ordering compares the packed value, so a later build of the same release
/// sorts after an earlier one.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct Version(u64);

crate::impl_trivial_binary!(Version);

impl Version {
    /// Packs the four fields into a version.
    pub const fn new(major: u8, minor: u8, revision: u16, build_date: u32) -> Self {
        Self(
            (major as u64) << 56
                | (minor as u64) << 48
                | (revision as u64) << 32
                | build_date as u64,
        )
    }

    /// Wraps an already packed value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the packed value.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Major version, the top byte.
    pub const fn major(&self) -> u8 {
        (self.0 >> 56) as u8
    }

    /// Minor version.
    pub const fn minor(&self) -> u8 {
        (self.0 >> 48) as u8
    }

    /// Revision number.
    pub const fn revision(&self) -> u16 {
        (self.0 >> 32) as u16
    }

    /// Build date, conventionally `YYYYMMDD`.
    pub const fn build_date(&self) -> u32 {
        self.0 as u32
    }

    /// The major, minor and revision fields without the build date.
    pub const fn pure_version(&self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// The version of this library.
    ///
    /// Major, minor and revision come from the package version. The build
    /// date is read from `BINSER_BUILD_DATE` (`YYYYMMDD`) at compile time and
    /// is 0 when that variable is unset.
    pub const fn current() -> Self {
        let build_date = match option_env!("BINSER_BUILD_DATE") {
            Some(date) => parse_decimal(date) as u32,
            None => 0,
        };
        Self::new(
            parse_decimal(env!("CARGO_PKG_VERSION_MAJOR")) as u8,
            parse_decimal(env!("CARGO_PKG_VERSION_MINOR")) as u8,
            parse_decimal(env!("CARGO_PKG_VERSION_PATCH")) as u16,
            build_date,
        )
    }
}

/// Parses the leading ASCII digits of `s`, stopping at the first other byte.
const fn parse_decimal(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut value = 0u64;
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        let digit = (bytes[i] - b'0') as u64;
        value = value.saturating_mul(10).saturating_add(digit);
        i += 1;
    }
    value
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{} (Build {})",
            self.major(),
            self.minor(),
            self.revision(),
            self.build_date()
        )
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({self})")
    }
}
