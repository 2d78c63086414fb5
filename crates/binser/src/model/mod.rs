//! Fixed-width value types that travel as trivial scalars.
//!
//! - [`Guid`]: 16-byte globally unique identifier
//! - [`Version`]: packed release number with build date

pub mod guid;
pub mod version;

pub use guid::Guid;
pub use version::Version;
