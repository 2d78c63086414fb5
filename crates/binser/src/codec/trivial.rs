//! Trivial scalars: raw in-memory bytes, host byte order.
//!
//! Any [`bytemuck::Pod`] type can be made trivial with
//! [`impl_trivial_binary!`](crate::impl_trivial_binary). Pod types get the
//! bulk path: a `Vec<T>` or `[T; N]` of them moves in one transfer instead
//! of one call per element. `bool` and `char` are trivial too but are
//! validated on decode, so they go element by element.

use std::mem;

use bytemuck::Pod;

use crate::codec::serializer::BinarySerializer;
use crate::codec::shape::{Binary, Shape};
use crate::error::SerializeError;
use crate::limits::BULK_CHUNK_BYTES;

/// Implements [`Binary`](crate::codec::Binary) with [`Shape::Trivial`] for
/// one or more [`bytemuck::Pod`] types.
///
/// ```rust
/// use binser::{impl_trivial_binary, decode_from_slice, encode_to_vec};
///
/// #[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// #[repr(C)]
/// struct Texel {
///     rgba: [u8; 4],
///     depth: f32,
/// }
///
/// impl_trivial_binary!(Texel);
///
/// let texels = vec![Texel { rgba: [1, 2, 3, 4], depth: 0.5 }; 3];
/// let bytes = encode_to_vec(&texels)?;
/// assert_eq!(bytes.len(), 8 + 3 * 8);
/// assert_eq!(decode_from_slice::<Vec<Texel>>(&bytes)?, texels);
/// # Ok::<(), binser::SerializeError>(())
/// ```
#[macro_export]
macro_rules! impl_trivial_binary {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::codec::Binary for $ty {
                const SHAPE: $crate::codec::Shape = $crate::codec::Shape::Trivial;

                #[inline]
                fn encode(
                    &self,
                    ser: &mut $crate::codec::BinarySerializer<'_>,
                ) -> ::core::result::Result<(), $crate::error::SerializeError> {
                    $crate::codec::trivial::encode_pod_slice(::core::slice::from_ref(self), ser)
                }

                #[inline]
                fn decode(
                    ser: &mut $crate::codec::BinarySerializer<'_>,
                ) -> ::core::result::Result<Self, $crate::error::SerializeError> {
                    $crate::codec::trivial::decode_pod(ser)
                }

                fn encode_slice(
                    items: &[Self],
                    ser: &mut $crate::codec::BinarySerializer<'_>,
                ) -> ::core::result::Result<(), $crate::error::SerializeError> {
                    $crate::codec::trivial::encode_pod_slice(items, ser)
                }

                fn decode_extend(
                    count: usize,
                    out: &mut ::std::vec::Vec<Self>,
                    ser: &mut $crate::codec::BinarySerializer<'_>,
                ) -> ::core::result::Result<(), $crate::error::SerializeError> {
                    $crate::codec::trivial::decode_pod_extend(count, out, ser)
                }

                fn decode_into_slice(
                    items: &mut [Self],
                    ser: &mut $crate::codec::BinarySerializer<'_>,
                ) -> ::core::result::Result<(), $crate::error::SerializeError> {
                    $crate::codec::trivial::decode_pod_slice(items, ser)
                }
            }
        )+
    };
}

crate::impl_trivial_binary!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
);

/// Writes the raw bytes of `items` in one transfer.
#[doc(hidden)]
#[inline]
pub fn encode_pod_slice<T: Pod>(
    items: &[T],
    ser: &mut BinarySerializer<'_>,
) -> Result<(), SerializeError> {
    ser.write_bytes(bytemuck::cast_slice(items))
}

/// Reads one Pod value.
#[doc(hidden)]
#[inline]
pub fn decode_pod<T: Pod>(ser: &mut BinarySerializer<'_>) -> Result<T, SerializeError> {
    let mut value = T::zeroed();
    ser.read_bytes(bytemuck::bytes_of_mut(&mut value))?;
    Ok(value)
}

/// Reads `count` Pod values onto the end of `out`.
///
/// Storage grows one chunk at a time, so a corrupt count fails with an
/// underflow once the data runs out rather than allocating the whole claim.
#[doc(hidden)]
pub fn decode_pod_extend<T: Pod>(
    count: usize,
    out: &mut Vec<T>,
    ser: &mut BinarySerializer<'_>,
) -> Result<(), SerializeError> {
    let chunk = (BULK_CHUNK_BYTES / mem::size_of::<T>().max(1)).max(1);
    let mut remaining = count;
    while remaining > 0 {
        let n = remaining.min(chunk);
        let start = out.len();
        out.resize(start + n, T::zeroed());
        ser.read_bytes(bytemuck::cast_slice_mut(&mut out[start..]))?;
        remaining -= n;
    }
    Ok(())
}

/// Fills `items` with Pod values in one transfer.
#[doc(hidden)]
#[inline]
pub fn decode_pod_slice<T: Pod>(
    items: &mut [T],
    ser: &mut BinarySerializer<'_>,
) -> Result<(), SerializeError> {
    ser.read_bytes(bytemuck::cast_slice_mut(items))
}

impl Binary for bool {
    const SHAPE: Shape = Shape::Trivial;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        ser.write_bytes(&[*self as u8])
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        match u8::decode(ser)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(SerializeError::InvalidBool { value }),
        }
    }
}

impl Binary for char {
    const SHAPE: Shape = Shape::Trivial;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        (*self as u32).encode(ser)
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        let value = u32::decode(ser)?;
        char::from_u32(value).ok_or(SerializeError::InvalidChar { value })
    }
}
