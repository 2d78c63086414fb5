//! Aggregates: user types that encode their own fields.
//!
//! A type opts in by implementing [`Serializable`]; the blanket impl below
//! gives it [`Shape::Aggregate`]. No framing is added around the fields, so
//! the wire form is exactly what `serialize` writes.

use crate::codec::serializer::BinarySerializer;
use crate::codec::shape::{Binary, Shape};
use crate::error::SerializeError;

/// A user-defined aggregate.
///
/// `serialize` and `deserialize` must visit the same fields in the same
/// order; nothing on the wire tells them apart.
///
/// ```rust
/// use binser::{BinarySerializer, Serializable, SerializeError};
///
/// #[derive(Debug, PartialEq)]
/// struct Sample {
///     id: i32,
///     weight: f32,
///     tags: Vec<String>,
/// }
///
/// impl Serializable for Sample {
///     fn serialize(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
///         ser.encode(&self.id)?.encode(&self.weight)?.encode(&self.tags)?;
///         Ok(())
///     }
///
///     fn deserialize(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
///         Ok(Sample {
///             id: ser.decode()?,
///             weight: ser.decode()?,
///             tags: ser.decode()?,
///         })
///     }
/// }
///
/// let sample = Sample { id: 7, weight: 0.25, tags: vec!["a".into()] };
/// let bytes = binser::encode_to_vec(&sample)?;
/// assert_eq!(binser::decode_from_slice::<Sample>(&bytes)?, sample);
/// # Ok::<(), SerializeError>(())
/// ```
pub trait Serializable: Sized {
    /// Writes every field in declaration order.
    fn serialize(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError>;

    /// Reads every field in the order `serialize` wrote them.
    fn deserialize(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError>;
}

impl<T: Serializable> Binary for T {
    const SHAPE: Shape = Shape::Aggregate;

    #[inline]
    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        self.serialize(ser)
    }

    #[inline]
    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        T::deserialize(ser)
    }
}

macro_rules! impl_tuple_serializable {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Binary),+> Serializable for ($($name,)+) {
            fn serialize(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
                $(self.$idx.encode(ser)?;)+
                Ok(())
            }

            fn deserialize(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
                Ok(($($name::decode(ser)?,)+))
            }
        }
    };
}

impl_tuple_serializable!(A 0);
impl_tuple_serializable!(A 0, B 1);
impl_tuple_serializable!(A 0, B 1, C 2);
impl_tuple_serializable!(A 0, B 1, C 2, D 3);
impl_tuple_serializable!(A 0, B 1, C 2, D 3, E 4);
impl_tuple_serializable!(A 0, B 1, C 2, D 3, E 4, F 5);
