//! Shape classification and the dispatch trait.

use crate::codec::serializer::BinarySerializer;
use crate::error::SerializeError;
use crate::limits::MAX_PREALLOC_ELEMENTS;

/// Structural category of a value, governing its encoding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Fixed-size scalar written as its raw in-memory bytes.
    Trivial,
    /// User-defined aggregate that encodes its own fields.
    Aggregate,
    /// Ordered collection of one element type, prefixed by its count.
    Sequence,
    /// Unique-key associative container, prefixed by its pair count.
    Map,
    /// Zero or one inner value, prefixed by a presence byte.
    Optional,
}

impl Shape {
    /// Returns the lowercase name of the shape.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Trivial => "trivial",
            Shape::Aggregate => "aggregate",
            Shape::Sequence => "sequence",
            Shape::Map => "map",
            Shape::Optional => "optional",
        }
    }
}

/// A value the [`BinarySerializer`] can encode and decode.
///
/// Each implementing type declares exactly one [`Shape`] through
/// [`Binary::SHAPE`], and the dispatch is resolved statically at the call
/// site. The slice hooks let a container hand its whole backing storage to
/// the element type: their defaults go element by element, and trivial
/// scalars override them with a single bulk transfer.
pub trait Binary: Sized {
    /// The shape category of this type.
    const SHAPE: Shape;

    /// Writes `self` to the serializer's writer.
    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError>;

    /// Reads a new value from the serializer's reader.
    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError>;

    /// Reads a value into `self`, reusing its storage where the type can.
    ///
    /// On failure `self` may be partially overwritten.
    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        *self = Self::decode(ser)?;
        Ok(())
    }

    /// Encodes a contiguous run of values, without a length prefix.
    fn encode_slice(items: &[Self], ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        for item in items {
            item.encode(ser)?;
        }
        Ok(())
    }

    /// Decodes `count` values and appends them to `out`.
    fn decode_extend(
        count: usize,
        out: &mut Vec<Self>,
        ser: &mut BinarySerializer<'_>,
    ) -> Result<(), SerializeError> {
        out.reserve(count.min(MAX_PREALLOC_ELEMENTS));
        for _ in 0..count {
            out.push(Self::decode(ser)?);
        }
        Ok(())
    }

    /// Decodes exactly `items.len()` values into existing storage.
    fn decode_into_slice(
        items: &mut [Self],
        ser: &mut BinarySerializer<'_>,
    ) -> Result<(), SerializeError> {
        for item in items {
            item.decode_in_place(ser)?;
        }
        Ok(())
    }
}
