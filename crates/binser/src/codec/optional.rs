//! Optionals: one presence byte, then the inner value if present.

use crate::codec::serializer::BinarySerializer;
use crate::codec::shape::{Binary, Shape};
use crate::error::SerializeError;

impl<T: Binary> Binary for Option<T> {
    const SHAPE: Shape = Shape::Optional;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        ser.write_presence(self.is_some())?;
        if let Some(value) = self {
            value.encode(ser)?;
        }
        Ok(())
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        if ser.read_presence()? {
            Ok(Some(T::decode(ser)?))
        } else {
            Ok(None)
        }
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        if !ser.read_presence()? {
            *self = None;
            return Ok(());
        }
        match self {
            Some(value) => value.decode_in_place(ser),
            None => {
                *self = Some(T::decode(ser)?);
                Ok(())
            }
        }
    }
}
