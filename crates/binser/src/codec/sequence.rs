//! Sequences: a `u64` element count followed by each element.
//!
//! Three decode policies apply depending on the container:
//! - contiguous and growable (`Vec`, `String`): clear, then bulk-read or
//!   decode element by element into the same storage
//! - contiguous and fixed (`[T; N]`): the count must equal `N`, checked
//!   before the destination is touched
//! - appendable (`VecDeque`, `LinkedList`, sets): clear, then append each
//!   decoded element

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

use crate::codec::serializer::BinarySerializer;
use crate::codec::shape::{Binary, Shape};
use crate::error::SerializeError;
use crate::limits::MAX_PREALLOC_ELEMENTS;

/// Writes a count prefix and encodes each element in iteration order.
fn encode_each<'a, T, I>(
    ser: &mut BinarySerializer<'_>,
    len: usize,
    items: I,
) -> Result<(), SerializeError>
where
    T: Binary + 'a,
    I: IntoIterator<Item = &'a T>,
{
    ser.write_len(len)?;
    for item in items {
        item.encode(ser)?;
    }
    Ok(())
}

impl<T: Binary> Binary for Vec<T> {
    const SHAPE: Shape = Shape::Sequence;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        ser.write_len(self.len())?;
        T::encode_slice(self, ser)
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        let count = ser.read_len("sequence")?;
        let mut out = Vec::new();
        T::decode_extend(count, &mut out, ser)?;
        Ok(out)
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        let count = ser.read_len("sequence")?;
        self.clear();
        T::decode_extend(count, self, ser)
    }
}

impl<T: Binary, const N: usize> Binary for [T; N] {
    const SHAPE: Shape = Shape::Sequence;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        ser.write_len(N)?;
        T::encode_slice(self, ser)
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        ser.read_fixed_len(N)?;
        let mut items = Vec::with_capacity(N);
        T::decode_extend(N, &mut items, ser)?;
        items
            .try_into()
            .map_err(|items: Vec<T>| SerializeError::SizeMismatch {
                expected: N,
                found: items.len() as u64,
            })
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        ser.read_fixed_len(N)?;
        T::decode_into_slice(self, ser)
    }
}

impl Binary for String {
    const SHAPE: Shape = Shape::Sequence;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        ser.write_len(self.len())?;
        ser.write_bytes(self.as_bytes())
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        let count = ser.read_len("string")?;
        let mut bytes = Vec::new();
        u8::decode_extend(count, &mut bytes, ser)?;
        String::from_utf8(bytes).map_err(|_| SerializeError::InvalidUtf8)
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        let count = ser.read_len("string")?;
        let mut bytes = std::mem::take(self).into_bytes();
        bytes.clear();
        u8::decode_extend(count, &mut bytes, ser)?;
        *self = String::from_utf8(bytes).map_err(|_| SerializeError::InvalidUtf8)?;
        Ok(())
    }
}

impl<T: Binary> Binary for VecDeque<T> {
    const SHAPE: Shape = Shape::Sequence;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        encode_each(ser, self.len(), self)
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        let mut out = VecDeque::new();
        out.decode_in_place(ser)?;
        Ok(out)
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        let count = ser.read_len("sequence")?;
        self.clear();
        self.reserve(count.min(MAX_PREALLOC_ELEMENTS));
        for _ in 0..count {
            self.push_back(T::decode(ser)?);
        }
        Ok(())
    }
}

impl<T: Binary> Binary for LinkedList<T> {
    const SHAPE: Shape = Shape::Sequence;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        encode_each(ser, self.len(), self)
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        let mut out = LinkedList::new();
        out.decode_in_place(ser)?;
        Ok(out)
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        let count = ser.read_len("sequence")?;
        self.clear();
        for _ in 0..count {
            self.push_back(T::decode(ser)?);
        }
        Ok(())
    }
}

impl<T: Binary + Ord> Binary for BTreeSet<T> {
    const SHAPE: Shape = Shape::Sequence;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        encode_each(ser, self.len(), self)
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        let mut out = BTreeSet::new();
        out.decode_in_place(ser)?;
        Ok(out)
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        let count = ser.read_len("set")?;
        self.clear();
        for _ in 0..count {
            self.insert(T::decode(ser)?);
        }
        Ok(())
    }
}

impl<T, S> Binary for HashSet<T, S>
where
    T: Binary + Eq + Hash,
    S: BuildHasher + Default,
{
    const SHAPE: Shape = Shape::Sequence;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        encode_each(ser, self.len(), self)
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        let mut out = HashSet::with_hasher(S::default());
        out.decode_in_place(ser)?;
        Ok(out)
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        let count = ser.read_len("set")?;
        self.clear();
        self.reserve(count.min(MAX_PREALLOC_ELEMENTS));
        for _ in 0..count {
            self.insert(T::decode(ser)?);
        }
        Ok(())
    }
}
