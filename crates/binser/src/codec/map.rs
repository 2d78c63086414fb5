//! Maps: a `u64` pair count followed by alternating keys and values.
//!
//! Pairs are written in the container's iteration order, which is
//! unspecified for hashed maps. Decoding clears the destination and inserts
//! each pair; a repeated key keeps the last value read.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::codec::serializer::BinarySerializer;
use crate::codec::shape::{Binary, Shape};
use crate::error::SerializeError;
use crate::limits::MAX_PREALLOC_ELEMENTS;

fn encode_pairs<'a, K, V, I>(
    ser: &mut BinarySerializer<'_>,
    len: usize,
    pairs: I,
) -> Result<(), SerializeError>
where
    K: Binary + 'a,
    V: Binary + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    ser.write_len(len)?;
    for (key, value) in pairs {
        key.encode(ser)?;
        value.encode(ser)?;
    }
    Ok(())
}

impl<K, V, S> Binary for HashMap<K, V, S>
where
    K: Binary + Eq + Hash,
    V: Binary,
    S: BuildHasher + Default,
{
    const SHAPE: Shape = Shape::Map;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        encode_pairs(ser, self.len(), self)
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        let mut out = HashMap::with_hasher(S::default());
        out.decode_in_place(ser)?;
        Ok(out)
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        let count = ser.read_len("map")?;
        self.clear();
        self.reserve(count.min(MAX_PREALLOC_ELEMENTS));
        for _ in 0..count {
            let key = K::decode(ser)?;
            let value = V::decode(ser)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

impl<K, V> Binary for BTreeMap<K, V>
where
    K: Binary + Ord,
    V: Binary,
{
    const SHAPE: Shape = Shape::Map;

    fn encode(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        encode_pairs(ser, self.len(), self)
    }

    fn decode(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        let mut out = BTreeMap::new();
        out.decode_in_place(ser)?;
        Ok(out)
    }

    fn decode_in_place(&mut self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        let count = ser.read_len("map")?;
        self.clear();
        for _ in 0..count {
            let key = K::decode(ser)?;
            let value = V::decode(ser)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_from_slice, encode_to_vec};
    use crate::limits::LENGTH_PREFIX_BYTES;
    use crate::stream::MemoryStream;

    #[test]
    fn test_btreemap_layout() {
        let mut input = BTreeMap::new();
        input.insert(1i32, 1.5f32);
        input.insert(2, -3.25);
        input.insert(5, 42.0);

        let bytes = encode_to_vec(&input).unwrap();
        assert_eq!(bytes.len(), LENGTH_PREFIX_BYTES + 3 * (4 + 4));
        assert_eq!(&bytes[..8], &3u64.to_ne_bytes());
        // ordered map, so the first pair is key 1
        assert_eq!(&bytes[8..12], &1i32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &1.5f32.to_ne_bytes());

        let decoded: BTreeMap<i32, f32> = decode_from_slice(&bytes).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_hashmap_string_keys() {
        let input: HashMap<String, i32> = [("one", 1), ("two", 2), ("", -7)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let bytes = encode_to_vec(&input).unwrap();
        let decoded: HashMap<String, i32> = decode_from_slice(&bytes).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_empty_map() {
        let bytes = encode_to_vec(&HashMap::<u8, u8>::new()).unwrap();
        assert_eq!(bytes, 0u64.to_ne_bytes().to_vec());
        let decoded: HashMap<u8, u8> = decode_from_slice(&bytes).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_in_place_clears_existing() {
        let mut source = BTreeMap::new();
        source.insert(10u8, 100u16);
        let bytes = encode_to_vec(&source).unwrap();

        let mut out = BTreeMap::new();
        out.insert(1u8, 1u16);
        out.insert(2, 2);
        let mut stream = MemoryStream::from(bytes);
        BinarySerializer::for_reader(&mut stream)
            .decode_into(&mut out)
            .unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let mut bytes = 2u64.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[7u8, 1]);
        bytes.extend_from_slice(&[7u8, 2]);
        let decoded: HashMap<u8, u8> = decode_from_slice(&bytes).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[&7], 2);
    }

    #[test]
    fn test_nested_map_values() {
        let mut input: BTreeMap<u32, Vec<Option<String>>> = BTreeMap::new();
        input.insert(1, vec![Some("a".into()), None]);
        input.insert(2, Vec::new());
        let bytes = encode_to_vec(&input).unwrap();
        let decoded: BTreeMap<u32, Vec<Option<String>>> = decode_from_slice(&bytes).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_truncated_map_underflows() {
        let mut input = BTreeMap::new();
        input.insert(1u64, 2u64);
        let mut bytes = encode_to_vec(&input).unwrap();
        bytes.pop();
        let result = decode_from_slice::<BTreeMap<u64, u64>>(&bytes);
        assert!(result.unwrap_err().is_underflow());
    }
}
