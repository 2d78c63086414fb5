//! End-to-end encode/decode scenarios over memory and file streams.

use std::collections::{BTreeMap, HashMap, HashSet};

use binser::{
    BinarySerializer, ErrorCategory, FileMode, FileStream, Guid, MemoryStream, Serializable,
    SerializeError, SliceReader, StreamBase, StreamOrigin, StreamReader, Version,
    content_digest, decode_from_slice, encode_to_vec,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tempfile::tempdir;

#[derive(Debug, Clone, PartialEq)]
struct MyStruct {
    a: i32,
    b: f32,
}

impl Serializable for MyStruct {
    fn serialize(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        ser.encode(&self.a)?.encode(&self.b)?;
        Ok(())
    }

    fn deserialize(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        Ok(MyStruct {
            a: ser.decode()?,
            b: ser.decode()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Document {
    id: Guid,
    version: Version,
    title: String,
    sections: Vec<[Option<String>; 4]>,
    attributes: HashMap<String, Vec<MyStruct>>,
}

impl Serializable for Document {
    fn serialize(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        ser.encode(&self.id)?
            .encode(&self.version)?
            .encode(&self.title)?
            .encode(&self.sections)?
            .encode(&self.attributes)?;
        Ok(())
    }

    fn deserialize(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        Ok(Document {
            id: ser.decode()?,
            version: ser.decode()?,
            title: ser.decode()?,
            sections: ser.decode()?,
            attributes: ser.decode()?,
        })
    }
}

fn sample_document() -> Document {
    let mut attributes = HashMap::new();
    attributes.insert(
        "points".to_string(),
        vec![MyStruct { a: 1, b: 0.5 }, MyStruct { a: -2, b: 8.0 }],
    );
    attributes.insert("empty".to_string(), Vec::new());
    Document {
        id: Guid::derived(b"document"),
        version: Version::new(2, 1, 7, 20250726),
        title: "Quarterly report".to_string(),
        sections: vec![
            [Some("intro".into()), None, Some(String::new()), None],
            [None, None, None, Some("appendix".into())],
        ],
        attributes,
    }
}

#[test]
fn test_scalar_roundtrip() {
    let mut stream = MemoryStream::new();
    BinarySerializer::for_writer(&mut stream)
        .encode(&123456u32)
        .unwrap();
    assert_eq!(stream.len(), 4);

    stream.rewind().unwrap();
    let mut out = 0u32;
    BinarySerializer::for_reader(&mut stream)
        .decode_into(&mut out)
        .unwrap();
    assert_eq!(out, 123456);
}

#[test]
fn test_vector_roundtrip() {
    let input = vec![1i32, 2, 3, 4, 5];
    let bytes = encode_to_vec(&input).unwrap();
    assert_eq!(bytes.len(), 8 + 5 * 4);
    assert_eq!(decode_from_slice::<Vec<i32>>(&bytes).unwrap(), input);
}

#[test]
fn test_empty_vector_writes_only_count() {
    let mut stream = MemoryStream::new();
    BinarySerializer::for_writer(&mut stream)
        .encode(&Vec::<u64>::new())
        .unwrap();
    assert_eq!(stream.len(), 8);

    stream.rewind().unwrap();
    let mut out = vec![1u64, 2, 3];
    BinarySerializer::for_reader(&mut stream)
        .decode_into(&mut out)
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_fixed_array_size_mismatch() {
    let bytes = encode_to_vec(&[1i32, 2, 3]).unwrap();
    let mut stream = MemoryStream::from(bytes);
    let mut out = [0i32; 4];
    let mut ser = BinarySerializer::for_reader(&mut stream);
    let err = ser.decode_into(&mut out).map(|_| ()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::SizeMismatch);
    assert_eq!(out, [0, 0, 0, 0]);
}

#[test]
fn test_map_roundtrip() {
    let mut input = BTreeMap::new();
    input.insert(1i32, 1.5f32);
    input.insert(2, -3.25);
    input.insert(5, 42.0);
    let bytes = encode_to_vec(&input).unwrap();
    assert_eq!(bytes.len(), 8 + 3 * 8);
    let decoded: BTreeMap<i32, f32> = decode_from_slice(&bytes).unwrap();
    assert_eq!(decoded, input);

    let hashed: HashMap<i32, f32> = input.iter().map(|(k, v)| (*k, *v)).collect();
    let bytes = encode_to_vec(&hashed).unwrap();
    let decoded: HashMap<i32, f32> = decode_from_slice(&bytes).unwrap();
    assert_eq!(decoded, hashed);
}

#[test]
fn test_large_bulk_vector() {
    let input: Vec<u64> = (0..10_000u64)
        .map(|i| i.wrapping_mul(0x9E37_79B9))
        .collect();
    let mut stream = MemoryStream::new();
    BinarySerializer::for_writer(&mut stream)
        .encode(&input)
        .unwrap();
    assert_eq!(stream.len(), 8 + 80_000);

    stream.rewind().unwrap();
    let decoded: Vec<u64> = BinarySerializer::for_reader(&mut stream).decode().unwrap();
    assert_eq!(decoded, input);
    assert!(stream.is_end_of_stream().unwrap());
}

#[test]
fn test_nested_containers() {
    let input: Vec<[Option<String>; 4]> = vec![
        [Some("a".into()), None, Some("ccc".into()), None],
        [None, None, None, None],
    ];
    let bytes = encode_to_vec(&input).unwrap();
    assert_eq!(
        decode_from_slice::<Vec<[Option<String>; 4]>>(&bytes).unwrap(),
        input
    );

    let mut nested: HashMap<String, Vec<MyStruct>> = HashMap::new();
    nested.insert("x".into(), vec![MyStruct { a: 3, b: 1.25 }]);
    let bytes = encode_to_vec(&nested).unwrap();
    assert_eq!(
        decode_from_slice::<HashMap<String, Vec<MyStruct>>>(&bytes).unwrap(),
        nested
    );
}

#[test]
fn test_string_keyed_map() {
    let input: HashMap<String, i32> = [("one", 1), ("two", 2), ("three", 3)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let bytes = encode_to_vec(&input).unwrap();
    let decoded: HashMap<String, i32> = decode_from_slice(&bytes).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn test_custom_hasher_containers() {
    let mut map: FxHashMap<u32, String> = FxHashMap::default();
    map.insert(7, "seven".into());
    map.insert(11, "eleven".into());
    let bytes = encode_to_vec(&map).unwrap();
    let decoded: FxHashMap<u32, String> = decode_from_slice(&bytes).unwrap();
    assert_eq!(decoded, map);

    let set: FxHashSet<i16> = [-1, 0, 1].into_iter().collect();
    let bytes = encode_to_vec(&set).unwrap();
    let decoded: FxHashSet<i16> = decode_from_slice(&bytes).unwrap();
    assert_eq!(decoded, set);

    // same wire form regardless of hasher
    let std_set: HashSet<i16> = decode_from_slice(&bytes).unwrap();
    assert_eq!(std_set.len(), 3);
}

#[test]
fn test_aggregate_roundtrip() {
    let doc = sample_document();
    let bytes = encode_to_vec(&doc).unwrap();
    assert_eq!(decode_from_slice::<Document>(&bytes).unwrap(), doc);
}

#[test]
fn test_truncation_at_every_offset_underflows() {
    let input = (
        vec![1u16, 2, 3],
        Some("tail".to_string()),
        MyStruct { a: 9, b: 9.0 },
    );
    let bytes = encode_to_vec(&input).unwrap();
    for cut in 0..bytes.len() {
        let result: Result<(Vec<u16>, Option<String>, MyStruct), _> =
            decode_from_slice(&bytes[..cut]);
        let err = result.unwrap_err();
        assert!(err.is_underflow(), "cut at {cut}: {err}");
    }
}

#[test]
fn test_memory_underflow_keeps_cursor() {
    let mut stream = MemoryStream::from(vec![1u8, 2, 3]);
    let result = BinarySerializer::for_reader(&mut stream).decode::<u64>();
    assert!(result.unwrap_err().is_underflow());
    assert_eq!(stream.tell(), 0);
}

#[test]
fn test_sequential_values_share_stream() {
    let mut stream = MemoryStream::new();
    BinarySerializer::for_writer(&mut stream)
        .encode(&true)
        .unwrap()
        .encode(&'λ')
        .unwrap()
        .encode(&(1u8, -1i64))
        .unwrap();

    let mut reader = SliceReader::new(stream.as_bytes());
    let mut ser = BinarySerializer::for_reader(&mut reader);
    assert!(ser.decode::<bool>().unwrap());
    assert_eq!(ser.decode::<char>().unwrap(), 'λ');
    assert_eq!(ser.decode::<(u8, i64)>().unwrap(), (1, -1));
    drop(ser);
    assert_eq!(reader.remaining_len(), 0);
}

#[test]
fn test_file_backed_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.bin");
    let doc = sample_document();

    let mut out = FileStream::open(&path, FileMode::WriteOnly).unwrap();
    BinarySerializer::for_writer(&mut out)
        .encode(&doc)
        .unwrap()
        .encode(&vec![1.0f64; 1000])
        .unwrap();
    let written = out.tell();
    drop(out);

    let mut input = FileStream::open(&path, FileMode::ReadOnly).unwrap();
    assert_eq!(input.length().unwrap(), written);
    let mut ser = BinarySerializer::for_reader(&mut input);
    let decoded: Document = ser.decode().unwrap();
    let tail: Vec<f64> = ser.decode().unwrap();
    drop(ser);
    assert_eq!(decoded, doc);
    assert_eq!(tail.len(), 1000);
    assert!(input.is_end_of_stream().unwrap());
}

#[test]
fn test_file_patch_in_place() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("patch.bin");

    let mut out = FileStream::open(&path, FileMode::WriteOnly).unwrap();
    BinarySerializer::for_writer(&mut out)
        .encode(&[10u32, 20, 30])
        .unwrap();
    drop(out);

    // overwrite the last element without touching the rest
    let mut rw = FileStream::open(&path, FileMode::ReadWrite).unwrap();
    rw.seek(-4, StreamOrigin::End).unwrap();
    BinarySerializer::for_writer(&mut rw)
        .encode(&99u32)
        .unwrap();
    rw.rewind().unwrap();
    let patched: [u32; 3] = BinarySerializer::for_reader(&mut rw).decode().unwrap();
    assert_eq!(patched, [10, 20, 99]);
}

#[test]
fn test_memory_and_file_agree() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("agree.bin");
    let doc = sample_document();

    let mut file = FileStream::open(&path, FileMode::WriteOnly).unwrap();
    BinarySerializer::for_writer(&mut file)
        .encode(&doc)
        .unwrap();
    drop(file);

    let on_disk = std::fs::read(&path).unwrap();
    let decoded: Document = decode_from_slice(&on_disk).unwrap();
    assert_eq!(decoded, doc);
    assert_eq!(
        content_digest(&decoded.sections).unwrap(),
        content_digest(&doc.sections).unwrap()
    );
}
