//! Writes a small catalog to a file, then reads it back and prints it.

use std::collections::BTreeMap;

use binser::{
    BinarySerializer, FileMode, FileStream, Guid, Serializable, SerializeError, StreamBase,
    StreamReader, Version,
};

#[derive(Debug, PartialEq)]
struct Entry {
    id: Guid,
    name: String,
    tags: Vec<String>,
    score: Option<f64>,
}

impl Serializable for Entry {
    fn serialize(&self, ser: &mut BinarySerializer<'_>) -> Result<(), SerializeError> {
        ser.encode(&self.id)?
            .encode(&self.name)?
            .encode(&self.tags)?
            .encode(&self.score)?;
        Ok(())
    }

    fn deserialize(ser: &mut BinarySerializer<'_>) -> Result<Self, SerializeError> {
        Ok(Entry {
            id: ser.decode()?,
            name: ser.decode()?,
            tags: ser.decode()?,
            score: ser.decode()?,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "catalog.bin".to_string());

    let mut catalog = BTreeMap::new();
    for (i, name) in ["alpha", "beta", "gamma"].into_iter().enumerate() {
        let entry = Entry {
            id: Guid::derived(name.as_bytes()),
            name: name.to_string(),
            tags: vec![format!("tag-{i}")],
            score: (i % 2 == 0).then_some(i as f64 * 1.5),
        };
        catalog.insert(i as u32, entry);
    }
    let version = Version::new(1, 0, 3, 20250726);

    let mut out = FileStream::open(&path, FileMode::WriteOnly)?;
    BinarySerializer::for_writer(&mut out)
        .encode(&version)?
        .encode(&catalog)?;
    println!("Wrote {} bytes to {}", out.length()?, path);
    drop(out);

    let mut input = FileStream::open(&path, FileMode::ReadOnly)?;
    let mut ser = BinarySerializer::for_reader(&mut input);
    let read_version: Version = ser.decode()?;
    let read_catalog: BTreeMap<u32, Entry> = ser.decode()?;
    drop(ser);

    println!("\n=== Catalog ===");
    println!("Version: {}", read_version);
    for (key, entry) in &read_catalog {
        let score = entry
            .score
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{}] {} {} tags={:?} score={}",
            key, entry.id, entry.name, entry.tags, score
        );
    }
    println!("At end of stream: {}", input.is_end_of_stream()?);

    assert_eq!(read_catalog, catalog);
    Ok(())
}
