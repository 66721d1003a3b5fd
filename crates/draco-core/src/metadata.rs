//! Geometry and attribute metadata carried in the Draco header section.
//!
//! Entries are kept as raw bytes; Draco encodes integers, doubles and strings
//! into the same byte payload and the reader decides how to interpret them.

use std::collections::BTreeMap;

use crate::decoder_buffer::DecoderBuffer;
use crate::status::DracoError;

/// A named set of entries with nested sub-metadata.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Metadata {
    entries: BTreeMap<String, Vec<u8>>,
    sub_metadata: BTreeMap<String, Metadata>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Returns the entry as text when its bytes are valid UTF-8.
    pub fn entry_string(&self, name: &str) -> Option<&str> {
        self.entry(name).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn sub_metadata(&self, name: &str) -> Option<&Metadata> {
        self.sub_metadata.get(name)
    }

    pub fn add_entry(&mut self, name: impl Into<String>, value: Vec<u8>) {
        self.entries.insert(name.into(), value);
    }

    pub fn add_sub_metadata(&mut self, name: impl Into<String>, metadata: Metadata) {
        self.sub_metadata.insert(name.into(), metadata);
    }
}

/// Geometry-level metadata plus per-attribute metadata keyed by attribute unique id.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeometryMetadata {
    pub metadata: Metadata,
    attribute_metadata: BTreeMap<u32, Metadata>,
}

impl GeometryMetadata {
    pub fn attribute_metadata(&self, unique_id: u32) -> Option<&Metadata> {
        self.attribute_metadata.get(&unique_id)
    }

    pub fn attribute_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.attribute_metadata.keys().copied()
    }
}

const MAX_METADATA_DEPTH: usize = 64;

/// Decodes the metadata section that follows the header when the metadata flag is set.
pub fn decode_geometry_metadata(buffer: &mut DecoderBuffer) -> Result<GeometryMetadata, DracoError> {
    let mut geometry = GeometryMetadata::default();
    let num_attribute_metadata = buffer.decode_varint_u32()?;
    for _ in 0..num_attribute_metadata {
        let unique_id = buffer.decode_varint_u32()?;
        let metadata = decode_metadata(buffer, 0)?;
        geometry.attribute_metadata.insert(unique_id, metadata);
    }
    geometry.metadata = decode_metadata(buffer, 0)?;
    Ok(geometry)
}

fn decode_metadata(buffer: &mut DecoderBuffer, depth: usize) -> Result<Metadata, DracoError> {
    if depth > MAX_METADATA_DEPTH {
        return Err(DracoError::DracoError(
            "Metadata is nested too deeply".to_string(),
        ));
    }
    let mut metadata = Metadata::new();
    let num_entries = buffer.decode_varint_u32()?;
    for _ in 0..num_entries {
        let name = decode_name(buffer)?;
        let data_size = buffer.decode_varint()? as usize;
        if data_size == 0 {
            return Err(DracoError::DracoError(format!(
                "Metadata entry {} has no data",
                name
            )));
        }
        let value = buffer.decode_slice(data_size)?.to_vec();
        metadata.add_entry(name, value);
    }

    let num_sub_metadata = buffer.decode_varint()? as usize;
    if num_sub_metadata > buffer.remaining_size() {
        return Err(DracoError::DracoError(
            "Invalid sub-metadata count".to_string(),
        ));
    }
    for _ in 0..num_sub_metadata {
        let name = decode_name(buffer)?;
        let sub = decode_metadata(buffer, depth + 1)?;
        metadata.add_sub_metadata(name, sub);
    }
    Ok(metadata)
}

fn decode_name(buffer: &mut DecoderBuffer) -> Result<String, DracoError> {
    let len = buffer.decode_u8()? as usize;
    let bytes = buffer.decode_slice(len)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
