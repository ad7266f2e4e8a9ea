//! Byte-level helpers for parser unit tests

use crate::types::{NcType, padding};

pub fn name_bytes(name: &str) -> Vec<u8> {
    let mut bytes = (name.len() as u32).to_be_bytes().to_vec();
    bytes.extend_from_slice(name.as_bytes());
    bytes.resize(bytes.len() + padding(name.len()), 0);
    bytes
}

/// Type tag, element count, payload and padding of an attribute value
pub fn value_bytes(nc_type: NcType, count: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = nc_type.tag().to_be_bytes().to_vec();
    bytes.extend_from_slice(&count.to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes.resize(bytes.len() + padding(payload.len()), 0);
    bytes
}

pub fn attribute_bytes(name: &str, nc_type: NcType, count: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = name_bytes(name);
    bytes.extend_from_slice(&value_bytes(nc_type, count, payload));
    bytes
}

/// List tag and count followed by the given entries
pub fn list_bytes(tag: u32, entries: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = tag.to_be_bytes().to_vec();
    bytes.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for entry in entries {
        bytes.extend_from_slice(entry);
    }
    bytes
}
