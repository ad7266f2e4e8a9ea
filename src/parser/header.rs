//! Top-level header parsing

use super::attribute::read_attributes;
use super::cursor::ByteCursor;
use super::dimension::read_dimensions;
use super::variable::{VariableDescriptor, read_variables};
use crate::error::{Error, Result};
use crate::types::{Attribute, Dimension, Format, MAGIC, STREAMING};
use tracing::debug;

/// Record count field of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumRecords {
    Known(usize),
    /// Sentinel present; the count is inferred from the buffer length
    Streaming,
}

/// Header model: everything up to the start of the data section
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub format: Format,
    pub num_records: NumRecords,
    pub dimensions: Vec<Dimension>,
    pub attributes: Vec<Attribute>,
    pub variables: Vec<VariableDescriptor>,
    /// Offset of the first byte after the header
    pub header_len: usize,
}

impl Header {
    pub fn record_dimension(&self) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.is_record())
    }

    /// Dimension names of a variable, skipping ids outside the table
    pub fn dimension_names(&self, var: &VariableDescriptor) -> Vec<String> {
        var.dim_ids
            .iter()
            .filter_map(|&id| self.dimensions.get(id))
            .map(|dim| dim.name.clone())
            .collect()
    }

    /// Smallest `begin` over all variables
    pub fn data_start(&self) -> Option<u64> {
        self.variables.iter().map(|v| v.begin).min()
    }

    pub fn record_variables(&self) -> impl Iterator<Item = &VariableDescriptor> {
        self.variables.iter().filter(|v| v.is_record)
    }
}

fn read_magic(cursor: &mut ByteCursor<'_>) -> Result<Format> {
    let bytes = cursor.read(MAGIC.len())?;
    if bytes != MAGIC {
        let mut found = [0u8; 3];
        found.copy_from_slice(bytes);
        return Err(Error::BadMagic { offset: 0, found });
    }
    let offset = cursor.position();
    let version = cursor.read_u8()?;
    Format::from_version(version).ok_or(Error::UnsupportedVersion { offset, version })
}

fn read_num_records(cursor: &mut ByteCursor<'_>) -> Result<NumRecords> {
    let offset = cursor.position();
    if cursor.peek(4)? == STREAMING.to_be_bytes() {
        cursor.skip(4)?;
        return Ok(NumRecords::Streaming);
    }
    let value = cursor.read_u32()?;
    if value > i32::MAX as u32 {
        return Err(Error::malformed(
            offset,
            format!("record count 0x{:08X} out of range", value),
        ));
    }
    Ok(NumRecords::Known(value as usize))
}

/// Decode the header from the start of `cursor`
pub fn read_header(cursor: &mut ByteCursor<'_>) -> Result<Header> {
    let format = read_magic(cursor)?;
    let num_records = read_num_records(cursor)?;
    let dimensions = read_dimensions(cursor)?;
    let attributes = read_attributes(cursor)?;
    let variables = read_variables(cursor, format, &dimensions)?;

    debug!(
        format = format.label(),
        ?num_records,
        dimensions = dimensions.len(),
        attributes = attributes.len(),
        variables = variables.len(),
        header_len = cursor.position(),
        "parsed header"
    );

    Ok(Header {
        format,
        num_records,
        dimensions,
        attributes,
        variables,
        header_len: cursor.position(),
    })
}
