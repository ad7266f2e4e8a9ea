//! Attribute list parsing

use super::cursor::ByteCursor;
use super::string::{read_name, read_non_neg};
use crate::error::{Error, Result};
use crate::types::{ArrayData, AttrValue, Attribute, NC_ATTRIBUTE, NcType, ZERO, padding};
use tracing::trace;

/// Read the tag and count of a list, accepting `expected` or the ZERO tag
///
/// A ZERO tag must come with a zero count.
pub fn read_list_header(
    cursor: &mut ByteCursor<'_>,
    expected: u32,
    what: &'static str,
) -> Result<usize> {
    let offset = cursor.position();
    let tag = cursor.read_u32()?;
    if tag != expected && tag != ZERO {
        return Err(Error::malformed(
            offset,
            format!("unexpected {} tag 0x{:08X}", what, tag),
        ));
    }
    let count_offset = cursor.position();
    let count = read_non_neg(cursor, "list length")?;
    if tag == ZERO && count != 0 {
        return Err(Error::malformed(
            count_offset,
            format!("empty {} declares {} entries", what, count),
        ));
    }
    Ok(count)
}

/// Read a type tag, resolving it to an element type
pub fn read_type(cursor: &mut ByteCursor<'_>) -> Result<NcType> {
    let offset = cursor.position();
    let tag = cursor.read_u32()?;
    NcType::from_tag(tag).ok_or(Error::UnknownType { offset, tag })
}

/// Read a typed value block: type, count, values, padding
pub fn read_value(cursor: &mut ByteCursor<'_>) -> Result<AttrValue> {
    let nc_type = read_type(cursor)?;
    let count_offset = cursor.position();
    let count = read_non_neg(cursor, "value count")?;
    let size = count
        .checked_mul(nc_type.element_size())
        .ok_or_else(|| Error::malformed(count_offset, "attribute value size overflows"))?;
    let bytes = cursor.read(size)?;
    cursor.skip(padding(size))?;
    Ok(AttrValue::from_array(ArrayData::decode(nc_type, bytes)))
}

/// Read a global or variable attribute list
pub fn read_attributes(cursor: &mut ByteCursor<'_>) -> Result<Vec<Attribute>> {
    let count = read_list_header(cursor, NC_ATTRIBUTE, "attribute list")?;
    let mut attrs = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        let name = read_name(cursor)?;
        let value = read_value(cursor)?;
        trace!(name = %name, nc_type = value.nc_type().name(), "attribute");
        attrs.push(Attribute { name, value });
    }
    Ok(attrs)
}
