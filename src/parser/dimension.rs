//! Dimension list parsing

use super::attribute::read_list_header;
use super::cursor::ByteCursor;
use super::string::{read_name, read_non_neg};
use crate::error::{Error, Result};
use crate::types::{ABSENT, Dimension, NC_DIMENSION};
use tracing::trace;

/// Read the dimension list
///
/// At most one dimension may have length 0, the record dimension.
pub fn read_dimensions(cursor: &mut ByteCursor<'_>) -> Result<Vec<Dimension>> {
    if cursor.peek(ABSENT.len())? == ABSENT {
        cursor.skip(ABSENT.len())?;
        return Ok(Vec::new());
    }
    let offset = cursor.position();
    if cursor.peek(4)? != NC_DIMENSION.to_be_bytes() {
        return Err(Error::malformed(offset, "expected dimension list tag"));
    }
    let count = read_list_header(cursor, NC_DIMENSION, "dimension list")?;

    let mut dims: Vec<Dimension> = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        let entry_offset = cursor.position();
        let name = read_name(cursor)?;
        let length = read_non_neg(cursor, "dimension length")?;
        if dims.iter().any(|d| d.name == name) {
            return Err(Error::malformed(
                entry_offset,
                format!("duplicate dimension '{}'", name),
            ));
        }
        let dim = Dimension { name, length };
        if dim.is_record() && dims.iter().any(Dimension::is_record) {
            return Err(Error::malformed(
                entry_offset,
                format!("second record dimension '{}'", dim.name),
            ));
        }
        trace!(name = %dim.name, length, "dimension");
        dims.push(dim);
    }
    Ok(dims)
}
