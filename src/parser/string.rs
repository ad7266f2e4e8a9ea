//! Padded names and non-negative counts

use super::cursor::ByteCursor;
use crate::error::{Error, Result};
use crate::types::padding;

/// Read a NON_NEG field: a big-endian int that must not be negative
pub fn read_non_neg(cursor: &mut ByteCursor<'_>, what: &'static str) -> Result<usize> {
    let offset = cursor.position();
    let value = cursor.read_i32()?;
    usize::try_from(value)
        .map_err(|_| Error::malformed(offset, format!("negative {}: {}", what, value)))
}

/// Read a length-prefixed name followed by zero padding to 4 bytes
pub fn read_name(cursor: &mut ByteCursor<'_>) -> Result<String> {
    let len = read_non_neg(cursor, "name length")?;
    let name = cursor.read_string(len)?;
    cursor.skip(padding(len))?;
    Ok(name.to_string())
}
