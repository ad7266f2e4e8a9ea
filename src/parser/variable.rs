//! Variable list parsing

use super::attribute::{read_attributes, read_list_header, read_type};
use super::cursor::ByteCursor;
use super::string::{read_name, read_non_neg};
use crate::error::{Error, Result};
use crate::types::{Attribute, Dimension, Format, NC_VARIABLE, NcType};
use tracing::trace;

/// Variable as described by the header, before its data is read
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDescriptor {
    pub name: String,
    /// Indices into the header's dimension table, outermost first
    pub dim_ids: Vec<usize>,
    pub attributes: Vec<Attribute>,
    pub nc_type: NcType,
    pub vsize: u32,
    pub begin: u64,
    /// First dimension is the record dimension
    pub is_record: bool,
    /// Offset of the descriptor in the header, for error reporting
    pub offset: usize,
}

impl VariableDescriptor {
    /// Number of elements per record (record variables) or in total,
    /// counting the record dimension as 1
    ///
    /// None on overflow or when a dimension id is out of range.
    pub fn record_elements(&self, dims: &[Dimension]) -> Option<usize> {
        let skip = usize::from(self.is_record);
        self.dim_ids
            .get(skip..)?
            .iter()
            .try_fold(1usize, |acc, &id| acc.checked_mul(dims.get(id)?.length))
    }

    /// Bytes per record (record variables) or in total, without padding
    pub fn record_bytes(&self, dims: &[Dimension]) -> Option<usize> {
        self.record_elements(dims)?
            .checked_mul(self.nc_type.element_size())
    }
}

fn read_variable(
    cursor: &mut ByteCursor<'_>,
    format: Format,
    dims: &[Dimension],
) -> Result<VariableDescriptor> {
    let offset = cursor.position();
    let name = read_name(cursor)?;
    let ndims = read_non_neg(cursor, "dimension count")?;

    let mut dim_ids = Vec::with_capacity(ndims.min(cursor.remaining() / 4));
    for position in 0..ndims {
        let id_offset = cursor.position();
        let index = cursor.read_u32()?;
        let id = usize::try_from(index)
            .ok()
            .filter(|&id| id < dims.len())
            .ok_or(Error::DanglingDimensionReference {
                offset: id_offset,
                index,
                count: dims.len(),
            })?;
        if position > 0 && dims[id].is_record() {
            return Err(Error::malformed(
                id_offset,
                format!(
                    "record dimension '{}' is not the first dimension of '{}'",
                    dims[id].name, name
                ),
            ));
        }
        dim_ids.push(id);
    }

    let attributes = read_attributes(cursor)?;
    let nc_type = read_type(cursor)?;
    let vsize = cursor.read_u32()?;
    let begin = match format {
        Format::Classic => u64::from(cursor.read_u32()?),
        Format::Offset64 => cursor.read_u64()?,
    };
    let is_record = dim_ids.first().is_some_and(|&id| dims[id].is_record());

    Ok(VariableDescriptor {
        name,
        dim_ids,
        attributes,
        nc_type,
        vsize,
        begin,
        is_record,
        offset,
    })
}

/// Read the variable list
pub fn read_variables(
    cursor: &mut ByteCursor<'_>,
    format: Format,
    dims: &[Dimension],
) -> Result<Vec<VariableDescriptor>> {
    let count = read_list_header(cursor, NC_VARIABLE, "variable list")?;
    let mut vars: Vec<VariableDescriptor> = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        let var = read_variable(cursor, format, dims)?;
        if vars.iter().any(|v| v.name == var.name) {
            return Err(Error::malformed(
                var.offset,
                format!("duplicate variable '{}'", var.name),
            ));
        }
        trace!(
            name = %var.name,
            nc_type = var.nc_type.name(),
            ndims = var.dim_ids.len(),
            vsize = var.vsize,
            begin = var.begin,
            record = var.is_record,
            "variable"
        );
        vars.push(var);
    }
    Ok(vars)
}
