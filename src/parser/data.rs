//! Data section: fixed variables and interleaved record variables
//!
//! Fixed variables are stored contiguously at their `begin` offset. Record
//! variables share one block: each record holds one padded slice of every
//! record variable, in `begin` order, so a variable's data is gathered from
//! `num_records` stripes spaced `recsize` bytes apart.

use super::cursor::{ByteCursor, SeekFrom};
use super::header::{Header, NumRecords};
use super::variable::VariableDescriptor;
use crate::error::{Error, Result};
use crate::types::{ArrayData, Dataset, Dimension, Variable, padded};
use std::ops::Range;
use tracing::{debug, warn};

/// Variable count above which the `parallel` feature reads variables on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 4;

/// Placement of one record variable inside a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSlot {
    /// Index into the header's variable list
    pub index: usize,
    /// Offset from the start of a record
    pub offset: usize,
    /// Bytes of data per record
    pub size: usize,
    /// Bytes the slot occupies in the record, including padding
    pub stride: usize,
}

/// Layout of the record block, computed from every record variable at once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    /// Absolute offset of the first record
    pub begin: usize,
    /// Distance between consecutive records
    pub recsize: usize,
    pub num_records: usize,
    pub slots: Vec<RecordSlot>,
}

impl RecordLayout {
    /// Compute slot offsets, `recsize` and the record count
    ///
    /// With a single record variable the records are packed without padding.
    pub fn compute(header: &Header, buffer_len: usize) -> Result<Self> {
        let mut record_vars: Vec<(usize, &VariableDescriptor)> = header
            .variables
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_record)
            .collect();
        record_vars.sort_by_key(|(_, v)| v.begin);

        let begin = match record_vars.first() {
            Some((_, first)) => begin_offset(first, buffer_len)?,
            None => buffer_len,
        };
        let single = record_vars.len() == 1;

        let mut slots = Vec::with_capacity(record_vars.len());
        let mut recsize = 0usize;
        for &(index, var) in &record_vars {
            let size = var
                .record_bytes(&header.dimensions)
                .ok_or_else(|| {
                    Error::corrupt(var.offset, "record size overflows or is undefined")
                })?;
            let stride = if single { size } else { padded(size) };

            let expected = begin
                .checked_add(recsize)
                .ok_or_else(|| Error::corrupt(var.offset, "record offset overflows"))?;
            if var.begin != expected as u64 {
                return Err(Error::corrupt(
                    var.offset,
                    format!(
                        "record variable '{}' begins at {}, expected {}",
                        var.name, var.begin, expected
                    ),
                ));
            }
            if var.vsize as usize != padded(size) && var.vsize != u32::MAX {
                warn!(
                    name = %var.name,
                    vsize = var.vsize,
                    computed = padded(size),
                    "vsize disagrees with dimensions"
                );
            }

            slots.push(RecordSlot {
                index,
                offset: recsize,
                size,
                stride,
            });
            recsize = recsize
                .checked_add(stride)
                .ok_or_else(|| Error::corrupt(var.offset, "record size overflows"))?;
        }

        let num_records = match header.num_records {
            NumRecords::Known(n) => n,
            NumRecords::Streaming if recsize == 0 => 0,
            NumRecords::Streaming => {
                let available = buffer_len - begin;
                if available % recsize != 0 {
                    return Err(Error::corrupt(
                        begin,
                        format!(
                            "{} bytes of records are not a multiple of the record size {}",
                            available, recsize
                        ),
                    ));
                }
                available / recsize
            }
        };

        debug!(
            begin,
            recsize,
            num_records,
            record_variables = slots.len(),
            "record layout"
        );

        Ok(RecordLayout {
            begin,
            recsize,
            num_records,
            slots,
        })
    }

    pub fn slot(&self, index: usize) -> Option<&RecordSlot> {
        self.slots.iter().find(|s| s.index == index)
    }

    /// Absolute offset of `record` of the variable in `slot`
    pub fn record_start(&self, slot: &RecordSlot, record: usize) -> Option<usize> {
        record
            .checked_mul(self.recsize)?
            .checked_add(self.begin)?
            .checked_add(slot.offset)
    }

    /// Bytes from the first to the last data byte of a variable
    ///
    /// Returns None on arithmetic overflow. With no records, every record
    /// variable has an empty span at the start of the record block.
    pub fn span(&self, header: &Header, index: usize) -> Option<Range<usize>> {
        let var = header.variables.get(index)?;
        let start = usize::try_from(var.begin).ok()?;
        if !var.is_record {
            let size = var.record_bytes(&header.dimensions)?;
            return Some(start..start.checked_add(size)?);
        }
        let slot = self.slot(index)?;
        if self.num_records == 0 {
            return Some(self.begin..self.begin);
        }
        let last = self.record_start(slot, self.num_records - 1)?;
        Some(start..last.checked_add(slot.size)?)
    }
}

fn begin_offset(var: &VariableDescriptor, buffer_len: usize) -> Result<usize> {
    usize::try_from(var.begin)
        .ok()
        .filter(|&begin| begin <= buffer_len)
        .ok_or_else(|| {
            Error::corrupt(
                var.offset,
                format!(
                    "variable '{}' begins at {}, past the end of a {} byte buffer",
                    var.name, var.begin, buffer_len
                ),
            )
        })
}

fn read_variable(
    bytes: &[u8],
    header: &Header,
    layout: &RecordLayout,
    index: usize,
) -> Result<Variable> {
    let var = &header.variables[index];
    let span = layout
        .span(header, index)
        .ok_or_else(|| Error::corrupt(var.offset, "data span overflows"))?;
    if span.end > bytes.len() {
        return Err(Error::corrupt(
            var.offset,
            format!(
                "data of '{}' ends at {}, past the end of a {} byte buffer",
                var.name,
                span.end,
                bytes.len()
            ),
        ));
    }

    let mut cursor = ByteCursor::new(bytes);
    let data = match layout.slot(index) {
        Some(slot) => {
            let mut raw = Vec::with_capacity(slot.size * layout.num_records);
            for record in 0..layout.num_records {
                let offset = layout
                    .record_start(slot, record)
                    .ok_or_else(|| Error::corrupt(var.offset, "record offset overflows"))?;
                cursor.seek(SeekFrom::Start(offset))?;
                raw.extend_from_slice(cursor.read(slot.size)?);
            }
            ArrayData::decode(var.nc_type, &raw)
        }
        None => {
            cursor.seek(SeekFrom::Start(span.start))?;
            ArrayData::decode(var.nc_type, cursor.read(span.len())?)
        }
    };

    let shape = var
        .dim_ids
        .iter()
        .filter_map(|&id| header.dimensions.get(id))
        .map(|dim| resolved_length(dim, layout.num_records))
        .collect();

    Ok(Variable {
        name: var.name.clone(),
        dimensions: header.dimension_names(var),
        shape,
        nc_type: var.nc_type,
        vsize: var.vsize,
        begin: var.begin,
        is_record: var.is_record,
        attributes: var.attributes.clone(),
        data,
    })
}

fn resolved_length(dim: &Dimension, num_records: usize) -> usize {
    if dim.is_record() {
        num_records
    } else {
        dim.length
    }
}

#[cfg(feature = "parallel")]
fn read_variables(bytes: &[u8], header: &Header, layout: &RecordLayout) -> Result<Vec<Variable>> {
    use rayon::prelude::*;

    if header.variables.len() > PARALLEL_THRESHOLD {
        return (0..header.variables.len())
            .into_par_iter()
            .map(|index| read_variable(bytes, header, layout, index))
            .collect();
    }
    (0..header.variables.len())
        .map(|index| read_variable(bytes, header, layout, index))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn read_variables(bytes: &[u8], header: &Header, layout: &RecordLayout) -> Result<Vec<Variable>> {
    (0..header.variables.len())
        .map(|index| read_variable(bytes, header, layout, index))
        .collect()
}

/// Every dimension id must index the header's dimension table
fn check_dimension_ids(header: &Header) -> Result<()> {
    let count = header.dimensions.len();
    for var in &header.variables {
        if let Some(&id) = var.dim_ids.iter().find(|&&id| id >= count) {
            return Err(Error::DanglingDimensionReference {
                offset: var.offset,
                index: u32::try_from(id).unwrap_or(u32::MAX),
                count,
            });
        }
    }
    Ok(())
}

/// Read every variable's data and assemble the dataset
pub fn materialize(bytes: &[u8], header: Header) -> Result<Dataset> {
    check_dimension_ids(&header)?;
    let layout = RecordLayout::compute(&header, bytes.len())?;
    let variables = read_variables(bytes, &header, &layout)?;
    Ok(Dataset {
        format: header.format,
        num_records: layout.num_records,
        streaming: header.num_records == NumRecords::Streaming,
        dimensions: header.dimensions,
        attributes: header.attributes,
        variables,
    })
}
