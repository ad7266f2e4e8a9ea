//! Binary decoder for classic-format files
//!
//! Decoding runs in two passes over one buffer: the header pass walks the
//! dimension, attribute and variable lists and produces a [`Header`]; the data
//! pass computes the record layout for all record variables and then reads
//! each variable's bytes by absolute offset.

mod attribute;
mod cursor;
mod data;
mod dimension;
mod header;
mod string;
mod variable;

#[cfg(test)]
pub(crate) mod testing;

pub use cursor::{ByteCursor, SeekFrom};
pub use data::{PARALLEL_THRESHOLD, RecordLayout, RecordSlot, materialize};
pub use header::{Header, NumRecords};
pub use variable::VariableDescriptor;

use crate::error::Result;
use crate::types::Dataset;

/// Decode only the header of a classic file
pub fn parse_header(bytes: &[u8]) -> Result<Header> {
    let mut cursor = ByteCursor::new(bytes);
    header::read_header(&mut cursor)
}

/// Decode a classic file held in memory
pub fn parse(bytes: &[u8]) -> Result<Dataset> {
    let header = parse_header(bytes)?;
    materialize(bytes, header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::testing::{list_bytes, name_bytes};
    use crate::types::{Format, NC_DIMENSION, NC_VARIABLE, NcType};

    #[test]
    fn test_empty_dataset() {
        let mut bytes = b"CDF\x01".to_vec();
        bytes.extend_from_slice(&[0; 4]);
        bytes.extend_from_slice(&[0; 24]);

        let ds = parse(&bytes).unwrap();
        assert_eq!(ds.format, Format::Classic);
        assert_eq!(ds.num_records, 0);
        assert!(!ds.streaming);
        assert!(ds.dimensions.is_empty());
        assert!(ds.attributes.is_empty());
        assert!(ds.variables.is_empty());
    }

    #[test]
    fn test_fixed_short_variable() {
        let mut dim = name_bytes("x");
        dim.extend_from_slice(&5u32.to_be_bytes());

        let mut var = name_bytes("v");
        var.extend_from_slice(&1u32.to_be_bytes());
        var.extend_from_slice(&0u32.to_be_bytes());
        var.extend_from_slice(&[0; 8]);
        var.extend_from_slice(&NcType::Short.tag().to_be_bytes());
        var.extend_from_slice(&12u32.to_be_bytes());
        let begin_pos = var.len();
        var.extend_from_slice(&0u32.to_be_bytes());

        let mut bytes = b"CDF\x01".to_vec();
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&list_bytes(NC_DIMENSION, &[dim]));
        bytes.extend_from_slice(&[0; 8]);
        let var_start = bytes.len() + 8;
        bytes.extend_from_slice(&list_bytes(NC_VARIABLE, &[var]));

        let begin = bytes.len() as u32;
        bytes[var_start + begin_pos..var_start + begin_pos + 4].copy_from_slice(&begin.to_be_bytes());
        for v in [10i16, -20, 30, -40, 50] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        bytes.extend_from_slice(&[0, 0]);

        let header = parse_header(&bytes).unwrap();
        assert_eq!(header.header_len, begin as usize);
        assert_eq!(header.data_start(), Some(begin as u64));

        let ds = parse(&bytes).unwrap();
        let v = ds.variable("v").unwrap();
        assert_eq!(v.shape, vec![5]);
        assert_eq!(v.nc_type, NcType::Short);
        assert_eq!(v.begin, begin as u64);
        assert_eq!(v.as_slice::<i16>(), Some(&[10, -20, 30, -40, 50][..]));
    }

    #[test]
    fn test_not_a_classic_file() {
        let err = parse(b"\x89HDF\r\n\x1a\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadMagic);
        assert_eq!(err.offset(), Some(0));
    }
}
