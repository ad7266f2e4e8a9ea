//! cdfread - Reader for classic NetCDF files
//!
//! Decodes the flat "classic" container (format version 1, 32-bit data
//! offsets) and its "64-bit offset" variant (version 2) from an in-memory
//! buffer into a [`Dataset`]: named dimensions, global attributes and
//! variables with their data materialized as typed arrays.
//!
//! # Features
//!
//! - Strict big-endian decoding with byte offsets on every error
//! - Record variables de-interleaved into per-variable arrays
//! - Streaming files (unknown record count) inferred from the buffer length
//! - `ndarray` feature: convert variables to `ndarray::ArrayD`
//! - `parallel` feature: read variables on the rayon thread pool
//!
//! # Example
//!
//! ```rust
//! // The smallest valid file: no dimensions, attributes or variables
//! let mut bytes = b"CDF\x01".to_vec();
//! bytes.extend_from_slice(&[0; 28]);
//!
//! let ds = cdfread::parse(&bytes).unwrap();
//! assert_eq!(ds.format, cdfread::Format::Classic);
//! assert!(ds.variables.is_empty());
//! ```

pub mod error;
pub mod parser;
pub mod types;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::{AccessError, Error, ErrorKind, Result};
pub use parser::{ByteCursor, Header, NumRecords, SeekFrom, VariableDescriptor, parse, parse_header};
pub use types::{
    ArrayData, AttrValue, Attribute, Dataset, Dimension, Element, Format, MAGIC, NcType, Scalar,
    Variable,
};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::NdarrayError;
