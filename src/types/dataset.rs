//! Decoded dataset

use super::value::{find, text_from_chars};
use super::{ArrayData, AttrValue, Attribute, Element, Format, NcType};
use crate::error::{AccessError, Result};
use std::path::Path;

/// Named dimension as declared in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    /// Declared length, 0 for the record dimension
    pub length: usize,
}

impl Dimension {
    pub fn is_record(&self) -> bool {
        self.length == 0
    }
}

/// Variable with its materialized data
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    /// Dimension names, outermost first
    pub dimensions: Vec<String>,
    /// Resolved lengths; the record dimension is replaced by the record count
    pub shape: Vec<usize>,
    pub nc_type: NcType,
    /// On-disk size per record (record variables) or in total, from the header
    pub vsize: u32,
    /// Absolute offset of the first byte of data
    pub begin: u64,
    pub is_record: bool,
    pub attributes: Vec<Attribute>,
    pub data: ArrayData,
}

impl Variable {
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        find(&self.attributes, name)
    }

    pub fn element_size(&self) -> usize {
        self.nc_type.element_size()
    }

    /// Total number of elements
    pub fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }

    /// Typed view of the data, None if `T` is not the stored type
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        self.data.as_slice()
    }

    /// Strings of a CHAR variable, one per index of the leading dimensions
    ///
    /// The last dimension is the string length. Trailing NULs are dropped.
    pub fn strings(&self) -> Option<Vec<String>> {
        let ArrayData::Char(bytes) = &self.data else {
            return None;
        };
        let width = match self.shape.last() {
            Some(&w) if w > 0 => w,
            Some(_) => return Some(Vec::new()),
            None => return Some(vec![text_from_chars(bytes)]),
        };
        Some(bytes.chunks(width).map(text_from_chars).collect())
    }
}

/// Everything decoded from one classic file
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub format: Format,
    /// Number of records, inferred from the buffer size for streaming files
    pub num_records: usize,
    /// numrecs held the streaming sentinel
    pub streaming: bool,
    pub dimensions: Vec<Dimension>,
    pub attributes: Vec<Attribute>,
    pub variables: Vec<Variable>,
}

impl Dataset {
    /// Decode a classic file held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        crate::parser::parse(bytes)
    }

    /// Read and decode a classic file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Current length of a dimension; the record dimension reports the record count
    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.dimension(name).map(|d| {
            if d.is_record() {
                self.num_records
            } else {
                d.length
            }
        })
    }

    pub fn record_dimension(&self) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.is_record())
    }

    /// Global attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        find(&self.attributes, name)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn try_variable(&self, name: &str) -> Result<&Variable, AccessError> {
        self.variable(name).ok_or_else(|| AccessError::NotFound {
            name: name.to_string(),
        })
    }

    /// Typed data of a variable
    pub fn values<T: Element>(&self, name: &str) -> Result<&[T], AccessError> {
        let var = self.try_variable(name)?;
        var.as_slice().ok_or_else(|| AccessError::TypeMismatch {
            name: name.to_string(),
            expected: T::NC_TYPE,
            actual: var.nc_type,
        })
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    /// Variables that depend on the record dimension
    pub fn record_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| v.is_record)
    }
}
