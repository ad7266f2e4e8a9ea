//! ndarray integration for decoded variables
//!
//! Converts a variable's flat data and resolved shape into an owned
//! `ndarray::ArrayD`.
//!
//! Enable with the `ndarray` feature flag.

use crate::types::{ArrayData, Element, NcType, Variable};
use ndarray::{ArrayD, IxDyn};

/// Error type for ndarray conversions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NdarrayError {
    /// Element type mismatch between requested and stored
    DTypeMismatch { expected: NcType, actual: NcType },
    /// Shape doesn't match data length
    ShapeMismatch { shape: Vec<usize>, data_len: usize },
}

impl std::fmt::Display for NdarrayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NdarrayError::DTypeMismatch { expected, actual } => {
                write!(
                    f,
                    "DType mismatch: expected {}, got {}",
                    expected.name(),
                    actual.name()
                )
            }
            NdarrayError::ShapeMismatch { shape, data_len } => {
                write!(
                    f,
                    "Shape {:?} doesn't match data length {}",
                    shape, data_len
                )
            }
        }
    }
}

impl std::error::Error for NdarrayError {}

impl ArrayData {
    /// Copy into an ndarray ArrayD of the given shape
    pub fn to_ndarray<T: Element>(&self, shape: &[usize]) -> Result<ArrayD<T>, NdarrayError> {
        let values = self.as_slice::<T>().ok_or(NdarrayError::DTypeMismatch {
            expected: T::NC_TYPE,
            actual: self.nc_type(),
        })?;

        ArrayD::from_shape_vec(IxDyn(shape), values.to_vec()).map_err(|_| {
            NdarrayError::ShapeMismatch {
                shape: shape.to_vec(),
                data_len: values.len(),
            }
        })
    }
}

impl Variable {
    /// Copy the data into an ndarray ArrayD shaped like the variable
    pub fn to_ndarray<T: Element>(&self) -> Result<ArrayD<T>, NdarrayError> {
        self.data.to_ndarray(&self.shape)
    }
}
