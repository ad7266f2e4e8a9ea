//! Core types for the classic format

mod array;
mod dataset;
mod dtype;
mod header;
mod value;

pub use array::{ArrayData, Element};
pub use dataset::{Dataset, Dimension, Variable};
pub use dtype::NcType;
pub use header::{
    ABSENT, ALIGNMENT, Format, MAGIC, NC_ATTRIBUTE, NC_DIMENSION, NC_VARIABLE, STREAMING, ZERO,
    padded, padding,
};
pub use value::{AttrValue, Attribute, Scalar};
