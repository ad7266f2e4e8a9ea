//! Typed arrays decoded from big-endian storage

use super::NcType;
use byteorder::{BigEndian, ByteOrder};

/// Materialized values of one element type, in row-major order
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Byte(Vec<i8>),
    Char(Vec<u8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl ArrayData {
    /// Decode big-endian bytes as elements of `nc_type`
    ///
    /// `bytes.len()` must be a multiple of the element size; callers slice
    /// exactly `count * element_size` bytes.
    pub fn decode(nc_type: NcType, bytes: &[u8]) -> Self {
        let count = bytes.len() / nc_type.element_size();
        let bytes = &bytes[..count * nc_type.element_size()];
        match nc_type {
            NcType::Byte => ArrayData::Byte(bytes.iter().map(|&b| b as i8).collect()),
            NcType::Char => ArrayData::Char(bytes.to_vec()),
            NcType::Short => {
                let mut out = vec![0i16; count];
                BigEndian::read_i16_into(bytes, &mut out);
                ArrayData::Short(out)
            }
            NcType::Int => {
                let mut out = vec![0i32; count];
                BigEndian::read_i32_into(bytes, &mut out);
                ArrayData::Int(out)
            }
            NcType::Float => {
                let mut out = vec![0f32; count];
                BigEndian::read_f32_into(bytes, &mut out);
                ArrayData::Float(out)
            }
            NcType::Double => {
                let mut out = vec![0f64; count];
                BigEndian::read_f64_into(bytes, &mut out);
                ArrayData::Double(out)
            }
        }
    }

    pub fn nc_type(&self) -> NcType {
        match self {
            ArrayData::Byte(_) => NcType::Byte,
            ArrayData::Char(_) => NcType::Char,
            ArrayData::Short(_) => NcType::Short,
            ArrayData::Int(_) => NcType::Int,
            ArrayData::Float(_) => NcType::Float,
            ArrayData::Double(_) => NcType::Double,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Byte(v) => v.len(),
            ArrayData::Char(v) => v.len(),
            ArrayData::Short(v) => v.len(),
            ArrayData::Int(v) => v.len(),
            ArrayData::Float(v) => v.len(),
            ArrayData::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Typed view of the elements, None if `T` is not the stored type
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice(self)
    }

    /// Element `index` widened to f64 (chars give their byte value)
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        match self {
            ArrayData::Byte(v) => v.get(index).map(|&x| x as f64),
            ArrayData::Char(v) => v.get(index).map(|&x| x as f64),
            ArrayData::Short(v) => v.get(index).map(|&x| x as f64),
            ArrayData::Int(v) => v.get(index).map(|&x| x as f64),
            ArrayData::Float(v) => v.get(index).map(|&x| x as f64),
            ArrayData::Double(v) => v.get(index).copied(),
        }
    }
}

/// Rust element type backing one `NcType`
pub trait Element: Sized + Copy + 'static {
    const NC_TYPE: NcType;

    fn slice(data: &ArrayData) -> Option<&[Self]>;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident) => {
        impl Element for $t {
            const NC_TYPE: NcType = NcType::$variant;

            fn slice(data: &ArrayData) -> Option<&[Self]> {
                match data {
                    ArrayData::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(i8, Byte);
impl_element!(u8, Char);
impl_element!(i16, Short);
impl_element!(i32, Int);
impl_element!(f32, Float);
impl_element!(f64, Double);
