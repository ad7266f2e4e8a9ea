//! Attribute values

use super::{ArrayData, NcType};

/// Single numeric value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Byte(i8),
    Short(i16),
    Int(i32),
    Float(f32),
    Double(f64),
}

impl Scalar {
    pub fn nc_type(&self) -> NcType {
        match self {
            Scalar::Byte(_) => NcType::Byte,
            Scalar::Short(_) => NcType::Short,
            Scalar::Int(_) => NcType::Int,
            Scalar::Float(_) => NcType::Float,
            Scalar::Double(_) => NcType::Double,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Scalar::Byte(v) => v as f64,
            Scalar::Short(v) => v as f64,
            Scalar::Int(v) => v as f64,
            Scalar::Float(v) => v as f64,
            Scalar::Double(v) => v,
        }
    }
}

/// Value of a global or variable attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// CHAR values, trailing NULs trimmed
    Text(String),
    /// Numeric value with exactly one element
    Scalar(Scalar),
    /// Numeric value with zero or several elements
    Array(ArrayData),
}

impl AttrValue {
    /// Build from decoded values, collapsing single numbers to a scalar
    pub(crate) fn from_array(data: ArrayData) -> Self {
        match data {
            ArrayData::Char(bytes) => AttrValue::Text(text_from_chars(&bytes)),
            ArrayData::Byte(v) if v.len() == 1 => AttrValue::Scalar(Scalar::Byte(v[0])),
            ArrayData::Short(v) if v.len() == 1 => AttrValue::Scalar(Scalar::Short(v[0])),
            ArrayData::Int(v) if v.len() == 1 => AttrValue::Scalar(Scalar::Int(v[0])),
            ArrayData::Float(v) if v.len() == 1 => AttrValue::Scalar(Scalar::Float(v[0])),
            ArrayData::Double(v) if v.len() == 1 => AttrValue::Scalar(Scalar::Double(v[0])),
            other => AttrValue::Array(other),
        }
    }

    pub fn nc_type(&self) -> NcType {
        match self {
            AttrValue::Text(_) => NcType::Char,
            AttrValue::Scalar(s) => s.nc_type(),
            AttrValue::Array(a) => a.nc_type(),
        }
    }

    /// Try to get as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a single number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Scalar(s) => Some(s.as_f64()),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            AttrValue::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Try to get as a numeric array
    pub fn as_array(&self) -> Option<&ArrayData> {
        match self {
            AttrValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Number of numeric elements, or text length in bytes
    pub fn len(&self) -> usize {
        match self {
            AttrValue::Text(s) => s.len(),
            AttrValue::Scalar(_) => 1,
            AttrValue::Array(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Named attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

/// Find an attribute by name in an ordered attribute list
pub(crate) fn find<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a AttrValue> {
    attrs.iter().find(|a| a.name == name).map(|a| &a.value)
}

/// Text from CHAR bytes with trailing NULs removed
pub(crate) fn text_from_chars(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
