//! Element types of the classic format

/// Element type of an attribute or variable
///
/// Discriminants are the on-disk type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NcType {
    Byte = 0x01,
    Char = 0x02,
    Short = 0x03,
    Int = 0x04,
    Float = 0x05,
    Double = 0x06,
}

impl NcType {
    /// Size in bytes of a single element
    pub fn element_size(self) -> usize {
        match self {
            NcType::Byte | NcType::Char => 1,
            NcType::Short => 2,
            NcType::Int | NcType::Float => 4,
            NcType::Double => 8,
        }
    }

    /// Try to convert from the 4-byte type tag
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0x01 => Some(NcType::Byte),
            0x02 => Some(NcType::Char),
            0x03 => Some(NcType::Short),
            0x04 => Some(NcType::Int),
            0x05 => Some(NcType::Float),
            0x06 => Some(NcType::Double),
            _ => None,
        }
    }

    /// Resolve a type tag to its kind and element size
    pub fn resolve(tag: u32) -> Option<(Self, usize)> {
        Self::from_tag(tag).map(|t| (t, t.element_size()))
    }

    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Name used by the CDL notation
    pub fn name(self) -> &'static str {
        match self {
            NcType::Byte => "byte",
            NcType::Char => "char",
            NcType::Short => "short",
            NcType::Int => "int",
            NcType::Float => "float",
            NcType::Double => "double",
        }
    }
}
