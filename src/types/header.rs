//! Header constants and format versions

/// Magic bytes at the start of every classic file
pub const MAGIC: &[u8; 3] = b"CDF";

/// numrecs value marking a file whose record count must be inferred
pub const STREAMING: u32 = 0xFFFF_FFFF;

/// Tag + count of an empty list
pub const ABSENT: [u8; 8] = [0; 8];

/// Tag alternative for an empty list
pub const ZERO: u32 = 0x0000_0000;

pub const NC_DIMENSION: u32 = 0x0000_000A;
pub const NC_VARIABLE: u32 = 0x0000_000B;
pub const NC_ATTRIBUTE: u32 = 0x0000_000C;

/// Alignment of names, attribute values and record stripes
pub const ALIGNMENT: usize = 4;

/// Number of zero bytes needed to pad `len` to the next 4-byte boundary
pub fn padding(len: usize) -> usize {
    (ALIGNMENT - len % ALIGNMENT) % ALIGNMENT
}

/// Round `len` up to the next 4-byte boundary
pub fn padded(len: usize) -> usize {
    len + padding(len)
}

/// File format, selected by the version byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Format {
    /// Version 1, 32-bit data offsets
    Classic = 1,
    /// Version 2, 64-bit data offsets
    Offset64 = 2,
}

impl Format {
    pub fn from_version(version: u8) -> Option<Self> {
        match version {
            1 => Some(Format::Classic),
            2 => Some(Format::Offset64),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Format::Classic => "classic format",
            Format::Offset64 => "64-bit offset format",
        }
    }
}
