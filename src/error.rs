//! Error types for cdfread

use crate::types::NcType;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Errors raised while decoding a classic-format file.
///
/// Every format error carries the byte offset at which it was detected. None
/// of them are recoverable: decoding stops at the first one.
#[derive(Debug, Error)]
pub enum Error {
    /// A read or seek went past the end of the buffer
    #[error("read of {requested} bytes at offset {offset} exceeds buffer of {len} bytes")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        len: usize,
    },
    /// The file does not start with `CDF`
    #[error("invalid magic bytes {found:02X?} at offset {offset}, not a classic file")]
    BadMagic { offset: usize, found: [u8; 3] },
    /// Version byte other than 1 or 2
    #[error("unsupported format version {version} at offset {offset}")]
    UnsupportedVersion { offset: usize, version: u8 },
    /// Unrecognized element type tag
    #[error("unknown type tag 0x{tag:08X} at offset {offset}")]
    UnknownType { offset: usize, tag: u32 },
    /// Unexpected list tag, invalid count or invalid name
    #[error("malformed header at offset {offset}: {message}")]
    MalformedHeader {
        offset: usize,
        message: Cow<'static, str>,
    },
    /// A variable refers to a dimension id that does not exist
    #[error("dimension id {index} at offset {offset} out of range ({count} dimensions)")]
    DanglingDimensionReference {
        offset: usize,
        index: u32,
        count: usize,
    },
    /// A variable's data does not fit the buffer
    #[error("corrupt data layout at offset {offset}: {message}")]
    CorruptLayout {
        offset: usize,
        message: Cow<'static, str>,
    },
    /// Reading the input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error category without payload, for matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfBounds,
    BadMagic,
    UnsupportedVersion,
    UnknownType,
    MalformedHeader,
    DanglingDimensionReference,
    CorruptLayout,
    Io,
}

impl Error {
    pub(crate) fn malformed(offset: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Error::MalformedHeader {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn corrupt(offset: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Error::CorruptLayout {
            offset,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Error::BadMagic { .. } => ErrorKind::BadMagic,
            Error::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            Error::UnknownType { .. } => ErrorKind::UnknownType,
            Error::MalformedHeader { .. } => ErrorKind::MalformedHeader,
            Error::DanglingDimensionReference { .. } => ErrorKind::DanglingDimensionReference,
            Error::CorruptLayout { .. } => ErrorKind::CorruptLayout,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Byte offset at which the error was detected (None for I/O errors)
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::OutOfBounds { offset, .. }
            | Error::BadMagic { offset, .. }
            | Error::UnsupportedVersion { offset, .. }
            | Error::UnknownType { offset, .. }
            | Error::MalformedHeader { offset, .. }
            | Error::DanglingDimensionReference { offset, .. }
            | Error::CorruptLayout { offset, .. } => Some(*offset),
            Error::Io(_) => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error for looking up values in a decoded dataset by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No variable or attribute with this name
    NotFound { name: String },
    /// The value exists but has a different element type
    TypeMismatch {
        name: String,
        expected: NcType,
        actual: NcType,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::NotFound { name } => write!(f, "not found: {}", name),
            AccessError::TypeMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for '{}': expected {}, got {}",
                name,
                expected.name(),
                actual.name()
            ),
        }
    }
}

impl std::error::Error for AccessError {}
