//! Seekable big-endian cursor over a byte buffer

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder};

/// Seek origin for [`ByteCursor::seek`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekFrom {
    /// Absolute offset from the start of the buffer
    Start(usize),
    /// Signed offset from the current position
    Current(i64),
    /// Offset counted back from the end of the buffer
    End(usize),
}

/// Bounds-checked reader over an immutable buffer
///
/// The position always stays within `[0, len]`. A read that would run past
/// the end fails with [`Error::OutOfBounds`] and leaves the position as is.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Length of the whole buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Move the position, returning the new absolute offset
    pub fn seek(&mut self, from: SeekFrom) -> Result<usize> {
        let target = match from {
            SeekFrom::Start(n) => Some(n),
            SeekFrom::Current(delta) => {
                let delta_abs = usize::try_from(delta.unsigned_abs()).ok();
                delta_abs.and_then(|d| {
                    if delta < 0 {
                        self.position.checked_sub(d)
                    } else {
                        self.position.checked_add(d)
                    }
                })
            }
            SeekFrom::End(n) => self.data.len().checked_sub(n),
        };
        match target {
            Some(pos) if pos <= self.data.len() => {
                self.position = pos;
                Ok(pos)
            }
            _ => Err(Error::OutOfBounds {
                offset: self.position,
                requested: 0,
                len: self.data.len(),
            }),
        }
    }

    /// Next `n` bytes without advancing
    pub fn peek(&self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(Error::OutOfBounds {
                offset: self.position,
                requested: n,
                len: self.data.len(),
            })?;
        Ok(&self.data[self.position..end])
    }

    /// Next `n` bytes, advancing past them
    pub fn read(&mut self, n: usize) -> Result<&'a [u8]> {
        let bytes = self.peek(n)?;
        self.position += n;
        Ok(bytes)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read(n).map(|_| ())
    }

    /// Next `n` bytes as UTF-8 text
    pub fn read_string(&mut self, n: usize) -> Result<&'a str> {
        let start = self.position;
        let bytes = self.peek(n)?;
        let s = std::str::from_utf8(bytes)
            .map_err(|_| Error::malformed(start, "invalid UTF-8 in name"))?;
        self.position += n;
        Ok(s)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(&self.read_array::<2>()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(&self.read_array::<2>()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(&self.read_array::<4>()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(&self.read_array::<4>()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(BigEndian::read_u64(&self.read_array::<8>()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(&self.read_array::<8>()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(&self.read_array::<4>()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(&self.read_array::<8>()?))
    }
}
