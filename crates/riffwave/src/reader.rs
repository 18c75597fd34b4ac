//! Bounds-checked little-endian reads over a borrowed buffer.

use std::fmt;

use serde::{Serialize, Serializer};

/// A four-byte ASCII chunk tag such as `RIFF` or `fmt `.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    pub const RIFF: FourCc = FourCc(*b"RIFF");
    pub const WAVE: FourCc = FourCc(*b"WAVE");
    pub const FMT: FourCc = FourCc(*b"fmt ");
    pub const DATA: FourCc = FourCc(*b"data");

    /// Returns the raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

impl Serialize for FourCc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A read that would run past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub offset: usize,
    pub len: usize,
    pub available: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "needs bytes {}..{} but buffer holds {}",
            self.offset,
            self.offset.saturating_add(self.len),
            self.available
        )
    }
}

/// Random-access reader for fixed-offset RIFF fields.
///
/// All integers are little-endian. Every accessor checks bounds and never panics.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrows `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], OutOfBounds> {
        offset
            .checked_add(len)
            .and_then(|end| self.buf.get(offset..end))
            .ok_or(OutOfBounds {
                offset,
                len,
                available: self.buf.len(),
            })
    }

    fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N], OutOfBounds> {
        let slice = self.bytes(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn tag(&self, offset: usize) -> Result<FourCc, OutOfBounds> {
        self.array::<4>(offset).map(FourCc)
    }

    pub fn u16_le(&self, offset: usize) -> Result<u16, OutOfBounds> {
        self.array::<2>(offset).map(u16::from_le_bytes)
    }

    pub fn u32_le(&self, offset: usize) -> Result<u32, OutOfBounds> {
        self.array::<4>(offset).map(u32::from_le_bytes)
    }
}
