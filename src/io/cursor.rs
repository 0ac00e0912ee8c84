//! Forward-only byte cursor with an endianness mode.
//!
//! Every multi-byte read in an Exif block goes through a [`Cursor`]: the TIFF
//! header fixes the byte order once, and the cursor then walks directory
//! entries and jumps to offset-indirected values.
//!
//! A cursor borrows its buffer and owns only a position and a byte order, so
//! each scan builds its own and nothing is shared between scans.

use crate::error::ScanError;
use crate::format::tiff::{Rational, SignedRational};

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Combine two bytes into a u16 using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    /// Combine four bytes into a u32 using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }

    /// Short name used in logs ("little" / "big").
    pub const fn name(self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "little",
            ByteOrder::BigEndian => "big",
        }
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// Stateful reader over a byte slice.
///
/// Reads either consume exactly their width or fail with
/// [`ScanError::UnexpectedEof`] and leave the position untouched.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
    byte_order: ByteOrder,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at position 0.
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self::at(data, 0, byte_order)
    }

    /// Create a cursor at an arbitrary position.
    pub fn at(data: &'a [u8], position: usize, byte_order: ByteOrder) -> Self {
        Self {
            data,
            position,
            byte_order,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Jump to an absolute position. Bounds are checked by the next read.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the current position and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], ScanError> {
        let eof = ScanError::UnexpectedEof {
            offset: self.position,
            requested: N,
            size: self.data.len(),
        };
        let end = self.position.checked_add(N).ok_or(eof.clone())?;
        let bytes = self.data.get(self.position..end).ok_or(eof)?;

        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.position = end;
        Ok(out)
    }

    /// Unsigned 8-bit value.
    pub fn read_byte(&mut self) -> Result<u8, ScanError> {
        let [b] = self.take::<1>()?;
        Ok(b)
    }

    /// One character; bytes map 1:1 onto chars (Latin-1).
    pub fn read_ascii(&mut self) -> Result<char, ScanError> {
        Ok(char::from(self.read_byte()?))
    }

    /// Unsigned 16-bit value in the cursor's byte order.
    pub fn read_short(&mut self) -> Result<u16, ScanError> {
        let bytes = self.take::<2>()?;
        Ok(self.byte_order.read_u16(bytes))
    }

    /// Unsigned 32-bit value in the cursor's byte order.
    pub fn read_long(&mut self) -> Result<u32, ScanError> {
        let bytes = self.take::<4>()?;
        Ok(self.byte_order.read_u32(bytes))
    }

    /// Signed 32-bit value: the four bytes just read, reinterpreted as
    /// two's complement.
    pub fn read_signed_long(&mut self) -> Result<i32, ScanError> {
        Ok(self.read_long()? as i32)
    }

    pub fn read_rational(&mut self) -> Result<Rational, ScanError> {
        let numerator = self.read_long()?;
        let denominator = self.read_long()?;
        Ok(Rational::new(numerator, denominator))
    }

    pub fn read_signed_rational(&mut self) -> Result<SignedRational, ScanError> {
        let numerator = self.read_signed_long()?;
        let denominator = self.read_signed_long()?;
        Ok(SignedRational::new(numerator, denominator))
    }
}

// =============================================================================
// Tests
// =============================================================================
