//! TIFF field type definitions.
//!
//! A field type decides three things for an IFD entry:
//! - how many bytes one element occupies
//! - how many elements may sit inline in the 4-byte value field before the
//!   field is reinterpreted as an offset
//! - which cursor read decodes one element

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types understood by the scanner.
///
/// Other codes (SBYTE, SSHORT, FLOAT, DOUBLE, ...) are treated as unknown:
/// the entry is skipped and the walk continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// 8-bit character, NUL-terminated
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two Longs: numerator, denominator
    Rational = 5,

    /// Opaque bytes
    Undefined = 7,

    /// Signed 32-bit integer
    SignedLong = 9,

    /// Two SignedLongs: numerator, denominator
    SignedRational = 10,
}

impl FieldType {
    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unsupported or unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            9 => Some(FieldType::SignedLong),
            10 => Some(FieldType::SignedRational),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short => 2,
            FieldType::Long | FieldType::SignedLong => 4,
            FieldType::Rational | FieldType::SignedRational => 8,
        }
    }

    /// Largest element count still read from the value field itself.
    ///
    /// ASCII allows 3 rather than 4: a 4-character string is always read
    /// through an offset.
    #[inline]
    pub const fn inline_threshold(self) -> u32 {
        match self {
            FieldType::Byte | FieldType::Undefined => 4,
            FieldType::Ascii => 3,
            FieldType::Short => 2,
            FieldType::Long | FieldType::SignedLong => 1,
            FieldType::Rational | FieldType::SignedRational => 0,
        }
    }

    /// Whether an entry with `count` elements stores an offset instead of data.
    #[inline]
    pub const fn is_offset(self, count: u32) -> bool {
        count > self.inline_threshold()
    }

    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SignedLong => "SLONG",
            FieldType::SignedRational => "SRATIONAL",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
