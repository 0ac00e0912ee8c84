//! Decoded tag values.
//!
//! Each [`TagValue`] variant corresponds to one supported [`FieldType`]
//! and holds every element of the entry, so the element count always matches
//! the entry's declared count (ASCII loses its terminator).
//!
//! Rationals are kept as raw numerator/denominator pairs. No division is
//! performed and a zero denominator is preserved as-is.

use std::fmt;

use serde::{Serialize, Serializer};

use super::tags::FieldType;

// =============================================================================
// Rationals
// =============================================================================

/// Unsigned rational, rendered as `"numerator / denominator"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Floating point value, or `None` for a zero denominator.
    pub fn to_f64(self) -> Option<f64> {
        (self.denominator != 0).then(|| self.numerator as f64 / self.denominator as f64)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.numerator, self.denominator)
    }
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Signed rational, rendered as `"numerator / denominator"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SignedRational {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn to_f64(self) -> Option<f64> {
        (self.denominator != 0).then(|| self.numerator as f64 / self.denominator as f64)
    }
}

impl fmt::Display for SignedRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.numerator, self.denominator)
    }
}

impl Serialize for SignedRational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// TagValue
// =============================================================================

/// The decoded value of one IFD entry.
///
/// ASCII and UNDEFINED data are concatenated into strings with every byte
/// mapped onto the char of the same code point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Byte(Vec<u8>),
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    Undefined(String),
    SignedLong(Vec<i32>),
    SignedRational(Vec<SignedRational>),
}

impl TagValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            TagValue::Byte(_) => FieldType::Byte,
            TagValue::Ascii(_) => FieldType::Ascii,
            TagValue::Short(_) => FieldType::Short,
            TagValue::Long(_) => FieldType::Long,
            TagValue::Rational(_) => FieldType::Rational,
            TagValue::Undefined(_) => FieldType::Undefined,
            TagValue::SignedLong(_) => FieldType::SignedLong,
            TagValue::SignedRational(_) => FieldType::SignedRational,
        }
    }

    /// Number of decoded elements (characters for string types).
    pub fn len(&self) -> usize {
        match self {
            TagValue::Byte(v) => v.len(),
            TagValue::Ascii(s) | TagValue::Undefined(s) => s.chars().count(),
            TagValue::Short(v) => v.len(),
            TagValue::Long(v) => v.len(),
            TagValue::Rational(v) => v.len(),
            TagValue::SignedLong(v) => v.len(),
            TagValue::SignedRational(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First element of an unsigned integer value, widened to u32.
    ///
    /// Used to read IFD pointer tags, which are stored as LONG (or SHORT by
    /// some writers).
    pub fn first_u32(&self) -> Option<u32> {
        match self {
            TagValue::Byte(v) => v.first().map(|&b| b as u32),
            TagValue::Short(v) => v.first().map(|&s| s as u32),
            TagValue::Long(v) => v.first().copied(),
            _ => None,
        }
    }

    /// The string content of an ASCII or UNDEFINED value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Ascii(s) | TagValue::Undefined(s) => Some(s),
            _ => None,
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Byte(v) => write_list(f, v),
            TagValue::Ascii(s) => f.write_str(s),
            TagValue::Short(v) => write_list(f, v),
            TagValue::Long(v) => write_list(f, v),
            TagValue::Rational(v) => write_list(f, v),
            // Opaque data may hold control characters
            TagValue::Undefined(s) => write!(f, "{}", s.escape_default()),
            TagValue::SignedLong(v) => write_list(f, v),
            TagValue::SignedRational(v) => write_list(f, v),
        }
    }
}

// =============================================================================
// TagKey
// =============================================================================

/// Key of a decoded tag: its label when the label table knows the id,
/// otherwise the raw numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagKey {
    Named(&'static str),
    Numeric(u16),
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKey::Named(name) => f.write_str(name),
            TagKey::Numeric(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for TagKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagKey::Named(name) => serializer.serialize_str(name),
            TagKey::Numeric(id) => serializer.collect_str(id),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
