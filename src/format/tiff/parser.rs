//! IFD entry decoding and directory walking.
//!
//! # IFD Structure
//!
//! ```text
//! Bytes 0-1:        Entry count N
//! Bytes 2..2+12N:   Entries
//! Bytes 2+12N..+4:  Offset to next IFD (not followed)
//! ```
//!
//! # Entry Structure (12 bytes)
//!
//! ```text
//! Bytes 0-1:  Tag ID
//! Bytes 2-3:  Field type
//! Bytes 4-7:  Count (number of values, not bytes)
//! Bytes 8-11: Value (if it fits) or offset to value
//! ```
//!
//! Offsets are positions in the TIFF-relative buffer, i.e. relative to the
//! byte-order mark.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ScanError;
use crate::io::Cursor;

use super::labels::TagLabels;
use super::tags::FieldType;
use super::values::{TagKey, TagValue};

/// Size of one IFD entry in bytes.
pub const IFD_ENTRY_SIZE: usize = 12;

// =============================================================================
// IfdEntry
// =============================================================================

/// A decoded IFD entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    pub tag_id: u16,
    pub field_type: FieldType,
    pub count: u32,
    pub value: TagValue,
}

/// Decode the entry at the cursor.
///
/// On return the cursor sits exactly [`IFD_ENTRY_SIZE`] bytes past where it
/// started, whether or not the value was read through an offset.
///
/// Returns `Ok(None)` when the entry is skipped: an unknown field type, or a
/// value lying outside the buffer. Fails only if the 12-byte entry itself is
/// truncated, in which case the cursor does not move.
pub fn decode_entry(cursor: &mut Cursor<'_>) -> Result<Option<IfdEntry>, ScanError> {
    let start = cursor.position();
    if cursor.remaining() < IFD_ENTRY_SIZE {
        return Err(ScanError::UnexpectedEof {
            offset: start,
            requested: IFD_ENTRY_SIZE,
            size: cursor.len(),
        });
    }
    let next_entry = start + IFD_ENTRY_SIZE;

    let tag_id = cursor.read_short()?;
    let type_code = cursor.read_short()?;
    let count = cursor.read_long()?;

    let Some(field_type) = FieldType::from_u16(type_code) else {
        debug!(tag_id, type_code, "unknown field type, skipping entry");
        cursor.seek(next_entry);
        return Ok(None);
    };

    let value = decode_value(cursor, field_type, count);
    cursor.seek(next_entry);

    match value {
        Ok(value) => Ok(Some(IfdEntry {
            tag_id,
            field_type,
            count,
            value,
        })),
        Err(e) => {
            warn!(
                tag_id,
                field_type = field_type.name(),
                count,
                error = %e,
                "entry value out of bounds, skipping entry"
            );
            Ok(None)
        }
    }
}

/// Decode `count` elements starting at the value field.
fn decode_value(
    cursor: &mut Cursor<'_>,
    field_type: FieldType,
    count: u32,
) -> Result<TagValue, ScanError> {
    if field_type.is_offset(count) {
        let offset = cursor.read_long()? as usize;
        cursor.seek(offset);
    }

    // Check the whole run up front so a bogus count cannot drive a huge
    // allocation.
    let needed = (count as usize).saturating_mul(field_type.size_in_bytes());
    if needed > cursor.remaining() {
        return Err(ScanError::UnexpectedEof {
            offset: cursor.position(),
            requested: needed,
            size: cursor.len(),
        });
    }

    let value = match field_type {
        FieldType::Byte => TagValue::Byte(read_n(cursor, count, Cursor::read_byte)?),
        FieldType::Ascii => {
            let mut s = read_string(cursor, count)?;
            // Last character is the NUL terminator
            s.pop();
            TagValue::Ascii(s)
        }
        FieldType::Short => TagValue::Short(read_n(cursor, count, Cursor::read_short)?),
        FieldType::Long => TagValue::Long(read_n(cursor, count, Cursor::read_long)?),
        FieldType::Rational => TagValue::Rational(read_n(cursor, count, Cursor::read_rational)?),
        FieldType::Undefined => TagValue::Undefined(read_string(cursor, count)?),
        FieldType::SignedLong => {
            TagValue::SignedLong(read_n(cursor, count, Cursor::read_signed_long)?)
        }
        FieldType::SignedRational => TagValue::SignedRational(read_n(
            cursor,
            count,
            Cursor::read_signed_rational,
        )?),
    };

    Ok(value)
}

fn read_n<'a, T>(
    cursor: &mut Cursor<'a>,
    count: u32,
    mut read: impl FnMut(&mut Cursor<'a>) -> Result<T, ScanError>,
) -> Result<Vec<T>, ScanError> {
    let mut values = Vec::with_capacity(count as usize);
    for _ in 0..count {
        values.push(read(cursor)?);
    }
    Ok(values)
}

fn read_string(cursor: &mut Cursor<'_>, count: u32) -> Result<String, ScanError> {
    let mut s = String::with_capacity(count as usize);
    for _ in 0..count {
        s.push(cursor.read_ascii()?);
    }
    Ok(s)
}

// =============================================================================
// Directory
// =============================================================================

/// The decoded tags of one IFD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Directory {
    tags: BTreeMap<TagKey, TagValue>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, returning the value it replaced.
    pub fn insert(&mut self, key: TagKey, value: TagValue) -> Option<TagValue> {
        self.tags.insert(key, value)
    }

    /// Look up a labeled tag by name.
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.tags.iter().find_map(|(key, value)| match key {
            TagKey::Named(n) if *n == name => Some(value),
            _ => None,
        })
    }

    /// Look up an unlabeled tag by its numeric id.
    pub fn get_numeric(&self, tag_id: u16) -> Option<&TagValue> {
        self.tags.get(&TagKey::Numeric(tag_id))
    }

    pub fn get_key(&self, key: &TagKey) -> Option<&TagValue> {
        self.tags.get(key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TagKey, &TagValue)> {
        self.tags.iter()
    }
}

// =============================================================================
// Directory Walker
// =============================================================================

/// Decode the IFD at the cursor, keying tags through `labels`.
///
/// Unknown-type entries contribute nothing. A truncated entry ends the walk
/// and the tags gathered so far are returned. Fails only when the entry
/// count itself cannot be read.
pub fn walk_directory(cursor: &mut Cursor<'_>, labels: &TagLabels) -> Result<Directory, ScanError> {
    let count = cursor.read_short()?;
    debug!(count, offset = cursor.position() - 2, "tags found");

    let mut directory = Directory::new();

    for index in 0..count {
        let entry = match decode_entry(cursor) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(e) => {
                warn!(index, count, error = %e, "directory truncated");
                break;
            }
        };

        let key = match labels.label(entry.tag_id) {
            Some(name) => TagKey::Named(name),
            None => {
                debug!(tag_id = entry.tag_id, "no label for tag");
                TagKey::Numeric(entry.tag_id)
            }
        };

        directory.insert(key, entry.value);
    }

    Ok(directory)
}

// =============================================================================
// Tests
// =============================================================================
