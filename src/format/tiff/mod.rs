//! TIFF directory decoding for Exif blocks.
//!
//! An Exif block is a small TIFF structure embedded in a JPEG APP1 segment.
//! This module decodes its Image File Directories (IFDs).
//!
//! # Key Concepts
//!
//! - **Byte order**: declared once in the TIFF header (II = little-endian,
//!   MM = big-endian) and used for every multi-byte read afterwards.
//!
//! - **IFD**: a counted table of 12-byte tag entries. IFD0 (the "TIFF"
//!   directory) may point at an Exif and a GPS directory through the
//!   `ExifIFDPointer` and `GPSIFDPointer` tags.
//!
//! - **Inline vs offset values**: each field type has an element-count
//!   threshold; above it, the entry's 4-byte value field holds an offset to the
//!   data instead of the data itself.

mod labels;
mod parser;
mod tags;
mod values;

pub use labels::{LabelSet, TagLabels, EXIF_IFD_POINTER, GPS_IFD_POINTER};
pub use parser::{decode_entry, walk_directory, Directory, IfdEntry, IFD_ENTRY_SIZE};
pub use tags::FieldType;
pub use values::{Rational, SignedRational, TagKey, TagValue};
