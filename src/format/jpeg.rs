//! JPEG segment location.
//!
//! Exif metadata lives in the APP1 segment, which writers place among the
//! application segments right after the Start-Of-Image marker:
//!
//! ```text
//! FF D8                      SOI
//! FF En LL LL <payload>      APPn, LL LL = big-endian length incl. itself
//! FF E1 LL LL Exif\0\0 ...   APP1
//! ```
//!
//! Only APPn segments are walked. Any other marker before APP1 ends the
//! search, as does the [`MAX_PREFIX_LEN`] bound.

use std::ops::Range;

use tracing::debug;

use crate::error::ScanError;
use crate::io::MAX_PREFIX_LEN;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// Application segment 0 (JFIF) marker
pub const APP0: u16 = 0xFFE0;

/// Application segment 1 (Exif) marker
pub const APP1: u16 = 0xFFE1;

/// Application segment 15 marker, last of the APPn range
pub const APP15: u16 = 0xFFEF;

/// Whether `marker` is one of APP0..=APP15.
#[inline]
pub const fn is_app_marker(marker: u16) -> bool {
    marker >= APP0 && marker <= APP15
}

/// Check that data starts with the SOI marker.
pub fn has_soi(data: &[u8]) -> bool {
    data.len() >= 2 && data[0..2] == SOI
}

// =============================================================================
// APP1 Location
// =============================================================================

/// Find the APP1 segment.
///
/// Returns the byte range of the whole segment, from its marker through the
/// end of its payload (`2 + length` bytes), clamped to the end of `data`.
///
/// # Errors
/// - `NotJpeg` if the data does not start with SOI
/// - `MarkerOutsideAppn` if a non-APPn marker precedes APP1
/// - `NoExifSegment` if the data or the scan bound ends first
pub fn locate_app1(data: &[u8]) -> Result<Range<usize>, ScanError> {
    if !has_soi(data) {
        debug!("not a JPEG file");
        return Err(ScanError::NotJpeg);
    }

    let limit = data.len().min(MAX_PREFIX_LEN);
    let mut offset = SOI.len();

    while offset + 4 <= limit {
        let marker = u16::from_be_bytes([data[offset], data[offset + 1]]);
        let length = u16::from_be_bytes([data[offset + 2], data[offset + 3]]) as usize;

        if !is_app_marker(marker) {
            debug!(marker = %format_args!("0x{:04X}", marker), offset, "couldn't find APPn header");
            return Err(ScanError::MarkerOutsideAppn(marker));
        }

        if marker != APP1 {
            debug!(segment = marker - APP0, offset, length, "skipping APPn segment");
            offset += 2 + length;
            continue;
        }

        let end = (offset + 2 + length).min(data.len());
        debug!(offset, length, "found APP1 segment");
        return Ok(offset..end);
    }

    debug!("couldn't find APP1 header");
    Err(ScanError::NoExifSegment)
}

// =============================================================================
// Tests
// =============================================================================
