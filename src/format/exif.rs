//! Exif header resolution inside an APP1 segment.
//!
//! # APP1 Layout
//!
//! ```text
//! Bytes 0-1:   APP1 marker (FF E1)
//! Bytes 2-3:   Segment length (big-endian)
//! Bytes 4-9:   "Exif\0\0"
//! Bytes 10-13: TIFF byte-order mark, "II*\0" or "MM\0*"
//! Bytes 14-17: Offset to IFD0, relative to byte 10
//! ```
//!
//! Everything from byte 10 on is the TIFF-relative buffer: all IFD and value
//! offsets inside the Exif block are positions in it.

use tracing::debug;

use crate::error::ScanError;
use crate::io::ByteOrder;

/// Exif identifier that opens the APP1 payload.
pub const EXIF_SIGNATURE: [u8; 6] = *b"Exif\0\0";

/// Little-endian TIFF byte-order mark.
pub const TIFF_LITTLE_ENDIAN: [u8; 4] = [0x49, 0x49, 0x2A, 0x00];

/// Big-endian TIFF byte-order mark.
pub const TIFF_BIG_ENDIAN: [u8; 4] = [0x4D, 0x4D, 0x00, 0x2A];

/// Position of the TIFF header within the APP1 segment.
///
/// 2 (APP1 marker) + 2 (APP1 length) + 6 (Exif signature)
pub const TIFF_HEADER_START: usize = 10;

/// Minimum APP1 segment size holding a complete TIFF header.
const MIN_SEGMENT_SIZE: usize = TIFF_HEADER_START + 8;

/// Resolved Exif/TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifHeader {
    /// Byte order for every value in the Exif block
    pub byte_order: ByteOrder,

    /// Position of IFD0 within the TIFF-relative buffer
    pub first_ifd_offset: u32,
}

impl ExifHeader {
    /// Resolve the header of an APP1 segment.
    ///
    /// Returns the header together with the TIFF-relative buffer
    /// (`segment[10..]`).
    ///
    /// # Errors
    /// - `UnexpectedEof` if the segment is shorter than 18 bytes
    /// - `InvalidExifSignature` if bytes 4-9 are not `Exif\0\0`
    /// - `InvalidByteOrderMark` if bytes 10-13 are neither TIFF mark
    pub fn parse(segment: &[u8]) -> Result<(Self, &[u8]), ScanError> {
        if segment.len() < MIN_SEGMENT_SIZE {
            return Err(ScanError::UnexpectedEof {
                offset: 0,
                requested: MIN_SEGMENT_SIZE,
                size: segment.len(),
            });
        }

        if segment[4..TIFF_HEADER_START] != EXIF_SIGNATURE {
            debug!("couldn't find Exif header");
            return Err(ScanError::InvalidExifSignature);
        }

        let mut mark = [0u8; 4];
        mark.copy_from_slice(&segment[TIFF_HEADER_START..TIFF_HEADER_START + 4]);

        let byte_order = match mark {
            TIFF_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            TIFF_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => {
                debug!("couldn't find TIFF header");
                return Err(ScanError::InvalidByteOrderMark(mark));
            }
        };

        let mut offset = [0u8; 4];
        offset.copy_from_slice(&segment[14..18]);
        let first_ifd_offset = byte_order.read_u32(offset);

        debug!(
            endianness = byte_order.name(),
            first_ifd_offset, "resolved TIFF header"
        );

        Ok((
            ExifHeader {
                byte_order,
                first_ifd_offset,
            },
            &segment[TIFF_HEADER_START..],
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================
