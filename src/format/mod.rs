//! Binary format decoders for Exif metadata embedded in JPEG files.
//!
//! Decoding runs top-down through three layers:
//!
//! - [`jpeg`]: find the APP1 segment after the SOI marker
//! - [`exif`]: check the Exif signature and resolve the TIFF byte order
//! - [`tiff`]: walk the IFDs and decode tag values

pub mod exif;
pub mod jpeg;
pub mod tiff;

pub use exif::ExifHeader;
pub use jpeg::locate_app1;
