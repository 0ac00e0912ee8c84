//! # exif-scan
//!
//! Reads Exif metadata from JPEG files.
//!
//! The scanner locates the APP1 segment in the leading bytes of a JPEG,
//! resolves the embedded TIFF header and decodes three tag directories:
//! IFD0 ("TIFF"), the Exif sub-IFD and the GPS sub-IFD.
//!
//! ## Architecture
//!
//! - [`io`] - Byte cursor with runtime endianness, and bounded prefix sources
//! - [`mod@format`] - JPEG segment location, Exif header and TIFF IFD decoding
//! - [`scan`] - Orchestration producing a [`ScanResult`]
//! - [`config`] - CLI configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_scan::scan_file;
//!
//! #[tokio::main]
//! async fn main() {
//!     let result = scan_file("photo.jpg").await.unwrap();
//!     if let Some(make) = result.tiff.get("Make") {
//!         println!("Camera: {}", make);
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod scan;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{Error, IoError, ScanError};
pub use format::tiff::{
    decode_entry, walk_directory, Directory, FieldType, IfdEntry, LabelSet, Rational,
    SignedRational, TagKey, TagLabels, TagValue,
};
pub use format::{locate_app1, ExifHeader};
pub use io::{ByteOrder, ByteSource, Cursor, FileSource, MemorySource, MAX_PREFIX_LEN};
pub use scan::{scan, scan_file, scan_source, try_scan, ScanResult, Scanner};
