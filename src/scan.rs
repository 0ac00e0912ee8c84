//! Scan orchestration.
//!
//! A scan runs the decoders in order:
//!
//! 1. Locate the APP1 segment
//! 2. Resolve the Exif/TIFF header
//! 3. Walk IFD0 with the TIFF labels
//! 4. Follow `ExifIFDPointer` and `GPSIFDPointer`, walking each target with
//!    its own labels
//!
//! Every scan builds its own [`Cursor`], so a [`Scanner`] holds no mutable
//! state and can be shared freely between threads and tasks.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, IoError, ScanError};
use crate::format::tiff::{
    walk_directory, Directory, LabelSet, TagLabels, EXIF_IFD_POINTER, GPS_IFD_POINTER,
};
use crate::format::{locate_app1, ExifHeader};
use crate::io::{ByteSource, Cursor, FileSource, MAX_PREFIX_LEN};

// =============================================================================
// ScanResult
// =============================================================================

/// Tags decoded from the three directories.
///
/// `exif` and `gps` stay empty unless IFD0 carried the matching pointer tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    #[serde(rename = "TIFF")]
    pub tiff: Directory,

    #[serde(rename = "Exif")]
    pub exif: Directory,

    #[serde(rename = "GPS")]
    pub gps: Directory,
}

impl ScanResult {
    /// True when no directory produced any tag.
    pub fn is_empty(&self) -> bool {
        self.tiff.is_empty() && self.exif.is_empty() && self.gps.is_empty()
    }

    /// Directories paired with their display names.
    pub fn directories(&self) -> [(&'static str, &Directory); 3] {
        [("TIFF", &self.tiff), ("Exif", &self.exif), ("GPS", &self.gps)]
    }
}

// =============================================================================
// Scanner
// =============================================================================

/// Exif scanner configured with label tables and a prefix bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanner {
    labels: LabelSet,
    max_prefix_len: usize,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Scanner with the standard Exif 2.3 labels.
    pub const fn new() -> Self {
        Self {
            labels: LabelSet::standard(),
            max_prefix_len: MAX_PREFIX_LEN,
        }
    }

    /// Use custom label tables.
    pub const fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Read at most `len` bytes from sources, capped at [`MAX_PREFIX_LEN`].
    pub fn with_max_prefix_len(mut self, len: usize) -> Self {
        self.max_prefix_len = len.min(MAX_PREFIX_LEN);
        self
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn max_prefix_len(&self) -> usize {
        self.max_prefix_len
    }

    /// Decode the Exif metadata in `data`.
    ///
    /// Fails if no usable Exif block is found: not a JPEG, no APP1 segment,
    /// a malformed header, or an unreadable IFD0. Problems inside the Exif or
    /// GPS directory only leave that directory empty.
    pub fn try_scan(&self, data: &[u8]) -> Result<ScanResult, ScanError> {
        let segment = locate_app1(data)?;
        let (header, tiff) = ExifHeader::parse(&data[segment])?;

        let mut cursor = Cursor::at(tiff, header.first_ifd_offset as usize, header.byte_order);
        let mut result = ScanResult::default();

        debug!("scanning TIFF tags");
        result.tiff = walk_directory(&mut cursor, &self.labels.tiff)?;

        if let Some(offset) = pointer(&result.tiff, EXIF_IFD_POINTER) {
            debug!(offset, "scanning Exif tags");
            cursor.seek(offset);
            result.exif = walk_sub_directory(&mut cursor, &self.labels.exif, "Exif");
        }

        if let Some(offset) = pointer(&result.tiff, GPS_IFD_POINTER) {
            debug!(offset, "scanning GPS tags");
            cursor.seek(offset);
            result.gps = walk_sub_directory(&mut cursor, &self.labels.gps, "GPS");
        }

        Ok(result)
    }

    /// Decode the Exif metadata in `data`, returning an empty result when
    /// nothing usable is found.
    ///
    /// "No metadata" and "malformed metadata" are indistinguishable here; use
    /// [`Scanner::try_scan`] to tell them apart.
    pub fn scan(&self, data: &[u8]) -> ScanResult {
        self.try_scan(data).unwrap_or_else(|e| {
            debug!(error = %e, "no usable Exif metadata");
            ScanResult::default()
        })
    }

    /// Read the bounded prefix of `source` and scan it.
    pub async fn try_scan_source<S>(&self, source: &S) -> Result<ScanResult, Error>
    where
        S: ByteSource + ?Sized,
    {
        let data = source.read_prefix(self.max_prefix_len).await?;
        debug!(source = source.identifier(), len = data.len(), "scanning");
        Ok(self.try_scan(&data)?)
    }

    /// Read the bounded prefix of `source` and scan it. Only I/O failures
    /// are reported as errors.
    pub async fn scan_source<S>(&self, source: &S) -> Result<ScanResult, IoError>
    where
        S: ByteSource + ?Sized,
    {
        let data = source.read_prefix(self.max_prefix_len).await?;
        debug!(source = source.identifier(), len = data.len(), "scanning");
        Ok(self.scan(&data))
    }
}

/// Offset held by a pointer tag, if IFD0 has it.
fn pointer(directory: &Directory, name: &str) -> Option<usize> {
    directory
        .get(name)
        .and_then(|value| value.first_u32())
        .map(|offset| offset as usize)
}

fn walk_sub_directory(cursor: &mut Cursor<'_>, labels: &TagLabels, kind: &str) -> Directory {
    match walk_directory(cursor, labels) {
        Ok(directory) => directory,
        Err(e) => {
            warn!(directory = kind, error = %e, "couldn't read directory");
            Directory::new()
        }
    }
}

// =============================================================================
// Convenience functions
// =============================================================================

/// Scan `data` with the standard labels. See [`Scanner::scan`].
pub fn scan(data: &[u8]) -> ScanResult {
    Scanner::new().scan(data)
}

/// Scan `data` with the standard labels. See [`Scanner::try_scan`].
pub fn try_scan(data: &[u8]) -> Result<ScanResult, ScanError> {
    Scanner::new().try_scan(data)
}

/// Read the first [`MAX_PREFIX_LEN`] bytes of `source` and scan them.
pub async fn scan_source<S>(source: &S) -> Result<ScanResult, IoError>
where
    S: ByteSource + ?Sized,
{
    Scanner::new().scan_source(source).await
}

/// Read the first [`MAX_PREFIX_LEN`] bytes of a file and scan them.
pub async fn scan_file(path: impl AsRef<Path>) -> Result<ScanResult, IoError> {
    Scanner::new().scan_source(&FileSource::new(path)).await
}

// =============================================================================
// Tests
// =============================================================================
