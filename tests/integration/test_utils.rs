//! Test utilities for integration tests.
//!
//! This module provides a tracking byte source and builders for synthetic
//! JPEG files carrying Exif blocks with arbitrary IFD contents.

use async_trait::async_trait;
use bytes::Bytes;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use exif_scan::error::IoError;
use exif_scan::io::{ByteOrder, ByteSource};
use exif_scan::FieldType;

// =============================================================================
// Tracking Byte Source
// =============================================================================

/// An in-memory source that records every prefix request.
pub struct TrackingSource {
    data: Bytes,
    identifier: String,
    request_count: Arc<AtomicUsize>,
    limits: Arc<Mutex<Vec<usize>>>,
}

impl TrackingSource {
    pub fn new(data: Vec<u8>, identifier: impl Into<String>) -> Self {
        Self {
            data: Bytes::from(data),
            identifier: identifier.into(),
            request_count: Arc::new(AtomicUsize::new(0)),
            limits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn limits(&self) -> Vec<usize> {
        self.limits.lock().unwrap().clone()
    }
}

#[async_trait]
impl ByteSource for TrackingSource {
    async fn read_prefix(&self, limit: usize) -> Result<Bytes, IoError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.limits.lock().unwrap().push(limit);
        Ok(self.data.slice(..limit.min(self.data.len())))
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// A source whose reads always fail.
pub struct FailingSource;

#[async_trait]
impl ByteSource for FailingSource {
    async fn read_prefix(&self, _limit: usize) -> Result<Bytes, IoError> {
        Err(IoError::Read("device unplugged".to_string()))
    }

    fn identifier(&self) -> &str {
        "failing://"
    }
}

// =============================================================================
// Byte Order Helpers
// =============================================================================

pub fn u16_bytes(order: ByteOrder, v: u16) -> [u8; 2] {
    match order {
        ByteOrder::LittleEndian => v.to_le_bytes(),
        ByteOrder::BigEndian => v.to_be_bytes(),
    }
}

pub fn u32_bytes(order: ByteOrder, v: u32) -> [u8; 4] {
    match order {
        ByteOrder::LittleEndian => v.to_le_bytes(),
        ByteOrder::BigEndian => v.to_be_bytes(),
    }
}

// =============================================================================
// IFD Builder
// =============================================================================

struct Entry {
    tag: u16,
    type_code: u16,
    count: u32,
    data: Vec<u8>,
}

impl Entry {
    /// Whether the value lives in the data area rather than the entry.
    fn is_offset(&self) -> bool {
        FieldType::from_u16(self.type_code)
            .map(|t| t.is_offset(self.count))
            .unwrap_or(false)
    }
}

/// Builder for one IFD, encoding values in a fixed byte order.
pub struct IfdBuilder {
    order: ByteOrder,
    entries: Vec<Entry>,
}

impl IfdBuilder {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            entries: Vec::new(),
        }
    }

    /// Add an entry with pre-encoded value bytes.
    pub fn raw(mut self, tag: u16, type_code: u16, count: u32, data: Vec<u8>) -> Self {
        self.entries.push(Entry {
            tag,
            type_code,
            count,
            data,
        });
        self
    }

    pub fn byte(self, tag: u16, values: &[u8]) -> Self {
        self.raw(tag, 1, values.len() as u32, values.to_vec())
    }

    /// ASCII value; the NUL terminator is appended.
    pub fn ascii(self, tag: u16, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        self.raw(tag, 2, data.len() as u32, data)
    }

    pub fn short(self, tag: u16, values: &[u16]) -> Self {
        let order = self.order;
        let data = values.iter().flat_map(|&v| u16_bytes(order, v)).collect();
        self.raw(tag, 3, values.len() as u32, data)
    }

    pub fn long(self, tag: u16, values: &[u32]) -> Self {
        let order = self.order;
        let data = values.iter().flat_map(|&v| u32_bytes(order, v)).collect();
        self.raw(tag, 4, values.len() as u32, data)
    }

    pub fn rational(self, tag: u16, values: &[(u32, u32)]) -> Self {
        let order = self.order;
        let data = values
            .iter()
            .flat_map(|&(n, d)| [u32_bytes(order, n), u32_bytes(order, d)])
            .flatten()
            .collect();
        self.raw(tag, 5, values.len() as u32, data)
    }

    pub fn undefined(self, tag: u16, data: &[u8]) -> Self {
        self.raw(tag, 7, data.len() as u32, data.to_vec())
    }

    pub fn signed_long(self, tag: u16, values: &[i32]) -> Self {
        let order = self.order;
        let data = values
            .iter()
            .flat_map(|&v| u32_bytes(order, v as u32))
            .collect();
        self.raw(tag, 9, values.len() as u32, data)
    }

    pub fn signed_rational(self, tag: u16, values: &[(i32, i32)]) -> Self {
        let order = self.order;
        let data = values
            .iter()
            .flat_map(|&(n, d)| [u32_bytes(order, n as u32), u32_bytes(order, d as u32)])
            .flatten()
            .collect();
        self.raw(tag, 10, values.len() as u32, data)
    }

    /// Encoded size: count + entries + next-IFD offset + out-of-line data.
    fn encoded_len(&self) -> usize {
        let data: usize = self
            .entries
            .iter()
            .filter(|e| e.is_offset())
            .map(|e| e.data.len())
            .sum();
        2 + 12 * self.entries.len() + 4 + data
    }

    /// Append the IFD to `out`, which must currently end at the IFD start.
    fn encode(&self, out: &mut Vec<u8>) {
        let order = self.order;
        let start = out.len();
        let mut data_offset = start + 2 + 12 * self.entries.len() + 4;
        let mut data = Vec::new();

        out.extend_from_slice(&u16_bytes(order, self.entries.len() as u16));
        for entry in &self.entries {
            out.extend_from_slice(&u16_bytes(order, entry.tag));
            out.extend_from_slice(&u16_bytes(order, entry.type_code));
            out.extend_from_slice(&u32_bytes(order, entry.count));

            if entry.is_offset() {
                out.extend_from_slice(&u32_bytes(order, data_offset as u32));
                data.extend_from_slice(&entry.data);
                data_offset += entry.data.len();
            } else {
                let mut inline = entry.data.clone();
                inline.resize(4, 0);
                out.extend_from_slice(&inline[..4]);
            }
        }
        out.extend_from_slice(&u32_bytes(order, 0));
        out.extend_from_slice(&data);
    }
}

// =============================================================================
// Exif / JPEG Builder
// =============================================================================

/// Tag id of the Exif sub-IFD pointer.
pub const EXIF_POINTER_TAG: u16 = 34665;

/// Tag id of the GPS sub-IFD pointer.
pub const GPS_POINTER_TAG: u16 = 34853;

/// Builder for a JPEG whose APP1 segment holds IFD0 and optional Exif and
/// GPS sub-IFDs. Pointer tags are added automatically.
pub struct ExifBuilder {
    order: ByteOrder,
    ifd0: IfdBuilder,
    exif: Option<IfdBuilder>,
    gps: Option<IfdBuilder>,
    app0: bool,
}

impl ExifBuilder {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            order,
            ifd0: IfdBuilder::new(order),
            exif: None,
            gps: None,
            app0: false,
        }
    }

    pub fn ifd0(mut self, f: impl FnOnce(IfdBuilder) -> IfdBuilder) -> Self {
        self.ifd0 = f(self.ifd0);
        self
    }

    pub fn exif(mut self, f: impl FnOnce(IfdBuilder) -> IfdBuilder) -> Self {
        self.exif = Some(f(IfdBuilder::new(self.order)));
        self
    }

    pub fn gps(mut self, f: impl FnOnce(IfdBuilder) -> IfdBuilder) -> Self {
        self.gps = Some(f(IfdBuilder::new(self.order)));
        self
    }

    /// Put a JFIF APP0 segment before APP1.
    pub fn with_app0(mut self) -> Self {
        self.app0 = true;
        self
    }

    /// Build the TIFF-relative buffer (starting at the byte-order mark).
    pub fn build_tiff(self) -> Vec<u8> {
        let order = self.order;
        let mut ifd0 = self.ifd0;

        // Pointer entries are inline LONGs, so they don't change the data area
        let pointer_count = self.exif.is_some() as usize + self.gps.is_some() as usize;
        let ifd0_len = ifd0.encoded_len() + 12 * pointer_count;

        let exif_start = 8 + ifd0_len;
        let exif_len = self.exif.as_ref().map_or(0, |ifd| ifd.encoded_len());
        let gps_start = exif_start + exif_len;

        if self.exif.is_some() {
            ifd0 = ifd0.long(EXIF_POINTER_TAG, &[exif_start as u32]);
        }
        if self.gps.is_some() {
            ifd0 = ifd0.long(GPS_POINTER_TAG, &[gps_start as u32]);
        }

        let mut tiff = match order {
            ByteOrder::LittleEndian => b"II*\0".to_vec(),
            ByteOrder::BigEndian => b"MM\0*".to_vec(),
        };
        tiff.extend_from_slice(&u32_bytes(order, 8));

        ifd0.encode(&mut tiff);
        if let Some(exif) = &self.exif {
            exif.encode(&mut tiff);
        }
        if let Some(gps) = &self.gps {
            gps.encode(&mut tiff);
        }
        tiff
    }

    /// Build a complete JPEG stream: SOI, optional APP0, APP1, then a short
    /// quantization table segment and some scan data.
    pub fn build(self) -> Vec<u8> {
        let app0 = self.app0;
        let tiff = self.build_tiff();

        let mut jpeg = vec![0xFF, 0xD8];
        if app0 {
            jpeg.extend_from_slice(&segment(0xFFE0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"));
        }
        jpeg.extend_from_slice(&app1_segment(&tiff));
        jpeg.extend_from_slice(&segment(0xFFDB, &[0u8; 65]));
        jpeg.extend_from_slice(&[0xAA; 256]);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }
}

/// Encode a marker segment with a correct length field.
pub fn segment(marker: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = marker.to_be_bytes().to_vec();
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Encode an APP1 segment around a TIFF-relative buffer.
pub fn app1_segment(tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    segment(0xFFE1, &payload)
}

/// The smallest useful Exif JPEG: IFD0 holding Make = "ABC".
pub fn minimal_jpeg(order: ByteOrder) -> Vec<u8> {
    ExifBuilder::new(order)
        .ifd0(|ifd| ifd.ascii(271, "ABC"))
        .build()
}

/// Write `data` to a temporary `.jpg` file.
pub fn write_temp_jpeg(data: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".jpg")
        .tempfile()
        .unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}
