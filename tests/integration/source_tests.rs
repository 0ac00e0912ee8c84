//! Byte source and async entry point tests.
//!
//! Tests verify:
//! - Only a bounded prefix is requested from a source
//! - File scans work against real files on disk
//! - I/O failures surface as errors while malformed content does not
//! - A single scanner serves many concurrent tasks

use std::sync::Arc;

use exif_scan::{
    scan_file, ByteOrder, Error, FileSource, IoError, MemorySource, ScanError, Scanner, TagValue,
    MAX_PREFIX_LEN,
};

use super::test_utils::{minimal_jpeg, write_temp_jpeg, ExifBuilder, FailingSource, TrackingSource};

// =============================================================================
// Prefix Bounds
// =============================================================================

#[tokio::test]
async fn test_source_read_once_with_default_bound() {
    let source = TrackingSource::new(minimal_jpeg(ByteOrder::BigEndian), "mem://minimal");

    let result = Scanner::new().scan_source(&source).await.unwrap();
    assert!(result.tiff.contains("Make"));

    assert_eq!(source.request_count(), 1);
    assert_eq!(source.limits(), vec![MAX_PREFIX_LEN]);
}

#[tokio::test]
async fn test_source_uses_configured_bound() {
    let source = TrackingSource::new(minimal_jpeg(ByteOrder::BigEndian), "mem://minimal");

    Scanner::new()
        .with_max_prefix_len(1024)
        .scan_source(&source)
        .await
        .unwrap();

    assert_eq!(source.limits(), vec![1024]);
}

#[tokio::test]
async fn test_trailing_image_data_is_not_needed() {
    let mut data = minimal_jpeg(ByteOrder::LittleEndian);
    data.extend(std::iter::repeat(0x55).take(MAX_PREFIX_LEN * 2));

    let source = MemorySource::new(data, "mem://large");
    let result = Scanner::new().try_scan_source(&source).await.unwrap();
    assert_eq!(result.tiff.get("Make"), Some(&TagValue::Ascii("ABC".into())));
}

// =============================================================================
// Files
// =============================================================================

#[tokio::test]
async fn test_scan_file() {
    let data = ExifBuilder::new(ByteOrder::BigEndian)
        .with_app0()
        .ifd0(|ifd| ifd.ascii(271, "Nikon"))
        .exif(|ifd| ifd.rational(33434, &[(1, 60)]))
        .build();
    let file = write_temp_jpeg(&data);

    let result = scan_file(file.path()).await.unwrap();
    assert_eq!(result.tiff.get("Make"), Some(&TagValue::Ascii("Nikon".into())));
    assert!(result.exif.contains("ExposureTime"));
}

#[tokio::test]
async fn test_scan_file_missing() {
    let dir = tempfile::tempdir().unwrap();

    let result = scan_file(dir.path().join("nope.jpg")).await;
    assert!(matches!(result, Err(IoError::NotFound(_))));
}

#[tokio::test]
async fn test_scan_file_not_jpeg_is_empty() {
    let file = write_temp_jpeg(b"plain text, not an image");

    let result = scan_file(file.path()).await.unwrap();
    assert!(result.is_empty());

    let strict = Scanner::new()
        .try_scan_source(&FileSource::new(file.path()))
        .await;
    assert!(matches!(strict, Err(Error::Scan(ScanError::NotJpeg))));
}

#[tokio::test]
async fn test_read_failure_is_reported() {
    let result = Scanner::new().try_scan_source(&FailingSource).await;
    assert!(matches!(result, Err(Error::Io(IoError::Read(_)))));

    let result = Scanner::new().scan_source(&FailingSource).await;
    assert!(matches!(result, Err(IoError::Read(_))));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_concurrent_scans_share_scanner() {
    let scanner = Scanner::new();
    let makes = ["Canon", "Nikon", "Sony", "Fujifilm", "Olympus", "Pentax"];

    let sources: Vec<_> = makes
        .iter()
        .enumerate()
        .map(|(i, make)| {
            let order = if i % 2 == 0 {
                ByteOrder::LittleEndian
            } else {
                ByteOrder::BigEndian
            };
            let data = ExifBuilder::new(order)
                .ifd0(|ifd| ifd.ascii(271, make))
                .gps(|ifd| ifd.ascii(1, "N"))
                .build();
            Arc::new(MemorySource::new(data, format!("mem://{}", make)))
        })
        .collect();

    let handles: Vec<_> = sources
        .iter()
        .cloned()
        .map(|source| tokio::spawn(async move { scanner.scan_source(source.as_ref()).await }))
        .collect();

    for (handle, make) in handles.into_iter().zip(makes) {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.tiff.get("Make"), Some(&TagValue::Ascii(make.into())));
        assert_eq!(result.gps.len(), 1);
        assert!(result.exif.is_empty());
    }
}
