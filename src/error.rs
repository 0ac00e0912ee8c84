use thiserror::Error;

/// I/O errors that can occur when acquiring the bytes to scan
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// The file or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reading the resource failed
    #[error("Read error: {0}")]
    Read(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => IoError::NotFound(err.to_string()),
            _ => IoError::Read(err.to_string()),
        }
    }
}

/// Errors that can occur while locating and decoding Exif metadata
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Data does not start with the JPEG Start-Of-Image marker
    #[error("Not a JPEG file: missing SOI marker 0xFFD8")]
    NotJpeg,

    /// A non-APPn marker was reached before the APP1 segment
    #[error("Marker 0x{0:04X} is outside the APPn range before any APP1 segment")]
    MarkerOutsideAppn(u16),

    /// No APP1 segment within the scanned prefix
    #[error("No APP1 (Exif) segment found")]
    NoExifSegment,

    /// APP1 segment does not carry the `Exif\0\0` signature
    #[error("APP1 segment is missing the Exif signature")]
    InvalidExifSignature,

    /// TIFF header byte-order mark is neither `II*\0` nor `MM\0*`
    #[error("Invalid TIFF byte-order mark: {0:02X?}")]
    InvalidByteOrderMark([u8; 4]),

    /// A read ran past the end of the buffer
    #[error("Unexpected end of data: requested {requested} bytes at offset {offset}, size is {size}")]
    UnexpectedEof {
        offset: usize,
        requested: usize,
        size: usize,
    },
}

/// Top-level error for the async scan entry points
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Acquiring the byte prefix failed
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// The bytes could not be decoded
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}
