use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncReadExt;

use crate::error::IoError;

/// Largest prefix that can hold an Exif segment.
///
/// 2 (SOI) + 2 (APP0 marker) + 65535 (max APP0) + 2 (APP1 marker) + 65535 (max APP1)
pub const MAX_PREFIX_LEN: usize = 131_076;

/// Trait for acquiring the leading bytes of an image.
///
/// The scanner only ever needs a bounded prefix of the file, so sources
/// never have to load more than [`MAX_PREFIX_LEN`] bytes.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Read up to `limit` bytes from the start of the resource.
    ///
    /// Returns fewer bytes if the resource is shorter than `limit`.
    async fn read_prefix(&self, limit: usize) -> Result<Bytes, IoError>;

    /// Get a unique identifier for this resource (for logging).
    fn identifier(&self) -> &str;
}

// =============================================================================
// FileSource
// =============================================================================

/// A [`ByteSource`] backed by a file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    identifier: String,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let identifier = path.display().to_string();
        Self { path, identifier }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteSource for FileSource {
    async fn read_prefix(&self, limit: usize) -> Result<Bytes, IoError> {
        let file = tokio::fs::File::open(&self.path).await?;

        let mut buf = Vec::with_capacity(limit.min(MAX_PREFIX_LEN));
        file.take(limit as u64).read_to_end(&mut buf).await?;

        tracing::debug!(
            source = %self.identifier,
            requested = limit,
            read = buf.len(),
            "read file prefix"
        );

        Ok(Bytes::from(buf))
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// In-memory sources
// =============================================================================

/// A [`ByteSource`] over bytes that are already in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
    identifier: String,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>, identifier: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            identifier: identifier.into(),
        }
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    async fn read_prefix(&self, limit: usize) -> Result<Bytes, IoError> {
        Ok(self.data.slice(..limit.min(self.data.len())))
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}
