//! Configuration for the `exif-scan` command.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks using the `EXIF_SCAN_` prefix:
//!
//! - `EXIF_SCAN_MAX_BYTES` - Prefix length read from each file (default: 131076)
//! - `EXIF_SCAN_FORMAT` - Output format, `json` or `text` (default: json)
//!
//! `RUST_LOG` overrides the log filter chosen by `--verbose`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::io::MAX_PREFIX_LEN;

// =============================================================================
// Default Values
// =============================================================================

/// Default number of bytes read from each file.
pub const DEFAULT_MAX_BYTES: usize = MAX_PREFIX_LEN;

/// Smallest prefix that can hold a SOI marker and one segment header.
pub const MIN_MAX_BYTES: usize = 4;

// =============================================================================
// Output Format
// =============================================================================

/// How scan results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object
    #[default]
    Json,

    /// One `Directory.Tag = value` line per tag
    Text,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// exif-scan - Read Exif, TIFF and GPS metadata from JPEG files.
///
/// Only the first bytes of each file are read; the Exif block of a JPEG sits
/// in its leading APP1 segment.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-scan")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// JPEG files to scan.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Number of leading bytes read from each file.
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES, env = "EXIF_SCAN_MAX_BYTES")]
    pub max_bytes: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, env = "EXIF_SCAN_FORMAT")]
    pub format: OutputFormat,

    /// Exit with failure if any file has no usable Exif segment.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one file is required".to_string());
        }

        if self.max_bytes < MIN_MAX_BYTES || self.max_bytes > MAX_PREFIX_LEN {
            return Err(format!(
                "max_bytes must be between {} and {}",
                MIN_MAX_BYTES, MAX_PREFIX_LEN
            ));
        }

        Ok(())
    }

    /// Whether results are printed keyed by file path.
    pub fn is_multi_file(&self) -> bool {
        self.files.len() > 1
    }
}

// =============================================================================
// Tests
// =============================================================================
