//! exif-scan - Read Exif, TIFF and GPS metadata from JPEG files.
//!
//! Each file is scanned in its own task; results are printed in argument
//! order once every scan has finished.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_scan::{Config, Error, FileSource, OutputFormat, ScanResult, Scanner};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let scanner = Scanner::new().with_max_prefix_len(config.max_bytes);
    let outcomes = scan_all(scanner, &config.files).await;

    let mut failed = false;
    let mut results = Vec::with_capacity(outcomes.len());

    for (path, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push((path, result)),
            Err(Error::Scan(e)) => {
                warn!(file = %path.display(), "no usable Exif metadata: {}", e);
                failed |= config.strict;
                results.push((path, ScanResult::default()));
            }
            Err(Error::Io(e)) => {
                error!(file = %path.display(), "{}", e);
                failed = true;
            }
        }
    }

    let printed = match config.format {
        OutputFormat::Json => print_json(&results, config.is_multi_file()),
        OutputFormat::Text => {
            print_text(&results, config.is_multi_file());
            Ok(())
        }
    };

    if let Err(e) = printed {
        error!("Failed to serialize results: {}", e);
        return ExitCode::FAILURE;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so that stdout carries only results.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_scan=debug"
    } else {
        "exif_scan=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Scanning
// =============================================================================

type Outcome = (PathBuf, Result<ScanResult, Error>);

/// Scan every file concurrently, keeping argument order.
async fn scan_all(scanner: Scanner, files: &[PathBuf]) -> Vec<Outcome> {
    let handles: Vec<_> = files
        .iter()
        .cloned()
        .map(|path| {
            tokio::spawn(async move {
                let source = FileSource::new(&path);
                let result = scanner.try_scan_source(&source).await;
                (path, result)
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => error!("Scan task failed: {}", e),
        }
    }
    outcomes
}

// =============================================================================
// Output
// =============================================================================

fn print_json(results: &[(PathBuf, ScanResult)], keyed: bool) -> Result<(), serde_json::Error> {
    let json = if keyed {
        let mut map = serde_json::Map::new();
        for (path, result) in results {
            map.insert(path.display().to_string(), serde_json::to_value(result)?);
        }
        serde_json::Value::Object(map)
    } else {
        match results.first() {
            Some((_, result)) => serde_json::to_value(result)?,
            None => return Ok(()),
        }
    };

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_text(results: &[(PathBuf, ScanResult)], prefixed: bool) {
    for (path, result) in results {
        for (directory, tags) in result.directories() {
            for (key, value) in tags.iter() {
                if prefixed {
                    println!("{}: {}.{} = {}", path.display(), directory, key, value);
                } else {
                    println!("{}.{} = {}", directory, key, value);
                }
            }
        }
    }
}
