//! Error types for dirbench
//!
//! This module defines the error hierarchy for the benchmark harness:
//! - Scan errors (the only errors the scanners themselves surface)
//! - Configuration and CLI errors
//! - Worker thread errors
//! - Reporting/export errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - A scan fails only when it cannot start (unreadable root);
//!   everything discovered mid-scan is tolerated and logged

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T, E = BenchError> = std::result::Result<T, E>;

/// Top-level error type for the dirbench application
#[derive(Error, Debug)]
pub enum BenchError {
    /// Scan errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// Test tree generation errors
    #[error("Failed to generate test tree at '{path}': {source}")]
    Topology {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report/export errors
    #[error("Failed to write results to '{path}': {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the scanners
///
/// Only an unreadable scan root is fatal. Unreadable subdirectories
/// discovered mid-scan are skipped and their subtrees omitted from
/// the aggregate.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The root of the scan could not be enumerated
    #[error("Cannot read scan root '{path}': {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A worker failed in a way that invalidates the scan
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Empty worker count list
    #[error("Worker count list must not be empty")]
    EmptyWorkerList,

    /// Invalid queue size
    #[error("Invalid queue size {size}: must be at least {min}")]
    InvalidQueueSize { size: usize, min: usize },

    /// Invalid run count
    #[error("Invalid run count {runs}: must be at least 1")]
    InvalidRuns { runs: usize },

    /// Tree root path error
    #[error("Invalid tree root '{path}': {reason}")]
    InvalidRoot { path: PathBuf, reason: String },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked")]
    Panicked { id: usize },

    /// Worker thread could not be spawned
    #[error("Failed to spawn worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },

    /// Work queue disconnected while work was still outstanding
    #[error("Work queue disconnected unexpectedly")]
    QueueDisconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidWorkerCount { count: 0, max: 512 };
        assert_eq!(
            err.to_string(),
            "Invalid worker count 0: must be between 1 and 512"
        );

        let err = WorkerError::Panicked { id: 3 };
        assert_eq!(err.to_string(), "Worker 3 panicked");
    }

    #[test]
    fn test_scan_error_wraps_into_bench_error() {
        let scan = ScanError::RootUnreadable {
            path: PathBuf::from("/missing"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let top: BenchError = scan.into();
        assert!(top.to_string().contains("/missing"));
    }
}
