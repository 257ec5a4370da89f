//! Static-partition scanner
//!
//! Parallelizes by dividing the root's immediate subdirectories among
//! a fixed worker pool. The root is enumerated exactly once; each
//! top-level subdirectory becomes one work item, and a worker runs
//! the sequential walk over its assigned subtree. Parallelism is
//! therefore bounded by the root's fan-out: shallow/wide trees split
//! well, deep/narrow trees degrade toward a single busy worker.

use crate::error::{ScanError, WorkerError};
use crate::scanner::stats::{ScanCounts, ScanStats};
use crate::scanner::walk::{is_dir, walk_tree};
use crate::scanner::Scanner;
use crossbeam_channel::bounded;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tracing::{debug, trace, warn};

/// Parallel scanner that partitions work by top-level directory
#[derive(Debug, Clone)]
pub struct StaticPartitionScanner {
    workers: usize,
}

impl StaticPartitionScanner {
    /// Create a scanner with a fixed worker pool size
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Configured worker count
    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Scanner for StaticPartitionScanner {
    fn scan(&self, root: &Path) -> Result<ScanCounts, ScanError> {
        // Single worker: no parallel machinery, this is the baseline
        if self.workers == 1 {
            return walk_tree(root).map_err(|source| ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            });
        }

        // Enumerate the root exactly once; failure here is fatal
        let entries: Vec<fs::DirEntry> = fs::read_dir(root)
            .map_err(|source| ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .collect();

        let stats = Arc::new(ScanStats::new());

        // The root itself, plus its files, counted serially before
        // any worker starts. These entries are seen only here.
        stats.record_dir();

        let mut work: Vec<PathBuf> = Vec::new();
        for entry in &entries {
            if is_dir(entry) {
                work.push(entry.path());
            } else {
                stats.record_file();
            }
        }

        trace!(
            root = %root.display(),
            subdirs = work.len(),
            workers = self.workers,
            "Partitioning top-level directories"
        );

        // Sized to the entry count so pushes never block
        let (work_tx, work_rx) = bounded::<PathBuf>(entries.len().max(1));

        let mut handles = Vec::with_capacity(self.workers);
        for id in 0..self.workers {
            let work_rx = work_rx.clone();
            let stats = Arc::clone(&stats);

            let handle = thread::Builder::new()
                .name(format!("scan-{}", id))
                .spawn(move || {
                    while let Ok(dir) = work_rx.recv() {
                        match walk_tree(&dir) {
                            Ok(counts) => stats.add_counts(counts),
                            Err(e) => {
                                // Partial failure: subtree dropped
                                warn!(
                                    worker = id,
                                    path = %dir.display(),
                                    error = %e,
                                    "Failed to scan subtree"
                                );
                            }
                        }
                    }
                    debug!(worker = id, "Worker drained");
                })
                .map_err(|e| WorkerError::SpawnFailed {
                    id,
                    reason: e.to_string(),
                })?;

            handles.push(handle);
        }

        for dir in work {
            // Capacity covers every work item
            let _ = work_tx.send(dir);
        }

        // Closing the channel is the workers' exit condition
        drop(work_tx);
        drop(work_rx);

        for (id, handle) in handles.into_iter().enumerate() {
            handle
                .join()
                .map_err(|_| WorkerError::Panicked { id })?;
        }

        Ok(stats.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn build_tree(dirs: usize, files_per_dir: usize) -> tempfile::TempDir {
        let root = tempdir().unwrap();
        for d in 0..dirs {
            let dir = root.path().join(format!("dir_{:03}", d));
            fs::create_dir(&dir).unwrap();
            for f in 0..files_per_dir {
                File::create(dir.join(format!("file_{:03}.txt", f))).unwrap();
            }
        }
        root
    }

    #[test]
    fn test_single_worker_matches_walk() {
        let root = build_tree(3, 5);
        let counts = StaticPartitionScanner::new(1).scan(root.path()).unwrap();
        assert_eq!(counts, ScanCounts::new(15, 4));
    }

    #[test]
    fn test_parallel_counts_root_level_files() {
        let root = build_tree(4, 2);
        File::create(root.path().join("loose.txt")).unwrap();

        let counts = StaticPartitionScanner::new(4).scan(root.path()).unwrap();
        assert_eq!(counts, ScanCounts::new(9, 5));
    }

    #[test]
    fn test_more_workers_than_subdirs() {
        let root = build_tree(2, 3);
        let counts = StaticPartitionScanner::new(8).scan(root.path()).unwrap();
        assert_eq!(counts, ScanCounts::new(6, 3));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let root = tempdir().unwrap();
        let missing = root.path().join("gone");
        assert!(StaticPartitionScanner::new(4).scan(&missing).is_err());
        assert!(StaticPartitionScanner::new(1).scan(&missing).is_err());
    }
}
