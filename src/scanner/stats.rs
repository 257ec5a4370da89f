//! Shared scan accumulators
//!
//! Both scanners fold per-worker counts into a single [`ScanStats`]
//! via atomic adds. Accumulation is the only compound operation
//! needed, so no lock is involved; the counters are read only after
//! the completion barrier, when no worker can still be writing.

use std::sync::atomic::{AtomicU64, Ordering};

/// Final counts returned by a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounts {
    /// Total files found
    pub files: u64,

    /// Total directories found (including the scan root)
    pub dirs: u64,
}

impl ScanCounts {
    /// Create counts from known values
    pub fn new(files: u64, dirs: u64) -> Self {
        Self { files, dirs }
    }

    /// Fold another set of counts into this one
    pub fn merge(&mut self, other: ScanCounts) {
        self.files += other.files;
        self.dirs += other.dirs;
    }

    /// Total entries (files + directories)
    pub fn total(&self) -> u64 {
        self.files + self.dirs
    }
}

/// Lock-free accumulator shared across workers
///
/// Constructed fresh per scan invocation so repeated scans never
/// interfere with each other.
#[derive(Debug, Default)]
pub struct ScanStats {
    files: AtomicU64,
    dirs: AtomicU64,
}

impl ScanStats {
    /// Create a zeroed accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single file
    pub fn record_file(&self) {
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a single directory
    pub fn record_dir(&self) {
        self.dirs.fetch_add(1, Ordering::Relaxed);
    }

    /// Fold a subtree's counts into the accumulator
    pub fn add_counts(&self, counts: ScanCounts) {
        self.files.fetch_add(counts.files, Ordering::Relaxed);
        self.dirs.fetch_add(counts.dirs, Ordering::Relaxed);
    }

    /// Snapshot the current totals
    ///
    /// Only meaningful after all workers have finished.
    pub fn snapshot(&self) -> ScanCounts {
        ScanCounts {
            files: self.files.load(Ordering::Relaxed),
            dirs: self.dirs.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulation() {
        let stats = ScanStats::new();

        stats.record_file();
        stats.record_dir();
        stats.add_counts(ScanCounts::new(10, 4));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.files, 11);
        assert_eq!(snapshot.dirs, 5);
    }

    #[test]
    fn test_counts_merge() {
        let mut counts = ScanCounts::new(3, 1);
        counts.merge(ScanCounts::new(7, 2));
        assert_eq!(counts, ScanCounts::new(10, 3));
        assert_eq!(counts.total(), 13);
    }

    #[test]
    fn test_concurrent_accumulation() {
        use std::sync::Arc;

        let stats = Arc::new(ScanStats::new());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    stats.record_file();
                }
                stats.add_counts(ScanCounts::new(0, 250));
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.snapshot(), ScanCounts::new(4000, 1000));
    }
}
