//! Parallel directory scanners
//!
//! Two strategies satisfy the same [`Scanner`] contract and must
//! return identical counts for any tree and worker count:
//!
//! ```text
//!                      ┌────────────────────────┐
//!                      │     Scanner trait      │
//!                      │ scan(root) -> counts   │
//!                      └───────────┬────────────┘
//!              ┌───────────────────┴───────────────────┐
//!   ┌──────────▼──────────┐               ┌────────────▼───────────┐
//!   │ StaticPartition     │               │ DynamicQueue           │
//!   │ - list root once    │               │ - bounded task queue   │
//!   │ - one task per      │               │ - discover dirs at     │
//!   │   top-level subdir  │               │   runtime, re-enqueue  │
//!   │ - closed channel    │               │ - inline fallback on   │
//!   │   ends workers      │               │   saturation           │
//!   └─────────────────────┘               │ - pending counter ends │
//!                                         │   the scan             │
//!                                         └────────────────────────┘
//! ```
//!
//! Both degrade to the same sequential walk when configured with a
//! single worker, which is the speedup baseline.

pub mod dynamic;
pub mod partition;
pub mod queue;
pub mod stats;
pub mod walk;

pub use dynamic::DynamicQueueScanner;
pub use partition::StaticPartitionScanner;
pub use stats::{ScanCounts, ScanStats};

use crate::error::ScanError;
use std::fmt;
use std::path::Path;

/// Common contract both scan strategies satisfy
pub trait Scanner: Send + Sync {
    /// Count every file and directory under `root`
    ///
    /// The returned directory count includes `root` itself. The only
    /// fatal error is an unenumerable root; subtree failures reduce
    /// the counts instead.
    fn scan(&self, root: &Path) -> Result<ScanCounts, ScanError>;
}

/// Parallelization strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Divide the root's top-level subdirectories among a fixed pool
    StaticPartition,

    /// Feed runtime-discovered directories through a bounded queue
    DynamicQueue,
}

impl Strategy {
    /// All strategies, in benchmark order
    pub const ALL: [Strategy; 2] = [Strategy::StaticPartition, Strategy::DynamicQueue];

    /// Build a scanner for this strategy
    pub fn scanner(self, workers: usize) -> Box<dyn Scanner> {
        match self {
            Strategy::StaticPartition => Box::new(StaticPartitionScanner::new(workers)),
            Strategy::DynamicQueue => Box::new(DynamicQueueScanner::new(workers)),
        }
    }

    /// Stable name used in reports and CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::StaticPartition => "static-partition",
            Strategy::DynamicQueue => "dynamic-queue",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::StaticPartition.as_str(), "static-partition");
        assert_eq!(Strategy::DynamicQueue.as_str(), "dynamic-queue");
    }

    #[test]
    fn test_strategies_agree() {
        let root = tempdir().unwrap();
        for d in 0..3 {
            let dir = root.path().join(format!("dir_{}", d));
            std::fs::create_dir(&dir).unwrap();
            File::create(dir.join("file.txt")).unwrap();
        }

        let expected = ScanCounts::new(3, 4);
        for strategy in Strategy::ALL {
            for workers in [1, 2, 4] {
                let counts = strategy.scanner(workers).scan(root.path()).unwrap();
                assert_eq!(counts, expected, "{} with {} workers", strategy, workers);
            }
        }
    }
}
