//! Benchmark driver
//!
//! Orchestrates the timed runs: generates each tree structure,
//! scans it with every {strategy x worker count} combination,
//! averages wall-clock durations over repeated runs, and computes
//! speedup against the single-worker baseline of the same strategy
//! and structure. The scanners themselves are not timing-aware.

use crate::config::BenchConfig;
use crate::error::Result;
use crate::scanner::{DynamicQueueScanner, Scanner, StaticPartitionScanner, Strategy};
use crate::topology::{self, Structure};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Outcome of one {structure x strategy x workers} configuration
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Tree structure scanned
    pub structure: Structure,

    /// Strategy used
    pub strategy: Strategy,

    /// Worker count
    pub workers: usize,

    /// Wall-clock duration, averaged over the configured runs
    pub duration: Duration,

    /// Files counted by the final run
    pub files: u64,

    /// Directories counted by the final run
    pub dirs: u64,

    /// Speedup relative to the baseline worker count
    pub speedup: f64,
}

impl BenchmarkResult {
    /// Average duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

/// Run the full benchmark matrix
///
/// Trees are built under `config.root` (or the current directory),
/// scanned, and removed afterwards unless `keep_trees` is set.
pub fn run_benchmarks(config: &BenchConfig) -> Result<Vec<BenchmarkResult>> {
    let base = config
        .root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let strategies: Vec<Strategy> = match config.strategy {
        Some(strategy) => vec![strategy],
        None => Strategy::ALL.to_vec(),
    };

    let mut results = Vec::new();

    for structure in Structure::ALL {
        let tree_root = base.join(format!("benchmark_{}", structure));
        prepare_tree(&tree_root, structure, config)?;

        let expected = config.shape.expected_counts(structure);
        info!(
            structure = %structure,
            expected_files = expected.files,
            expected_dirs = expected.dirs,
            "Tree ready"
        );

        for &strategy in &strategies {
            let mut baseline: Option<Duration> = None;

            for &workers in &config.workers {
                let result = run_one(
                    &tree_root,
                    structure,
                    strategy,
                    workers,
                    config,
                    &mut baseline,
                )?;

                if result.files != expected.files || result.dirs != expected.dirs {
                    warn!(
                        structure = %structure,
                        strategy = %strategy,
                        workers,
                        expected_files = expected.files,
                        actual_files = result.files,
                        expected_dirs = expected.dirs,
                        actual_dirs = result.dirs,
                        "Scan counts do not match the generated tree"
                    );
                }

                info!(
                    structure = %structure,
                    strategy = %strategy,
                    workers,
                    duration_ms = result.duration_ms(),
                    speedup = result.speedup,
                    "Benchmark complete"
                );

                results.push(result);
            }
        }

        if config.keep_trees {
            info!(path = %tree_root.display(), "Keeping test tree");
        } else {
            debug!(path = %tree_root.display(), "Removing test tree");
            fs::remove_dir_all(&tree_root)?;
        }
    }

    Ok(results)
}

/// Average the timed runs for a single configuration
fn run_one(
    tree_root: &Path,
    structure: Structure,
    strategy: Strategy,
    workers: usize,
    config: &BenchConfig,
    baseline: &mut Option<Duration>,
) -> Result<BenchmarkResult> {
    let scanner = make_scanner(strategy, workers, config.queue_size);

    let mut total = Duration::ZERO;
    let mut files = 0;
    let mut dirs = 0;

    for run in 0..config.runs {
        let start = Instant::now();
        let counts = scanner.scan(tree_root)?;
        let elapsed = start.elapsed();

        debug!(
            structure = %structure,
            strategy = %strategy,
            workers,
            run,
            duration_ms = elapsed.as_secs_f64() * 1000.0,
            "Run finished"
        );

        total += elapsed;
        files = counts.files;
        dirs = counts.dirs;
    }

    let duration = total / config.runs as u32;

    // The first (smallest) worker count anchors the speedup; with
    // the default worker list that is the sequential walk
    let speedup = match baseline {
        None => {
            *baseline = Some(duration);
            1.0
        }
        Some(base) => {
            let secs = duration.as_secs_f64();
            if secs > 0.0 {
                base.as_secs_f64() / secs
            } else {
                0.0
            }
        }
    };

    Ok(BenchmarkResult {
        structure,
        strategy,
        workers,
        duration,
        files,
        dirs,
        speedup,
    })
}

/// Build a scanner for the given strategy and worker count
pub fn make_scanner(strategy: Strategy, workers: usize, queue_size: usize) -> Box<dyn Scanner> {
    match strategy {
        Strategy::StaticPartition => Box::new(StaticPartitionScanner::new(workers)),
        Strategy::DynamicQueue => {
            Box::new(DynamicQueueScanner::with_queue_capacity(workers, queue_size))
        }
    }
}

/// Recreate the tree root and generate the structure under it
fn prepare_tree(tree_root: &Path, structure: Structure, config: &BenchConfig) -> Result<()> {
    if tree_root.exists() {
        fs::remove_dir_all(tree_root)?;
    }
    fs::create_dir_all(tree_root)?;

    topology::generate(tree_root, structure, &config.shape)
}
