//! Configuration for dirbench
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use crate::scanner::Strategy;
use crate::topology::TreeShape;
use clap::Parser;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Minimum queue size (the root must be seedable)
const MIN_QUEUE_SIZE: usize = 1;

/// Benchmark harness for parallel directory traversal strategies
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dirbench",
    version,
    about = "Benchmark parallel directory traversal strategies",
    long_about = "Generates synthetic directory trees (shallow/wide and deep/nested), \
                  scans them with two parallelization strategies across a range of \
                  worker counts, and reports duration and speedup against the \
                  single-worker baseline.",
    after_help = "EXAMPLES:\n    \
        dirbench                      # full-size trees, workers 1,2,4,8\n    \
        dirbench --dev                # small trees for a quick check\n    \
        dirbench -w 1,4,16 -r 5       # custom worker counts, 5 runs each\n    \
        dirbench --root /mnt/scratch  # build trees on a specific filesystem"
)]
pub struct CliArgs {
    /// Use the small development tree shape
    #[arg(long)]
    pub dev: bool,

    /// Worker counts to benchmark (comma separated)
    #[arg(
        short = 'w',
        long,
        value_name = "NUM,NUM,...",
        value_delimiter = ',',
        default_value = "1,2,4,8"
    )]
    pub workers: Vec<usize>,

    /// Timed runs per configuration (durations are averaged)
    #[arg(short = 'r', long, default_value = "3", value_name = "NUM")]
    pub runs: usize,

    /// Task queue capacity for the dynamic-queue strategy
    #[arg(long, default_value = "1000", value_name = "NUM")]
    pub queue_size: usize,

    /// Benchmark only one strategy (both if not set)
    #[arg(short = 's', long, value_enum, value_name = "STRATEGY")]
    pub strategy: Option<Strategy>,

    /// Directory to build the test trees under (current dir if not set)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory for CSV result files
    #[arg(short = 'o', long, default_value = "benchmark", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Skip the CSV export
    #[arg(long)]
    pub no_csv: bool,

    /// Keep the generated trees instead of deleting them
    #[arg(long)]
    pub keep_trees: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
///
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Tree shape parameters
    pub shape: TreeShape,

    /// Whether the development shape is in use
    pub development: bool,

    /// Worker counts, ascending and deduplicated
    pub workers: Vec<usize>,

    /// Timed runs per configuration
    pub runs: usize,

    /// Task queue capacity for the dynamic-queue strategy
    pub queue_size: usize,

    /// Restrict the benchmark to one strategy
    pub strategy: Option<Strategy>,

    /// Where to build the test trees (current dir if `None`)
    pub root: Option<PathBuf>,

    /// Directory for CSV result files
    pub output_dir: PathBuf,

    /// Whether to export CSV
    pub export_csv: bool,

    /// Whether to keep the generated trees
    pub keep_trees: bool,
}

impl BenchConfig {
    /// Validate CLI arguments into a runtime configuration
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.workers.is_empty() {
            return Err(ConfigError::EmptyWorkerList);
        }

        for &count in &args.workers {
            if count == 0 || count > MAX_WORKERS {
                return Err(ConfigError::InvalidWorkerCount {
                    count,
                    max: MAX_WORKERS,
                });
            }
        }

        if args.queue_size < MIN_QUEUE_SIZE {
            return Err(ConfigError::InvalidQueueSize {
                size: args.queue_size,
                min: MIN_QUEUE_SIZE,
            });
        }

        if args.runs == 0 {
            return Err(ConfigError::InvalidRuns { runs: args.runs });
        }

        if let Some(ref root) = args.root {
            if !root.is_dir() {
                return Err(ConfigError::InvalidRoot {
                    path: root.clone(),
                    reason: "not an existing directory".into(),
                });
            }
        }

        let mut workers = args.workers;
        workers.sort_unstable();
        workers.dedup();

        let shape = if args.dev {
            TreeShape::development()
        } else {
            TreeShape::production()
        };

        Ok(Self {
            shape,
            development: args.dev,
            workers,
            runs: args.runs,
            queue_size: args.queue_size,
            strategy: args.strategy,
            root: args.root,
            output_dir: args.output_dir,
            export_csv: !args.no_csv,
            keep_trees: args.keep_trees,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs::parse_from(["dirbench"])
    }

    #[test]
    fn test_default_args_valid() {
        let config = BenchConfig::from_args(base_args()).unwrap();
        assert_eq!(config.workers, vec![1, 2, 4, 8]);
        assert_eq!(config.runs, 3);
        assert_eq!(config.queue_size, 1000);
        assert!(config.export_csv);
        assert!(!config.development);
    }

    #[test]
    fn test_dev_flag_selects_small_shape() {
        let config =
            BenchConfig::from_args(CliArgs::parse_from(["dirbench", "--dev"])).unwrap();
        assert_eq!(config.shape, TreeShape::development());
    }

    #[test]
    fn test_workers_sorted_and_deduplicated() {
        let args = CliArgs::parse_from(["dirbench", "-w", "8,1,4,1"]);
        let config = BenchConfig::from_args(args).unwrap();
        assert_eq!(config.workers, vec![1, 4, 8]);
    }

    #[test]
    fn test_strategy_filter_parses() {
        let args = CliArgs::parse_from(["dirbench", "--strategy", "dynamic-queue"]);
        let config = BenchConfig::from_args(args).unwrap();
        assert_eq!(config.strategy, Some(Strategy::DynamicQueue));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let args = CliArgs::parse_from(["dirbench", "-w", "0,2"]);
        assert!(matches!(
            BenchConfig::from_args(args),
            Err(ConfigError::InvalidWorkerCount { count: 0, .. })
        ));
    }

    #[test]
    fn test_zero_runs_rejected() {
        let args = CliArgs::parse_from(["dirbench", "-r", "0"]);
        assert!(matches!(
            BenchConfig::from_args(args),
            Err(ConfigError::InvalidRuns { runs: 0 })
        ));
    }

    #[test]
    fn test_missing_root_rejected() {
        let args = CliArgs::parse_from(["dirbench", "--root", "/definitely/not/a/dir"]);
        assert!(matches!(
            BenchConfig::from_args(args),
            Err(ConfigError::InvalidRoot { .. })
        ));
    }
}
