//! dirbench - Directory Traversal Parallelization Benchmark
//!
//! Benchmarks two strategies for parallelizing a filesystem tree
//! traversal (counting files and directories) over two synthetic
//! topologies, across a range of worker-pool sizes, reporting
//! wall-clock duration and speedup against the single-worker run.
//!
//! # Strategies
//!
//! - **Static partition**: the root's immediate subdirectories are
//!   listed once and divided among a fixed worker pool through a
//!   channel sized to the entry count. Parallelism is bounded by the
//!   root's fan-out, so shallow/wide trees split well and deep/narrow
//!   trees degrade to load imbalance.
//!
//! - **Dynamic queue**: directories discovered at any depth feed a
//!   bounded task queue. Workers pop a path, count its files, and
//!   try to hand each subdirectory back; on a full queue the worker
//!   walks that subtree inline, trading concurrency for bounded
//!   memory. Termination is detected by a pending-task counter, not
//!   queue occupancy.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Benchmark Driver                      │
//! │   {structure} x {strategy} x {workers}, timed runs        │
//! └──────┬──────────────────────────────────────────┬────────┘
//!        │ generate                                 │ scan
//!        ▼                                          ▼
//! ┌──────────────┐                   ┌──────────────────────────┐
//! │  Topology    │                   │     Scanner trait        │
//! │  Generator   │                   │  ┌────────┐ ┌─────────┐  │
//! │ shallow/deep │                   │  │ static │ │ dynamic │  │
//! └──────────────┘                   │  └───┬────┘ └────┬────┘  │
//!                                    │      │  workers  │       │
//!                                    │      ▼           ▼       │
//!                                    │  ┌──────────────────┐    │
//!                                    │  │ atomic ScanStats │    │
//!                                    │  └──────────────────┘    │
//!                                    └──────────────────────────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Report     │  console table + CSV
//! └──────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Quick development run
//! dirbench --dev
//!
//! # Full run with custom worker counts, CSV under ./results
//! dirbench -w 1,2,4,8,16 -o results
//! ```

pub mod bench;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod topology;

pub use bench::{run_benchmarks, BenchmarkResult};
pub use config::{BenchConfig, CliArgs};
pub use error::{BenchError, Result, ScanError};
pub use scanner::{DynamicQueueScanner, ScanCounts, Scanner, StaticPartitionScanner, Strategy};
pub use topology::{Structure, TreeShape};
