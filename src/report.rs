//! Result reporting
//!
//! Console summary table plus CSV export of the benchmark results.

use crate::bench::BenchmarkResult;
use crate::error::{BenchError, Result};
use console::style;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Print the run header
pub fn print_header(development: bool, workers: &[usize], runs: usize) {
    println!(
        "{}",
        style("Directory Traversal Parallelization Benchmark").bold()
    );
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Mode:").bold(),
        if development { "development" } else { "production" }
    );
    println!("  {} {}", style("CPUs:").bold(), num_cpus::get());
    println!(
        "  {} {}",
        style("Workers:").bold(),
        workers
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  {} {}", style("Runs per config:").bold(), runs);
    println!();
}

/// Print the summary table of all results
pub fn print_results(results: &[BenchmarkResult]) {
    println!();
    println!("{}", style("Benchmark Summary").green().bold());
    println!("{}", style("─".repeat(80)).dim());
    let header = format!(
        "{:<10} {:<18} {:>8} {:>12} {:>10} {:>8} {:>9}",
        "Structure", "Strategy", "Workers", "Duration", "Files", "Dirs", "Speedup",
    );
    println!("{}", style(header).bold());
    println!("{}", style("─".repeat(80)).dim());

    for result in results {
        println!(
            "{:<10} {:<18} {:>8} {:>10.2}ms {:>10} {:>8} {:>8.2}x",
            result.structure.as_str(),
            result.strategy.as_str(),
            result.workers,
            result.duration_ms(),
            format_number(result.files),
            format_number(result.dirs),
            result.speedup,
        );
    }

    println!("{}", style("─".repeat(80)).dim());
}

/// Export results as CSV into `output_dir`
///
/// The filename carries a timestamp so repeated runs never clobber
/// each other. Returns the path of the written file.
pub fn export_csv(results: &[BenchmarkResult], output_dir: &Path) -> Result<PathBuf> {
    let export_err = |source: std::io::Error, path: &Path| BenchError::Export {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(output_dir).map_err(|e| export_err(e, output_dir))?;

    let filename = format!(
        "benchmark_results_{}.csv",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let path = output_dir.join(filename);

    let mut file = fs::File::create(&path).map_err(|e| export_err(e, &path))?;

    writeln!(file, "Structure,Strategy,Workers,Duration_ms,Files,Dirs,Speedup")
        .map_err(|e| export_err(e, &path))?;

    for r in results {
        writeln!(
            file,
            "{},{},{},{:.2},{},{},{:.2}",
            r.structure.as_str(),
            r.strategy.as_str(),
            r.workers,
            r.duration_ms(),
            r.files,
            r.dirs,
            r.speedup,
        )
        .map_err(|e| export_err(e, &path))?;
    }

    Ok(path)
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Strategy;
    use crate::topology::Structure;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample_result() -> BenchmarkResult {
        BenchmarkResult {
            structure: Structure::Shallow,
            strategy: Strategy::DynamicQueue,
            workers: 4,
            duration: Duration::from_millis(125),
            files: 10_000,
            dirs: 101,
            speedup: 2.5,
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_csv_export() {
        let dir = tempdir().unwrap();
        let path = export_csv(&[sample_result()], dir.path()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Structure,Strategy,Workers,Duration_ms,Files,Dirs,Speedup"
        );
        assert_eq!(
            lines.next().unwrap(),
            "shallow,dynamic-queue,4,125.00,10000,101,2.50"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_export_creates_output_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("results").join("csv");
        let path = export_csv(&[sample_result()], &nested).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
