//! Integration tests for dirbench
//!
//! Conformance suite: both strategies must return identical counts
//! for every generated shape and worker count, and both must equal
//! the analytically known counts for the tree.

use dirbench::scanner::{DynamicQueueScanner, ScanCounts, Scanner, StaticPartitionScanner, Strategy};
use dirbench::topology::{self, Structure, TreeShape};
use std::fs;
use std::fs::File;
use tempfile::{tempdir, TempDir};

const WORKER_COUNTS: [usize; 4] = [1, 2, 4, 8];

fn generate_tree(structure: Structure, shape: &TreeShape) -> TempDir {
    let root = tempdir().unwrap();
    topology::generate(root.path(), structure, shape).unwrap();
    root
}

#[test]
fn test_conformance_across_strategies_and_workers() {
    let shape = TreeShape::development();

    for structure in Structure::ALL {
        let root = generate_tree(structure, &shape);
        let expected = shape.expected_counts(structure);

        for strategy in Strategy::ALL {
            for workers in WORKER_COUNTS {
                let counts = strategy.scanner(workers).scan(root.path()).unwrap();
                assert_eq!(
                    counts, expected,
                    "{} / {} / {} workers",
                    structure, strategy, workers
                );
            }
        }
    }
}

#[test]
fn test_dev_shape_analytic_counts() {
    let shape = TreeShape::development();

    // 4 dirs x 4 files, plus the root
    assert_eq!(
        shape.expected_counts(Structure::Shallow),
        ScanCounts::new(16, 5)
    );

    // 4 levels x 2 fanout: 2^4 leaves x 2 files, 1+2+4+8+16 dirs
    assert_eq!(
        shape.expected_counts(Structure::Deep),
        ScanCounts::new(32, 31)
    );
}

#[test]
fn test_idempotent_scans() {
    let shape = TreeShape::development();
    let root = generate_tree(Structure::Deep, &shape);

    let scanner = DynamicQueueScanner::new(4);
    let first = scanner.scan(root.path()).unwrap();
    let second = scanner.scan(root.path()).unwrap();
    assert_eq!(first, second);

    let scanner = StaticPartitionScanner::new(4);
    let first = scanner.scan(root.path()).unwrap();
    let second = scanner.scan(root.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_saturated_queue_accounts_for_all_work() {
    // Root fan-out far above the queue capacity: every refused push
    // must be recovered by the inline fallback
    let shape = TreeShape {
        shallow_dirs: 64,
        shallow_files: 3,
        deep_levels: 0,
        deep_fanout: 0,
    };
    let root = generate_tree(Structure::Shallow, &shape);
    let expected = shape.expected_counts(Structure::Shallow);

    for workers in [2, 4, 8] {
        let scanner = DynamicQueueScanner::with_queue_capacity(workers, 8);
        let counts = scanner.scan(root.path()).unwrap();
        assert_eq!(counts, expected, "{} workers", workers);
    }
}

#[test]
fn test_deep_narrow_tree() {
    // One directory per level: the static scanner has a single
    // top-level work item, the dynamic scanner a single task chain.
    // Both must still agree.
    let root = tempdir().unwrap();
    let mut current = root.path().to_path_buf();
    for level in 0..10 {
        current = current.join(format!("level{}", level));
        fs::create_dir(&current).unwrap();
        File::create(current.join("file.txt")).unwrap();
    }

    let expected = ScanCounts::new(10, 11);
    for strategy in Strategy::ALL {
        for workers in WORKER_COUNTS {
            let counts = strategy.scanner(workers).scan(root.path()).unwrap();
            assert_eq!(counts, expected, "{} / {} workers", strategy, workers);
        }
    }
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does_not_exist");

    for strategy in Strategy::ALL {
        for workers in [1, 4] {
            assert!(
                strategy.scanner(workers).scan(&missing).is_err(),
                "{} / {} workers",
                strategy,
                workers
            );
        }
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_subtree_is_tolerated() {
    use std::os::unix::fs::PermissionsExt;

    let shape = TreeShape {
        shallow_dirs: 4,
        shallow_files: 4,
        deep_levels: 0,
        deep_fanout: 0,
    };
    let root = generate_tree(Structure::Shallow, &shape);

    let locked = root.path().join("dir_001");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can read anything regardless of mode bits; nothing to test
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    // The locked subtree (its dir and 4 files) is dropped, the scan
    // itself still succeeds
    let expected = ScanCounts::new(12, 4);
    for strategy in Strategy::ALL {
        for workers in [1, 4] {
            let counts = strategy.scanner(workers).scan(root.path()).unwrap();
            assert_eq!(counts, expected, "{} / {} workers", strategy, workers);
        }
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_production_shape_deep_tree() {
    // Smaller than the real production shape but beyond anything the
    // dev tests cover: 3 levels x 4 fanout
    let shape = TreeShape {
        shallow_dirs: 0,
        shallow_files: 0,
        deep_levels: 3,
        deep_fanout: 4,
    };
    let root = generate_tree(Structure::Deep, &shape);

    // dirs: 1 + 4 + 16 + 64 = 85; files: 64 leaves x 4
    let expected = ScanCounts::new(256, 85);
    assert_eq!(shape.expected_counts(Structure::Deep), expected);

    for strategy in Strategy::ALL {
        for workers in WORKER_COUNTS {
            let counts = strategy.scanner(workers).scan(root.path()).unwrap();
            assert_eq!(counts, expected, "{} / {} workers", strategy, workers);
        }
    }
}
