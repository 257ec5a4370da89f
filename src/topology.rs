//! Synthetic directory tree generation
//!
//! Builds the two on-disk topologies the benchmark exercises and
//! computes their analytic counts, so every scan can be verified
//! against a known-correct answer.

use crate::error::{BenchError, Result};
use crate::scanner::ScanCounts;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Directory structure under test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    /// Many sibling directories at one level, files in each:
    /// parallelism lives entirely at the top level
    Shallow,

    /// Nested levels of subdirectories with files only at the
    /// deepest level: parallelism is available at every depth
    Deep,
}

impl Structure {
    /// Both structures, in benchmark order
    pub const ALL: [Structure; 2] = [Structure::Shallow, Structure::Deep];

    /// Stable name used in reports and CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            Structure::Shallow => "shallow",
            Structure::Deep => "deep",
        }
    }
}

impl std::fmt::Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape parameters for the generated trees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeShape {
    /// Sibling directories in the shallow structure
    pub shallow_dirs: usize,

    /// Files per directory in the shallow structure
    pub shallow_files: usize,

    /// Nesting depth of the deep structure
    pub deep_levels: usize,

    /// Subdirectories per level (and files per leaf) in the deep
    /// structure
    pub deep_fanout: usize,
}

impl TreeShape {
    /// Small shape for development runs
    pub fn development() -> Self {
        Self {
            shallow_dirs: 4,
            shallow_files: 4,
            deep_levels: 4,
            deep_fanout: 2,
        }
    }

    /// Large shape for real measurements
    pub fn production() -> Self {
        Self {
            shallow_dirs: 100,
            shallow_files: 100,
            deep_levels: 4,
            deep_fanout: 10,
        }
    }

    /// Analytic counts for a generated tree, root included
    pub fn expected_counts(&self, structure: Structure) -> ScanCounts {
        match structure {
            Structure::Shallow => ScanCounts::new(
                (self.shallow_dirs * self.shallow_files) as u64,
                self.shallow_dirs as u64 + 1,
            ),
            Structure::Deep => {
                let mut dirs = 0u64;
                let mut level_width = 1u64;
                for _ in 0..=self.deep_levels {
                    dirs += level_width;
                    level_width *= self.deep_fanout as u64;
                }
                let leaf_dirs = (self.deep_fanout as u64).pow(self.deep_levels as u32);
                ScanCounts::new(leaf_dirs * self.deep_fanout as u64, dirs)
            }
        }
    }
}

/// Generate a tree of the given structure under `root`
///
/// `root` must already exist and be empty.
pub fn generate(root: &Path, structure: Structure, shape: &TreeShape) -> Result<()> {
    debug!(root = %root.display(), structure = %structure, "Generating test tree");

    let result = match structure {
        Structure::Shallow => create_shallow(root, shape),
        Structure::Deep => create_deep_level(root, 0, shape),
    };

    result.map_err(|source| BenchError::Topology {
        path: root.to_path_buf(),
        source,
    })
}

fn create_shallow(root: &Path, shape: &TreeShape) -> std::io::Result<()> {
    for d in 0..shape.shallow_dirs {
        let dir = root.join(format!("dir_{:03}", d));
        fs::create_dir(&dir)?;

        for f in 0..shape.shallow_files {
            let content = format!("File {} in directory {}", f, d);
            fs::write(dir.join(format!("file_{:03}.txt", f)), content)?;
        }
    }
    Ok(())
}

fn create_deep_level(path: &Path, level: usize, shape: &TreeShape) -> std::io::Result<()> {
    if level >= shape.deep_levels {
        // Files only at the deepest level
        for f in 0..shape.deep_fanout {
            let content = format!("File at level {}", level);
            fs::write(path.join(format!("file_{:03}.txt", f)), content)?;
        }
        return Ok(());
    }

    for d in 0..shape.deep_fanout {
        let dir = path.join(format!("level{}_dir{:03}", level, d));
        fs::create_dir(&dir)?;
        create_deep_level(&dir, level + 1, shape)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::walk::walk_tree;
    use tempfile::tempdir;

    #[test]
    fn test_expected_counts_development() {
        let shape = TreeShape::development();
        assert_eq!(
            shape.expected_counts(Structure::Shallow),
            ScanCounts::new(16, 5)
        );
        // 1 + 2 + 4 + 8 + 16 dirs; 16 leaves x 2 files
        assert_eq!(
            shape.expected_counts(Structure::Deep),
            ScanCounts::new(32, 31)
        );
    }

    #[test]
    fn test_expected_counts_production() {
        let shape = TreeShape::production();
        assert_eq!(
            shape.expected_counts(Structure::Shallow),
            ScanCounts::new(10_000, 101)
        );
        assert_eq!(
            shape.expected_counts(Structure::Deep),
            ScanCounts::new(100_000, 11_111)
        );
    }

    #[test]
    fn test_generated_shallow_matches_expected() {
        let shape = TreeShape::development();
        let root = tempdir().unwrap();
        generate(root.path(), Structure::Shallow, &shape).unwrap();

        let counts = walk_tree(root.path()).unwrap();
        assert_eq!(counts, shape.expected_counts(Structure::Shallow));
    }

    #[test]
    fn test_generated_deep_matches_expected() {
        let shape = TreeShape::development();
        let root = tempdir().unwrap();
        generate(root.path(), Structure::Deep, &shape).unwrap();

        let counts = walk_tree(root.path()).unwrap();
        assert_eq!(counts, shape.expected_counts(Structure::Deep));
    }
}
