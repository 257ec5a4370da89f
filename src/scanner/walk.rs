//! Sequential traversal primitive
//!
//! A plain depth-first walk of a directory subtree, counting every
//! directory (including the subtree root) and every file once. Both
//! scanners use it: as the whole-tree fallback when configured with a
//! single worker, and as the per-subtree unit of work otherwise.
//!
//! Error policy: failing to list the subtree root propagates as `Err`
//! from this call; the caller decides whether that is fatal. Listing
//! failures deeper in the subtree drop only the affected branch, so a
//! single unreadable directory cannot void a large walk.

use crate::scanner::stats::ScanCounts;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Walk a subtree depth-first and return its counts
///
/// Symlinks are not followed; an entry is either a directory or a
/// file, decided by its (unfollowed) file type.
pub fn walk_tree(path: &Path) -> io::Result<ScanCounts> {
    let entries = fs::read_dir(path)?;

    // The subtree root itself
    let mut counts = ScanCounts::new(0, 1);

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if is_dir(&entry) {
            match walk_tree(&entry.path()) {
                Ok(subtree) => counts.merge(subtree),
                Err(e) => {
                    // Unreadable branch: dropped, walk continues
                    debug!(
                        path = %entry.path().display(),
                        error = %e,
                        "Skipping unreadable subtree"
                    );
                }
            }
        } else {
            counts.files += 1;
        }
    }

    Ok(counts)
}

/// Classify a directory entry without following symlinks
pub(crate) fn is_dir(entry: &fs::DirEntry) -> bool {
    entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
}
