use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, FilterEntry, IntoIter, WalkDir};

/// The entry whose presence marks a directory as a git repository root.
pub const GIT_MARKER: &str = ".git";

type Walker = FilterEntry<IntoIter, fn(&DirEntry) -> bool>;

/// Iterates over the repository roots below a directory, depth first, in file name order.
///
/// Once a directory is yielded, nothing inside it is visited, so submodules and vendored
/// checkouts are never reported on their own. Symlinked subdirectories are not followed.
pub struct RepoIter {
    walker: Walker,
    marker: String,
}

impl RepoIter {
    pub fn new(root: impl AsRef<Path>, max_depth: usize, marker: impl Into<String>) -> Self {
        let walker = WalkDir::new(root)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_traversable as fn(&DirEntry) -> bool);

        Self {
            walker,
            marker: marker.into(),
        }
    }
}

// The root may be a symlink the user passed explicitly, so only descendants are checked.
fn is_traversable(entry: &DirEntry) -> bool {
    entry.depth() == 0 || entry.file_type().is_dir()
}

impl Iterator for RepoIter {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        warn!(path = ?err.path(), "cannot read scan root: {err}");
                    } else {
                        debug!(path = ?err.path(), "skipping unreadable entry: {err}");
                    }
                    continue;
                }
            };

            if entry.depth() == 0 && !entry.path().is_dir() {
                warn!(path = ?entry.path(), "scan root is not a directory");
                continue;
            }

            if is_repository(entry.path(), &self.marker) {
                self.walker.skip_current_dir();
                return Some(entry.into_path());
            }
        }
    }
}

/// A directory is a repository root if it directly contains `marker`, file or directory.
pub fn is_repository(dir: &Path, marker: &str) -> bool {
    fs::symlink_metadata(dir.join(marker)).is_ok()
}

pub fn find_repos(root: impl AsRef<Path>, max_depth: usize, marker: &str) -> Vec<PathBuf> {
    RepoIter::new(root, max_depth, marker).collect()
}
