use std::path::Path;

use tracing::{debug, info_span};

use crate::inspector::{inspect_repo, Inspector};
use crate::repo_iter::{RepoIter, GIT_MARKER};
use crate::repo_status::RepoStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// How many directory levels below each root may be inspected.
    pub max_depth: usize,
    pub marker: String,
}

impl ScanOptions {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            marker: GIT_MARKER.to_string(),
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

/// Finds and inspects the repositories below every root, in root order then discovery order.
///
/// Roots are not deduplicated; overlapping roots report the same repository more than once.
pub fn scan<P: AsRef<Path>>(
    roots: &[P],
    options: &ScanOptions,
    inspector: &dyn Inspector,
) -> Vec<RepoStatus> {
    let mut statuses = Vec::new();
    for root in roots {
        scan_root(root.as_ref(), options, inspector, &mut statuses);
    }
    statuses
}

fn scan_root(
    root: &Path,
    options: &ScanOptions,
    inspector: &dyn Inspector,
    statuses: &mut Vec<RepoStatus>,
) {
    let span = info_span!("scan_root", root = ?root, max_depth = options.max_depth);
    let _enter = span.enter();

    let before = statuses.len();
    for repo_root in RepoIter::new(root, options.max_depth, options.marker.as_str()) {
        statuses.push(inspect_repo(inspector, repo_root));
    }
    debug!(found = statuses.len() - before, "finished root");
}
