use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{Branch, ErrorCode, Repository, StatusOptions};
use tracing::{debug, warn};

use crate::repo_status::{RepoState, RepoStatus};

/// Looks inside a repository root that has already been detected.
pub trait Inspector {
    fn inspect(&self, repo_root: &Path) -> Result<RepoState>;
}

/// Inspects repositories through libgit2.
#[derive(Debug, Clone, Copy)]
pub struct GitInspector {
    /// Whether untracked files count as uncommitted changes.
    pub include_untracked: bool,
}

impl GitInspector {
    pub fn new(include_untracked: bool) -> Self {
        Self { include_untracked }
    }

    fn has_uncommitted_changes(&self, repo: &Repository) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(self.include_untracked)
            .recurse_untracked_dirs(false)
            .include_ignored(false)
            .include_unmodified(false);

        let statuses = repo
            .statuses(Some(&mut opts))
            .context("failed to read working tree status")?;

        Ok(statuses.iter().any(|entry| {
            let status = entry.status();
            !status.is_empty() && !status.is_ignored()
        }))
    }
}

impl Default for GitInspector {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Inspector for GitInspector {
    fn inspect(&self, repo_root: &Path) -> Result<RepoState> {
        // `open`, not `discover`: a broken marker must not resolve to some parent repository
        let repo = Repository::open(repo_root)
            .with_context(|| format!("failed to open repository at {}", repo_root.display()))?;

        Ok(RepoState {
            uncommitted_changes: self.has_uncommitted_changes(&repo)?,
            unpushed_commits: has_unpushed_commits(&repo)?,
        })
    }
}

/// Whether the checked out branch is ahead of its upstream.
///
/// An unborn or detached HEAD, and a branch without an upstream, all count as nothing to push.
pub fn has_unpushed_commits(repo: &Repository) -> Result<bool> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            return Ok(false)
        }
        Err(e) => return Err(e).context("failed to resolve HEAD"),
    };

    if !head.is_branch() {
        return Ok(false);
    }
    let local = match head.target() {
        Some(oid) => oid,
        None => return Ok(false),
    };

    let upstream = match Branch::wrap(head).upstream() {
        Ok(upstream) => upstream,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(false),
        Err(e) => return Err(e).context("failed to resolve upstream branch"),
    };
    let remote = match upstream.get().target() {
        Some(oid) => oid,
        None => return Ok(false),
    };

    let (ahead, _behind) = repo
        .graph_ahead_behind(local, remote)
        .context("failed to compare branch with its upstream")?;
    Ok(ahead > 0)
}

/// Runs `inspector` on one repository. A failure is recorded on the status, never raised.
pub fn inspect_repo(inspector: &dyn Inspector, repo_root: PathBuf) -> RepoStatus {
    match inspector.inspect(&repo_root) {
        Ok(state) => {
            debug!(path = ?repo_root, ?state, "inspected repository");
            RepoStatus::new(repo_root, state)
        }
        Err(err) => {
            warn!(path = ?repo_root, "unable to check repository status: {err:#}");
            RepoStatus::failed(repo_root, format!("{err:#}"))
        }
    }
}
