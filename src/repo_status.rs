// src/repo_status.rs
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What an inspector learned about a repository.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct RepoState {
    pub uncommitted_changes: bool,
    pub unpushed_commits: bool,
}

/// One discovered repository and its state at the time it was inspected.
///
/// When the inspection itself failed, both flags are `false` and `error` carries the
/// reason, so a broken repository is never mistaken for a clean one.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct RepoStatus {
    pub path: PathBuf,
    pub uncommitted_changes: bool,
    pub unpushed_commits: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepoStatus {
    pub fn new(path: PathBuf, state: RepoState) -> Self {
        Self {
            path,
            uncommitted_changes: state.uncommitted_changes,
            unpushed_commits: state.unpushed_commits,
            error: None,
        }
    }

    pub fn clean(path: PathBuf) -> Self {
        Self::new(path, RepoState::default())
    }

    pub fn failed(path: PathBuf, error: impl fmt::Display) -> Self {
        Self {
            path,
            uncommitted_changes: false,
            unpushed_commits: false,
            error: Some(error.to_string()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when there is something to commit or push.
    pub fn is_dirty(&self) -> bool {
        self.uncommitted_changes || self.unpushed_commits
    }

    /// False when the status could not be determined.
    pub fn is_known(&self) -> bool {
        self.error.is_none()
    }

    /// Whether a default (non `--all`) report should list this repository.
    pub fn needs_attention(&self) -> bool {
        self.is_dirty() || !self.is_known()
    }
}
