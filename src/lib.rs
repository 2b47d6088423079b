pub mod config;
pub mod inspector;
pub mod repo_iter;
pub mod repo_status;
pub mod report;
pub mod scan;

pub use inspector::{GitInspector, Inspector};
pub use repo_status::{RepoState, RepoStatus};
pub use scan::{scan, ScanOptions};
