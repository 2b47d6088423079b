use std::env;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::repo_iter::GIT_MARKER;

/// Depth used when neither the command line nor the config file sets one.
pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Config {
    /// Directories scanned when none are given on the command line.
    #[serde(default)]
    pub roots: Vec<String>,
    pub max_depth: Option<usize>,
    // When include_untracked is false, only changes to tracked files are reported.
    // Defaults to true
    #[serde(default = "default_include_untracked")]
    pub include_untracked: bool,
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_include_untracked() -> bool {
    true
}

fn default_marker() -> String {
    GIT_MARKER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::empty()
    }
}

impl Config {
    pub fn empty() -> Self {
        Self {
            roots: vec![],
            max_depth: None,
            include_untracked: default_include_untracked(),
            marker: default_marker(),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::get_dirt_config_home().map(|home| home.join("config.toml"))
    }

    /// Location of all config. By default
    ///
    /// Linux   :   $XDG_CONFIG_HOME/dirt or $HOME/.config/dirt
    /// macOS   :   $HOME/Library/Application Support/dirt
    /// Windows :   %AppData%\Roaming\dirt
    ///
    /// This can be overridden by setting DIRT_CONFIG_HOME environment variable.
    fn get_dirt_config_home() -> Option<PathBuf> {
        if let Ok(env_var) = env::var("DIRT_CONFIG_HOME") {
            if !env_var.is_empty() {
                return Some(env_var.into());
            }
        }

        dirs::config_dir().map(|dir| dir.join("dirt"))
    }

    /// Load Config from the default path. A missing file is an empty config.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => Ok(Self::empty()),
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let mut reader = BufReader::new(file);

        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;

        let res = toml::from_slice(buffer.as_slice())
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(res)
    }

    /// Configured roots with a leading `~` expanded to the home directory.
    pub fn root_paths(&self) -> Vec<PathBuf> {
        self.roots.iter().map(|root| expand_home(root)).collect()
    }
}

fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
