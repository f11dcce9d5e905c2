//! `transys.toml` configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use transys_core::ReductionConfig;

/// File name searched for when no `--config` is given.
pub const CONFIG_FILE: &str = "transys.toml";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransysConfig {
    /// Transitive reduction tunables.
    #[serde(default)]
    pub reduction: ReductionConfig,
}

impl TransysConfig {
    /// Load an explicit config file, or search upward from `start_dir` for a
    /// `transys.toml`. Falls back to defaults when nothing is found.
    pub fn resolve(explicit: Option<&Path>, start_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::find(start_dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }
}
