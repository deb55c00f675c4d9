//! Project discovery: a root directory plus its parsed configuration.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// A loaded Stonemason project.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project root directory (where stonemason.yml lives)
    pub root: PathBuf,
    /// Parsed configuration
    pub config: Config,
}

impl Project {
    /// Load a project from a directory containing stonemason.yml.
    pub fn load(dir: impl AsRef<Path>) -> CoreResult<Self> {
        let root = dir.as_ref();
        if !root.is_dir() {
            return Err(CoreError::ProjectNotFound {
                path: root.display().to_string(),
            });
        }
        let config = Config::load_from_dir(root)?;
        log::debug!(
            "Loaded project '{}' from {}",
            config.name,
            root.display()
        );
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Absolute migration directories for this project.
    pub fn migration_paths(&self) -> Vec<PathBuf> {
        self.config.migration_paths_absolute(&self.root)
    }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
