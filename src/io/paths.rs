use crate::{CatalogerError, Result};
use directories::ProjectDirs;
use std::path::{Component, Path, PathBuf};

/// Path management for Auto Cataloger configuration and state files
#[derive(Debug, Clone)]
pub struct CatalogerPaths {
    /// Configuration directory (holds config.yaml)
    pub config_dir: PathBuf,
    /// State directory (holds the preview state)
    pub state_dir: PathBuf,
}

impl CatalogerPaths {
    /// Create new paths instance using standard directories
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "auto-cataloger").ok_or_else(|| {
            CatalogerError::Config("Failed to determine project directories".to_string())
        })?;

        let config_dir = dirs.config_dir().to_path_buf();
        let state_dir = dirs.data_local_dir().join("state");
        Ok(Self {
            config_dir,
            state_dir,
        })
    }

    /// Create paths rooted in a specific directory
    pub fn for_project(project_root: &Path) -> Self {
        let config_dir = project_root.join(".auto-cataloger");
        let state_dir = config_dir.join("state");
        Self {
            config_dir,
            state_dir,
        }
    }

    /// Default configuration file path
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }

    /// Preview state file path
    pub fn preview_state_file(&self) -> PathBuf {
        self.state_dir.join("preview.json")
    }
}

impl Default for CatalogerPaths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if platform directories fail
            let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Self::for_project(&current_dir)
        })
    }
}

/// Utilities for working with paths
pub struct PathUtils;

impl PathUtils {
    /// Make a path absolute against the working directory and fold `.`/`..`
    /// lexically, without touching the filesystem.
    pub fn absolute(path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };
        Self::fold(&joined)
    }

    /// Relative path from `base` to `target`.
    ///
    /// Returns `None` when `target` is not `base` or a descendant of it,
    /// including paths on another drive or prefix.
    pub fn relative_to(target: &Path, base: &Path) -> Option<PathBuf> {
        let target = Self::absolute(target);
        let base = Self::absolute(base);
        target.strip_prefix(&base).ok().map(Path::to_path_buf)
    }

    fn fold(path: &Path) -> PathBuf {
        let mut out = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    // `..` at the root stays at the root.
                    if !out.pop() && !out.has_root() {
                        out.push(component);
                    }
                }
                other => out.push(other),
            }
        }
        out
    }
}
