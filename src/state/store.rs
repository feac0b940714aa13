use crate::state::types::PreviewState;
use crate::{CatalogerError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and writes the preview state file (`state/preview.json`)
pub struct PreviewStateStore {
    path: PathBuf,
}

impl PreviewStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state, or a neutral state when no file exists yet
    pub fn load(&self) -> Result<PreviewState> {
        if !self.path.exists() {
            return Ok(PreviewState::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| CatalogerError::file("read", &self.path, e))?;
        let state: PreviewState = serde_json::from_str(&content).map_err(|e| {
            CatalogerError::State(format!(
                "Corrupt preview state {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(state)
    }

    /// Save state to disk, creating the state directory if needed
    pub fn save(&self, state: &PreviewState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CatalogerError::file("create directory", parent, e))?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content).map_err(|e| CatalogerError::file("write", &self.path, e))?;
        debug!("Saved preview state to {}", self.path.display());
        Ok(())
    }
}
