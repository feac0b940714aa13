use super::types::CatalogerConfig;
use crate::{CatalogerError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader for `config.yaml`
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given config file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration, or defaults when the file does not exist
    pub fn load(&self) -> Result<CatalogerConfig> {
        if !self.path.exists() {
            debug!(
                "No config at {}, using defaults",
                self.path.display()
            );
            return Ok(CatalogerConfig::default());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            CatalogerError::Config(format!(
                "Failed to read config file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let config: CatalogerConfig = serde_yaml_ng::from_str(&contents).map_err(|e| {
            CatalogerError::Config(format!(
                "Failed to parse config file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        validate_config(&config)?;
        debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }
}

/// Reject settings that would corrupt the catalog file
pub fn validate_config(config: &CatalogerConfig) -> Result<()> {
    if let Some(selected) = &config.asset_library {
        if selected.trim().is_empty() {
            return Err(CatalogerError::Config(
                "asset_library must not be empty; omit it to use the manual folder".to_string(),
            ));
        }
    }
    if config.catalog_root_prefix.contains(':') {
        return Err(CatalogerError::Config(format!(
            "catalog_root_prefix must not contain ':', got {}",
            config.catalog_root_prefix
        )));
    }
    Ok(())
}
