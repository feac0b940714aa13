pub mod apply;
pub mod preview;
pub mod restore;
pub mod status;

use std::path::PathBuf;

use crate::cli::app::ConfigOverrides;
use crate::config::{validate_config, CatalogerConfig, ConfigLoader};
use crate::io::CatalogerPaths;
use crate::state::PreviewStateStore;
use crate::Result;

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Execute the command
    fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Where a command finds its configuration and preview state
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config_file: PathBuf,
    pub state_file: PathBuf,
}

impl CommandContext {
    /// Resolve locations from the global flags, falling back to platform directories
    pub fn new(config_file: Option<PathBuf>, state_dir: Option<PathBuf>) -> Self {
        let paths = CatalogerPaths::default();
        Self {
            config_file: config_file.unwrap_or_else(|| paths.config_file()),
            state_file: match state_dir {
                Some(dir) => dir.join("preview.json"),
                None => paths.preview_state_file(),
            },
        }
    }

    /// Load the config file and layer the command-line overrides on top
    pub fn load_config(&self, overrides: &ConfigOverrides) -> Result<CatalogerConfig> {
        let mut config = ConfigLoader::new(&self.config_file).load()?;
        overrides.apply_to(&mut config);
        validate_config(&config)?;
        Ok(config)
    }

    pub fn state_store(&self) -> PreviewStateStore {
        PreviewStateStore::new(&self.state_file)
    }
}
