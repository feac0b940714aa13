use super::{CommandContext, CommandHandler};
use crate::catalog::restore_backup;
use crate::cli::app::ConfigOverrides;
use crate::config::require_library_root;
use crate::Result;
use std::path::PathBuf;

/// Handler for the `restore` command
pub struct RestoreCommand {
    pub context: CommandContext,
    pub project_file: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

impl CommandHandler for RestoreCommand {
    fn execute(&self) -> Result<()> {
        let config = self.context.load_config(&self.overrides)?;
        let root = require_library_root(&config, self.project_file.as_deref())?;
        let files = restore_backup(&root.path)?;
        println!(
            "✅ Restored {} from {}",
            files.catalog_file.display(),
            files.backup_file.display()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "restore"
    }
}

impl RestoreCommand {
    pub fn new(
        context: CommandContext,
        project_file: Option<PathBuf>,
        overrides: ConfigOverrides,
    ) -> Self {
        Self {
            context,
            project_file,
            overrides,
        }
    }
}
