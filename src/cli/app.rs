use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{CatalogerConfig, ClassificationMode, PrefixDelimiter, TargetType};

/// Auto Cataloger: sort asset items into catalog folders
#[derive(Parser, Debug)]
#[command(name = "auto-cataloger")]
#[command(version)]
#[command(about = "Assign asset items to catalogs in a library's catalog index")]
#[command(
    long_about = "Auto Cataloger plans a catalog path for every item listed in a manifest, \
shows the plan with `preview`, and writes catalogs and catalog ids with `apply`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Set log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Directory holding the preview state
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Per-invocation overrides of the configuration file
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Manual asset library root folder; clears a registered selection
    #[arg(long)]
    pub library_root: Option<PathBuf>,

    /// Registered library id (LIB_...)
    #[arg(long)]
    pub library: Option<String>,

    #[arg(long, value_enum)]
    pub mode: Option<ClassificationMode>,

    #[arg(long, value_enum)]
    pub delimiter: Option<PrefixDelimiter>,

    /// Catalog root prefix
    #[arg(long)]
    pub prefix: Option<String>,

    #[arg(long, value_enum)]
    pub target: Option<TargetType>,

    /// Mark non-asset items as assets during apply
    #[arg(long)]
    pub auto_mark: bool,
}

impl ConfigOverrides {
    pub fn apply_to(&self, config: &mut CatalogerConfig) {
        if let Some(root) = &self.library_root {
            config.asset_library_root_folder = Some(root.clone());
            config.asset_library = None;
        }
        if let Some(library) = &self.library {
            config.asset_library = Some(library.clone());
        }
        if let Some(mode) = self.mode {
            config.classification_mode = mode;
        }
        if let Some(delimiter) = self.delimiter {
            config.prefix_delimiter = delimiter;
        }
        if let Some(prefix) = &self.prefix {
            config.catalog_root_prefix = prefix.clone();
        }
        if let Some(target) = self.target {
            config.target_type = target;
        }
        if self.auto_mark {
            config.auto_mark_missing_as_assets = true;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the planned catalog assignments and record them for apply
    Preview {
        /// Item manifest (JSON)
        #[arg(long)]
        items: PathBuf,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write missing catalogs and assign catalog ids to the manifest's items
    Apply {
        /// Item manifest (JSON), updated in place
        #[arg(long)]
        items: PathBuf,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Restore the catalog index file from its backup
    Restore {
        /// Saved project file, used when no library root is configured
        #[arg(long)]
        project_file: Option<PathBuf>,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Show the resolved library, its catalog file and the preview state
    Status {
        /// Saved project file, used when no library root is configured
        #[arg(long)]
        project_file: Option<PathBuf>,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Preview { .. } => "preview",
            Commands::Apply { .. } => "apply",
            Commands::Restore { .. } => "restore",
            Commands::Status { .. } => "status",
        }
    }
}
