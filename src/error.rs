use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Run Preview first.")]
    PreviewRequired,

    #[error("Options or target set changed. Run Preview again.")]
    StalePreview,

    #[error("No assignable assets found with current options.")]
    NothingToAssign,

    #[error("Backup not found: {}", .0.display())]
    BackupMissing(PathBuf),

    #[error("Failed to {action} {}: {source}", .path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("State error: {0}")]
    State(String),
}

impl CatalogerError {
    /// Wrap an I/O failure with the path and action that produced it
    pub fn file(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogerError::File {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogerError>;
