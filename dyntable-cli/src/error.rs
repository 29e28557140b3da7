use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid items in {}: {source}", path.display())]
    Items {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Failed to encode render model: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Table(#[from] dyntable_lib::Error),
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
