use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BakrotError {
    #[error("Not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("IO error at {}: {source}", path.display())]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid backup timestamp: {0}")]
    Parse(String),

    #[error("Retention window must be at least one day, got {0}")]
    InvalidRetention(u32),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BakrotError {
    /// Wraps an I/O error with the path it happened on, mapping `NotFound` kinds
    /// to [`BakrotError::NotFound`].
    pub fn at_path(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            BakrotError::NotFound { path }
        } else {
            BakrotError::PathIo { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, BakrotError>;
