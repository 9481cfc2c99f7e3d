use std::path::PathBuf;

use thiserror::Error;

/// Favorites persistence failures
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Could not determine a data directory for favorites")]
    NoDataDir,

    #[error("Failed to read favorites from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Favorites file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize favorites: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write favorites to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
