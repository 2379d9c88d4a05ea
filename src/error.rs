//! Error types shared by the scheduler, the stores and the catalog loader.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Quality rating outside 0-5. The caller should re-prompt.
    #[error("invalid rating {0}: quality must be between 0 and 5")]
    InvalidRating(u8),

    /// The snapshot exists but is not well-formed. Recoverable by backing it up
    /// and starting from an empty mapping.
    #[error("corrupt progress snapshot at {}: {source}", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the snapshot failed. In-memory state is still valid.
    #[error("failed to write {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    StoreRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("review session has no items left")]
    SessionComplete,
}

pub type Result<T> = std::result::Result<T, Error>;
