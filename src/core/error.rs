use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid root {}: {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Cannot read metadata for {}: {source}", .path.display())]
    MetadataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction failed for {}: {message}", .path.display())]
    Extraction { path: PathBuf, message: String },

    #[error("Failed to write cache record {}: {source}", .path.display())]
    EncodeWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read cache record {}: {source}", .path.display())]
    DecodeRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
