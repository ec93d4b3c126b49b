//! Error types for the stockin-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the stockin library.
#[derive(Error, Debug)]
pub enum StockinError {
    /// The input source or supplier selector was rejected.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// The persistence collaborator failed to store or commit records.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// I/O error while streaming an already opened source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised before any record is emitted.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input path does not point at a regular file.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input file exists but could not be opened.
    #[error("cannot open file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The supplier selector names no known feed format.
    #[error("unknown supplier: {0}")]
    UnknownSupplier(String),
}

/// Errors raised by a [`StockStore`](crate::store::StockStore).
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A record could not be written.
    #[error("failed to save record {external_id}: {reason}")]
    Write { external_id: String, reason: String },

    /// The end-of-batch commit failed.
    #[error("failed to commit batch: {0}")]
    Commit(String),
}

/// Result type for the stockin library.
pub type Result<T> = std::result::Result<T, StockinError>;
