//! Error types for the agenda core.

use std::path::PathBuf;

use thiserror::Error;

/// A date key that is not `YYYY-MM-DD` or names no calendar day.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    #[error("Date key '{0}' must have exactly three numeric parts")]
    Malformed(String),

    #[error("Date key '{0}' is not a calendar date")]
    OutOfRange(String),
}

/// Rejected event input. Nothing is mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Please enter event details")]
    EmptyText,

    #[error("Time '{0}' must be HH:MM")]
    InvalidTime(String),

    #[error(transparent)]
    InvalidDate(#[from] DateKeyError),
}

/// Failure to read or write the key/value store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not read '{key}' from {path}: {source}")]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not save '{key}' to {path}: {source}")]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
