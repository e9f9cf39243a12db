//! Error types for store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur at the codec and persistence boundaries.
///
/// Classification and flattening are infallible; every raisable error in
/// this workspace funnels through one of these kinds. No operation retries:
/// a failure is reported to the caller immediately.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The codec could not serialize the source value.
    #[error("cannot encode record: {0}")]
    Encode(#[source] serde_json::Error),
    /// The bytes do not match the destination structure.
    #[error("cannot decode record: {0}")]
    Decode(#[source] serde_json::Error),
    /// Writing to the destination resource failed.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading from the resource failed.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// No record exists at the locator.
    #[error("no record at {}", .0.display())]
    NotFound(PathBuf),
    /// Malformed record name.
    #[error("invalid record name: '{0}'")]
    InvalidName(String),
    /// Intermediate representation mismatch.
    #[error("conversion failed: {0}")]
    Conversion(String),
    /// The cipher rejected the payload.
    #[error(transparent)]
    Cipher(#[from] crate::cipher::CipherError),
}
