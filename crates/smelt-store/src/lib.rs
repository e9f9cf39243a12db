//! JSON record persistence facade over the canonical core.
//!
//! This crate provides:
//! - [`FileStore`] for saving, loading, and deleting typed records below a
//!   root directory
//! - locator derivation from explicit names or record type names, with the
//!   conventional `.json` extension appended when absent
//! - the codec boundary: serde_json behind explicit encode/decode entry
//!   points with distinct error kinds
//! - an optional [`Cipher`] seam sealing codec bytes before they reach the
//!   resource
//!
//! Normalized loose data enters through
//! [`FileStore::save_tree`](store::FileStore::save_tree); loading reverses
//! only the codec step and never involves the classifier.
#![deny(missing_docs)]

/// Symmetric sealing seam.
pub mod cipher;
/// The serde_json codec boundary.
pub mod codec;
/// Error types for store operations.
pub mod error;
/// Locator derivation and validation.
pub mod locator;
/// File-backed record store.
pub mod store;

pub use cipher::{Cipher, CipherError};
pub use error::StoreError;
pub use locator::{RecordName, RECORD_EXTENSION};
pub use store::FileStore;
