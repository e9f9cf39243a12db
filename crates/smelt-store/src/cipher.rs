//! Symmetric sealing seam around the codec.

use thiserror::Error;

/// Errors raised by a cipher implementation.
#[derive(Error, Debug)]
pub enum CipherError {
    /// Sealing the plaintext failed.
    #[error("cannot seal payload: {0}")]
    Seal(String),
    /// Opening the sealed payload failed (wrong key, corrupt data).
    #[error("cannot open payload: {0}")]
    Open(String),
}

/// Symmetric transformation applied to codec bytes before they reach the
/// resource, and reversed after they are read back.
///
/// Concrete ciphers live outside this crate; the store only sequences the
/// calls around encode and decode.
pub trait Cipher {
    /// Transforms plaintext codec bytes into their stored form.
    fn seal(&self, plain: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Reverses [`Cipher::seal`].
    fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, CipherError>;
}
