//! File-backed record store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info};

use smelt_canonical::CanonicalTree;

use crate::cipher::Cipher;
use crate::codec;
use crate::error::StoreError;
use crate::locator::RecordName;

/// Stores JSON records below a root directory.
///
/// Locators derive from an explicit name or from the record's type name,
/// with the `.json` extension appended when absent. Writes are plain
/// filesystem writes with no atomicity guarantee; concurrent access
/// discipline is the caller's concern.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at the given directory. The directory must exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Saves a record under its type-derived name, returning the written path.
    pub fn save<T: Serialize>(&self, record: &T) -> Result<PathBuf, StoreError> {
        self.save_named(record, &RecordName::for_type::<T>()?)
    }

    /// Saves a record under an explicit name, returning the written path.
    pub fn save_as<T: Serialize>(&self, record: &T, name: &str) -> Result<PathBuf, StoreError> {
        self.save_named(record, &RecordName::parse(name)?)
    }

    /// Saves the flat form of a canonical tree under an explicit name.
    ///
    /// This is the write path for normalized loose data: flatten, encode,
    /// write. Loading reverses only the codec step.
    pub fn save_tree(&self, tree: &CanonicalTree, name: &str) -> Result<PathBuf, StoreError> {
        let name = RecordName::parse(name)?;
        let bytes = codec::encode_vec(&tree.to_value())?;
        self.write_bytes(&bytes, &name)
    }

    /// Loads the record stored under the type-derived name.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        self.load_named(&RecordName::for_type::<T>()?)
    }

    /// Loads the record stored under an explicit name.
    pub fn load_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, StoreError> {
        self.load_named(&RecordName::parse(name)?)
    }

    /// Whether a record exists under the given name.
    pub fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(RecordName::parse(name)?.path_in(&self.root).is_file())
    }

    /// Deletes the record stored under the type-derived name.
    pub fn delete<T>(&self) -> Result<(), StoreError> {
        self.delete_named(&RecordName::for_type::<T>()?)
    }

    /// Deletes the record stored under an explicit name.
    pub fn delete_as(&self, name: &str) -> Result<(), StoreError> {
        self.delete_named(&RecordName::parse(name)?)
    }

    /// Saves a record with its codec bytes sealed by the cipher.
    pub fn save_sealed<T: Serialize>(
        &self,
        record: &T,
        name: &str,
        cipher: &dyn Cipher,
    ) -> Result<PathBuf, StoreError> {
        let name = RecordName::parse(name)?;
        let plain = codec::encode_vec(record)?;
        let sealed = cipher.seal(&plain)?;
        self.write_bytes(&sealed, &name)
    }

    /// Loads a record whose stored bytes were sealed by the cipher.
    pub fn load_sealed<T: DeserializeOwned>(
        &self,
        name: &str,
        cipher: &dyn Cipher,
    ) -> Result<T, StoreError> {
        let name = RecordName::parse(name)?;
        let sealed = self.read_bytes(&name)?;
        let plain = cipher.open(&sealed)?;
        codec::decode_slice(&plain)
    }

    fn save_named<T: Serialize>(
        &self,
        record: &T,
        name: &RecordName,
    ) -> Result<PathBuf, StoreError> {
        let bytes = codec::encode_vec(record)?;
        self.write_bytes(&bytes, name)
    }

    fn load_named<T: DeserializeOwned>(&self, name: &RecordName) -> Result<T, StoreError> {
        let bytes = self.read_bytes(name)?;
        codec::decode_slice(&bytes)
    }

    fn write_bytes(&self, bytes: &[u8], name: &RecordName) -> Result<PathBuf, StoreError> {
        let path = name.path_in(&self.root);
        match fs::write(&path, bytes) {
            Ok(()) => {
                info!(path = %path.display(), bytes = bytes.len(), "record saved");
                Ok(path)
            }
            Err(source) => {
                error!(path = %path.display(), %source, "cannot save record");
                Err(StoreError::Write { path, source })
            }
        }
    }

    fn read_bytes(&self, name: &RecordName) -> Result<Vec<u8>, StoreError> {
        let path = name.path_in(&self.root);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(source) if source.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(path))
            }
            Err(source) => {
                error!(path = %path.display(), %source, "cannot read record");
                Err(StoreError::Read { path, source })
            }
        }
    }

    fn delete_named(&self, name: &RecordName) -> Result<(), StoreError> {
        let path = name.path_in(&self.root);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "record deleted");
                Ok(())
            }
            Err(source) if source.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(path))
            }
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }
}
