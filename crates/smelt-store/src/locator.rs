//! Locator derivation for stored records.

use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::StoreError;

/// Conventional extension for stored records.
pub const RECORD_EXTENSION: &str = ".json";

/// Validated name of a stored record.
///
/// Names are restricted to letters, digits, `_`, `-`, and `.`, and must not
/// start with a dot, so a name can never escape the store root or hide the
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordName(String);

impl RecordName {
    /// Parses a validated record name.
    pub fn parse(value: impl Into<String>) -> Result<Self, StoreError> {
        let name = value.into();
        if !Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$")
            .expect("invalid regex")
            .is_match(&name)
        {
            return Err(StoreError::InvalidName(name));
        }
        Ok(Self(name))
    }

    /// Derives the name for a record type: the last path segment of the
    /// type name, with generic arguments stripped.
    pub fn for_type<T: ?Sized>() -> Result<Self, StoreError> {
        let full = std::any::type_name::<T>();
        let base = full.split('<').next().unwrap_or(full);
        let last = base.rsplit("::").next().unwrap_or(base);
        Self::parse(last)
    }

    /// File name with the conventional extension appended when absent.
    pub fn file_name(&self) -> String {
        if self.0.ends_with(RECORD_EXTENSION) {
            self.0.clone()
        } else {
            format!("{}{}", self.0, RECORD_EXTENSION)
        }
    }

    /// Full path of the record below `root`.
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(self.file_name())
    }
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
