use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// String-keyed mapping of loosely typed values, as handed in by callers.
pub type DynamicMap = BTreeMap<String, DynamicValue>;

/// Reference to platform-managed binary content, resolvable to bytes
/// through an [`AssetResolver`](crate::AssetResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Location of the referenced bytes (a local path for file-backed assets).
    pub locator: PathBuf,
}

impl AssetRef {
    /// Creates a reference from any path-like locator.
    pub fn new(locator: impl Into<PathBuf>) -> Self {
        Self {
            locator: locator.into(),
        }
    }
}

/// A loosely typed input value.
///
/// The classifier assigns every variant to exactly one canonical bucket;
/// unrecognized shapes degrade to their textual description rather than
/// being dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Text scalar.
    Text(String),
    /// Raw binary content.
    Blob(Vec<u8>),
    /// Reference to platform-managed binary content.
    Asset(AssetRef),
    /// Nested string-keyed mapping.
    Map(DynamicMap),
    /// Array of arbitrary values. Homogeneity is discovered during
    /// classification, never encoded here.
    Array(Vec<DynamicValue>),
    /// Enum-like wrapper carrying its underlying raw value. The classifier
    /// unwraps exactly one level.
    Raw(Box<DynamicValue>),
    /// A shape with no native representation, carrying its description.
    Opaque(String),
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicValue::Bool(v) => write!(f, "{}", v),
            DynamicValue::Int(v) => write!(f, "{}", v),
            DynamicValue::Float(v) => write!(f, "{}", v),
            DynamicValue::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
            DynamicValue::Text(s) => f.write_str(s),
            DynamicValue::Blob(bytes) => write!(f, "<{} blob bytes>", bytes.len()),
            DynamicValue::Asset(asset) => write!(f, "<asset {}>", asset.locator.display()),
            DynamicValue::Map(map) => write!(f, "<map of {} entries>", map.len()),
            DynamicValue::Array(items) => write!(f, "<array of {} values>", items.len()),
            DynamicValue::Raw(inner) => write!(f, "{}", inner),
            DynamicValue::Opaque(description) => f.write_str(description),
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        DynamicValue::Bool(value)
    }
}

impl From<i64> for DynamicValue {
    fn from(value: i64) -> Self {
        DynamicValue::Int(value)
    }
}

impl From<f64> for DynamicValue {
    fn from(value: f64) -> Self {
        DynamicValue::Float(value)
    }
}

impl From<DateTime<Utc>> for DynamicValue {
    fn from(value: DateTime<Utc>) -> Self {
        DynamicValue::Timestamp(value)
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        DynamicValue::Text(value.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        DynamicValue::Text(value)
    }
}

impl From<Vec<u8>> for DynamicValue {
    fn from(value: Vec<u8>) -> Self {
        DynamicValue::Blob(value)
    }
}

impl From<AssetRef> for DynamicValue {
    fn from(value: AssetRef) -> Self {
        DynamicValue::Asset(value)
    }
}

impl From<DynamicMap> for DynamicValue {
    fn from(value: DynamicMap) -> Self {
        DynamicValue::Map(value)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(value: Vec<DynamicValue>) -> Self {
        DynamicValue::Array(value)
    }
}
