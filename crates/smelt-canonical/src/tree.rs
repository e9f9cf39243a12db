use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::encoding;

/// Canonical, serialization-safe form of a loosely typed mapping.
///
/// One bucket per value category; every source key appears in exactly one
/// bucket. Built by the [`Classifier`](crate::Classifier) and never mutated
/// afterwards. Bucket maps are `BTreeMap`s, so iteration (and therefore the
/// flat form) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalTree {
    /// Boolean scalars.
    pub bools: BTreeMap<String, bool>,
    /// Integer scalars.
    pub ints: BTreeMap<String, i64>,
    /// Floating-point scalars.
    pub floats: BTreeMap<String, f64>,
    /// UTC timestamps.
    pub timestamps: BTreeMap<String, DateTime<Utc>>,
    /// Text scalars, including stringified fallback values.
    pub strings: BTreeMap<String, String>,
    /// Binary blobs, including resolved asset references.
    pub blobs: BTreeMap<String, Vec<u8>>,
    /// Nested trees classified from nested mappings.
    pub trees: BTreeMap<String, CanonicalTree>,
    /// Homogeneous boolean arrays.
    pub bool_arrays: BTreeMap<String, Vec<bool>>,
    /// Homogeneous integer arrays.
    pub int_arrays: BTreeMap<String, Vec<i64>>,
    /// Homogeneous floating-point arrays.
    pub float_arrays: BTreeMap<String, Vec<f64>>,
    /// Homogeneous timestamp arrays.
    pub timestamp_arrays: BTreeMap<String, Vec<DateTime<Utc>>>,
    /// Homogeneous text arrays, including the untyped-array placeholder.
    pub string_arrays: BTreeMap<String, Vec<String>>,
    /// Homogeneous blob arrays, including resolved asset-reference arrays.
    pub blob_arrays: BTreeMap<String, Vec<Vec<u8>>>,
    /// Arrays of nested trees classified from arrays of mappings.
    pub tree_arrays: BTreeMap<String, Vec<CanonicalTree>>,
}

impl CanonicalTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of the keys across every bucket.
    ///
    /// Buckets are disjoint by construction, so this equals the source key
    /// set minus any keys omitted for unresolved asset references.
    pub fn keys(&self) -> BTreeSet<&str> {
        let mut keys = BTreeSet::new();
        keys.extend(self.bools.keys().map(String::as_str));
        keys.extend(self.ints.keys().map(String::as_str));
        keys.extend(self.floats.keys().map(String::as_str));
        keys.extend(self.timestamps.keys().map(String::as_str));
        keys.extend(self.strings.keys().map(String::as_str));
        keys.extend(self.blobs.keys().map(String::as_str));
        keys.extend(self.trees.keys().map(String::as_str));
        keys.extend(self.bool_arrays.keys().map(String::as_str));
        keys.extend(self.int_arrays.keys().map(String::as_str));
        keys.extend(self.float_arrays.keys().map(String::as_str));
        keys.extend(self.timestamp_arrays.keys().map(String::as_str));
        keys.extend(self.string_arrays.keys().map(String::as_str));
        keys.extend(self.blob_arrays.keys().map(String::as_str));
        keys.extend(self.tree_arrays.keys().map(String::as_str));
        keys
    }

    /// Number of keys across every bucket.
    pub fn len(&self) -> usize {
        self.bools.len()
            + self.ints.len()
            + self.floats.len()
            + self.timestamps.len()
            + self.strings.len()
            + self.blobs.len()
            + self.trees.len()
            + self.bool_arrays.len()
            + self.int_arrays.len()
            + self.float_arrays.len()
            + self.timestamp_arrays.len()
            + self.string_arrays.len()
            + self.blob_arrays.len()
            + self.tree_arrays.len()
    }

    /// Whether no bucket holds any key.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat, codec-ready view of the tree.
    ///
    /// Booleans, integers, and strings pass through unchanged; timestamps
    /// become epoch-seconds numbers; blobs become base64 text; nested trees
    /// recurse; arrays apply the scalar rule element-wise. Pure and total.
    pub fn flatten(&self) -> Map<String, Value> {
        let mut flat = Map::new();
        for (key, value) in &self.bools {
            flat.insert(key.clone(), Value::Bool(*value));
        }
        for (key, value) in &self.ints {
            flat.insert(key.clone(), Value::from(*value));
        }
        for (key, value) in &self.floats {
            flat.insert(key.clone(), encoding::float_value(*value));
        }
        for (key, value) in &self.timestamps {
            flat.insert(key.clone(), encoding::timestamp_value(value));
        }
        for (key, value) in &self.strings {
            flat.insert(key.clone(), Value::String(value.clone()));
        }
        for (key, value) in &self.blobs {
            flat.insert(key.clone(), Value::String(encoding::encode_blob(value)));
        }
        for (key, value) in &self.trees {
            flat.insert(key.clone(), value.to_value());
        }
        for (key, values) in &self.bool_arrays {
            let items = values.iter().map(|v| Value::Bool(*v)).collect();
            flat.insert(key.clone(), Value::Array(items));
        }
        for (key, values) in &self.int_arrays {
            let items = values.iter().map(|v| Value::from(*v)).collect();
            flat.insert(key.clone(), Value::Array(items));
        }
        for (key, values) in &self.float_arrays {
            let items = values.iter().map(|v| encoding::float_value(*v)).collect();
            flat.insert(key.clone(), Value::Array(items));
        }
        for (key, values) in &self.timestamp_arrays {
            let items = values.iter().map(encoding::timestamp_value).collect();
            flat.insert(key.clone(), Value::Array(items));
        }
        for (key, values) in &self.string_arrays {
            let items = values.iter().map(|v| Value::String(v.clone())).collect();
            flat.insert(key.clone(), Value::Array(items));
        }
        for (key, values) in &self.blob_arrays {
            let items = values
                .iter()
                .map(|v| Value::String(encoding::encode_blob(v)))
                .collect();
            flat.insert(key.clone(), Value::Array(items));
        }
        for (key, values) in &self.tree_arrays {
            let items = values.iter().map(CanonicalTree::to_value).collect();
            flat.insert(key.clone(), Value::Array(items));
        }
        flat
    }

    /// The flat view as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.flatten())
    }
}
