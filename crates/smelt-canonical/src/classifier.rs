use crate::asset::{AbsentAssetResolver, AssetResolver};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, NoopDiagnostics};
use crate::tree::CanonicalTree;
use crate::value::{DynamicMap, DynamicValue};

/// Collects the payloads of `$items` when every element carries `$variant`.
macro_rules! homogeneous {
    ($items:expr, $variant:ident) => {{
        let mut values = Vec::with_capacity($items.len());
        let mut uniform = true;
        for item in $items {
            match item {
                DynamicValue::$variant(v) => values.push(v.clone()),
                _ => {
                    uniform = false;
                    break;
                }
            }
        }
        uniform.then_some(values)
    }};
}

/// Buckets loosely typed values into a [`CanonicalTree`].
///
/// Classification is total: every value is given a destination bucket, the
/// worst case being its textual description in the string bucket. The only
/// impure step is asset resolution through the injected [`AssetResolver`];
/// lossy fallbacks report to the injected [`Diagnostics`] observer. Both
/// default to no-ops, and a classifier holds no state of its own, so
/// independent inputs may be classified concurrently.
pub struct Classifier<'a> {
    resolver: &'a dyn AssetResolver,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> Classifier<'a> {
    /// Classifier with no asset resolution and silent diagnostics.
    pub fn new() -> Self {
        Self {
            resolver: &AbsentAssetResolver,
            diagnostics: &NoopDiagnostics,
        }
    }

    /// Replaces the asset resolver.
    pub fn with_resolver(self, resolver: &'a dyn AssetResolver) -> Self {
        Self { resolver, ..self }
    }

    /// Replaces the diagnostics observer.
    pub fn with_diagnostics(self, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { diagnostics, ..self }
    }

    /// Normalizes a loosely typed mapping into a canonical tree.
    ///
    /// Never fails. An empty mapping yields an empty tree; nested mappings
    /// and arrays of mappings are classified recursively through this same
    /// entry point.
    pub fn classify(&self, source: &DynamicMap) -> CanonicalTree {
        let mut tree = CanonicalTree::new();
        for (key, value) in source {
            self.classify_entry(&mut tree, key, value);
        }
        tree
    }

    /// Classifies a bare sequence by wrapping it under a synthetic key.
    pub fn classify_sequence(&self, key: &str, items: &[DynamicValue]) -> CanonicalTree {
        let mut tree = CanonicalTree::new();
        self.classify_entry(&mut tree, key, &DynamicValue::Array(items.to_vec()));
        tree
    }

    fn classify_entry(&self, tree: &mut CanonicalTree, key: &str, value: &DynamicValue) {
        // Enum-like wrappers expose their raw value. One level only: a
        // doubly wrapped value falls through to the unsupported fallback.
        let value = match value {
            DynamicValue::Raw(inner) => inner.as_ref(),
            other => other,
        };

        match value {
            DynamicValue::Bool(v) => {
                tree.bools.insert(key.to_string(), *v);
            }
            DynamicValue::Int(v) => {
                tree.ints.insert(key.to_string(), *v);
            }
            DynamicValue::Float(v) => {
                tree.floats.insert(key.to_string(), *v);
            }
            DynamicValue::Timestamp(v) => {
                tree.timestamps.insert(key.to_string(), *v);
            }
            DynamicValue::Text(v) => {
                tree.strings.insert(key.to_string(), v.clone());
            }
            DynamicValue::Blob(v) => {
                tree.blobs.insert(key.to_string(), v.clone());
            }
            DynamicValue::Asset(asset) => {
                // An unresolvable reference omits the key entirely.
                if let Some(bytes) = self.resolver.resolve(asset) {
                    tree.blobs.insert(key.to_string(), bytes);
                }
            }
            DynamicValue::Map(map) => {
                tree.trees.insert(key.to_string(), self.classify(map));
            }
            DynamicValue::Array(items) => self.classify_array(tree, key, items),
            DynamicValue::Raw(_) | DynamicValue::Opaque(_) => self.fallback(tree, key, value),
        }
    }

    fn classify_array(&self, tree: &mut CanonicalTree, key: &str, items: &[DynamicValue]) {
        if items.is_empty() {
            self.untyped_array(tree, key, items);
        } else if let Some(values) = homogeneous!(items, Bool) {
            tree.bool_arrays.insert(key.to_string(), values);
        } else if let Some(values) = homogeneous!(items, Int) {
            tree.int_arrays.insert(key.to_string(), values);
        } else if let Some(values) = homogeneous!(items, Float) {
            tree.float_arrays.insert(key.to_string(), values);
        } else if let Some(values) = homogeneous!(items, Timestamp) {
            tree.timestamp_arrays.insert(key.to_string(), values);
        } else if let Some(values) = homogeneous!(items, Text) {
            tree.string_arrays.insert(key.to_string(), values);
        } else if let Some(values) = homogeneous!(items, Blob) {
            tree.blob_arrays.insert(key.to_string(), values);
        } else if items
            .iter()
            .all(|item| matches!(item, DynamicValue::Asset(_)))
        {
            // Elements that fail to resolve are dropped; the key stays.
            let values = items
                .iter()
                .filter_map(|item| match item {
                    DynamicValue::Asset(asset) => self.resolver.resolve(asset),
                    _ => None,
                })
                .collect();
            tree.blob_arrays.insert(key.to_string(), values);
        } else if items
            .iter()
            .all(|item| matches!(item, DynamicValue::Map(_)))
        {
            let values = items
                .iter()
                .filter_map(|item| match item {
                    DynamicValue::Map(map) => Some(self.classify(map)),
                    _ => None,
                })
                .collect();
            tree.tree_arrays.insert(key.to_string(), values);
        } else {
            self.untyped_array(tree, key, items);
        }
    }

    fn untyped_array(&self, tree: &mut CanonicalTree, key: &str, items: &[DynamicValue]) {
        // Lossy placeholder: the key held *some* array, contents unknown.
        tree.string_arrays.insert(key.to_string(), Vec::new());
        self.diagnostics.record(Diagnostic {
            key: key.to_string(),
            kind: DiagnosticKind::UntypedArray,
            detail: format!("array of {} values without a common element type", items.len()),
        });
    }

    fn fallback(&self, tree: &mut CanonicalTree, key: &str, value: &DynamicValue) {
        let detail = value.to_string();
        tree.strings.insert(key.to_string(), detail.clone());
        self.diagnostics.record(Diagnostic {
            key: key.to_string(),
            kind: DiagnosticKind::UnsupportedValue,
            detail,
        });
    }
}

impl Default for Classifier<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifies a mapping with the default classifier (no asset resolution,
/// silent diagnostics).
pub fn classify(source: &DynamicMap) -> CanonicalTree {
    Classifier::new().classify(source)
}
