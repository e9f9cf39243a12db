//! Canonical normalization of loosely typed data.
//!
//! Takes open-ended mappings whose values may be booleans, integers, floats,
//! timestamps, text, binary blobs, asset references, nested mappings, or
//! arrays of these, and buckets every value into a [`CanonicalTree`] that a
//! strict JSON codec can serialize. The tree's flat view is the interchange
//! format: a JSON-compatible object whose timestamps are epoch-seconds
//! numbers and whose binary data is base64 text.
//!
//! Classification is total. Shapes with no native bucket degrade to their
//! textual description and are reported through a pluggable [`Diagnostics`]
//! observer rather than failing the operation.
#![deny(missing_docs)]

/// Asset-resolution seam.
pub mod asset;
/// Value classification into canonical buckets.
pub mod classifier;
/// Pluggable diagnostics for lossy fallbacks.
pub mod diagnostics;
/// Per-category encoding rules for the flat form.
pub mod encoding;
/// The canonical tree and its flat, codec-ready view.
pub mod tree;
/// Loosely typed input values.
pub mod value;

pub use asset::{AbsentAssetResolver, AssetResolver, FileAssetResolver};
pub use classifier::{classify, Classifier};
pub use diagnostics::{
    Diagnostic, DiagnosticKind, Diagnostics, LogDiagnostics, MemoryDiagnostics, NoopDiagnostics,
};
pub use encoding::EncodingError;
pub use tree::CanonicalTree;
pub use value::{AssetRef, DynamicMap, DynamicValue};
