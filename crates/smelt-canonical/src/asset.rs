use std::fs;

use crate::value::AssetRef;

/// Side channel that resolves asset references to their bytes.
///
/// Resolution is a blocking read with no retry. When a reference cannot be
/// resolved, the classifier omits the referencing key.
pub trait AssetResolver {
    /// Returns the referenced bytes, or `None` when the reference cannot be
    /// resolved.
    fn resolve(&self, asset: &AssetRef) -> Option<Vec<u8>>;
}

/// Treats every reference as unresolvable. The default resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct AbsentAssetResolver;

impl AssetResolver for AbsentAssetResolver {
    fn resolve(&self, _asset: &AssetRef) -> Option<Vec<u8>> {
        None
    }
}

/// Resolves references against the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileAssetResolver;

impl AssetResolver for FileAssetResolver {
    fn resolve(&self, asset: &AssetRef) -> Option<Vec<u8>> {
        fs::read(&asset.locator).ok()
    }
}
