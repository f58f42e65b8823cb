//! Reference filters
//!
//! Decide which asset references are allowed to propagate across a group.

use crate::member::{AssetKind, AssetRef};
use std::collections::HashSet;
use std::fmt::Debug;

/// Predicate over referenced assets
///
/// Only references accepted by the filter are diffed and propagated. A null
/// reference is never offered to the filter.
pub trait ReferenceFilter: Send + Sync + Debug {
    /// Whether `asset` may propagate
    fn accepts(&self, asset: &AssetRef) -> bool;
}

/// Accepts textures and their sub-kinds
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureFilter;

impl ReferenceFilter for TextureFilter {
    #[inline]
    fn accepts(&self, asset: &AssetRef) -> bool {
        asset.kind.is_texture()
    }
}

/// Accepts an explicit set of kinds
#[derive(Debug, Clone, Default)]
pub struct KindFilter {
    kinds: HashSet<AssetKind>,
}

impl KindFilter {
    /// Filter accepting exactly `kinds`
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = AssetKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }
}

impl ReferenceFilter for KindFilter {
    #[inline]
    fn accepts(&self, asset: &AssetRef) -> bool {
        self.kinds.contains(&asset.kind)
    }
}
