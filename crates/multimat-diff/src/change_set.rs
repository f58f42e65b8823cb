//! Change sets
//!
//! A [`ChangeSet`] maps property paths to the control's value. It is built once
//! per propagation cycle and never mutated afterwards.

use indexmap::IndexMap;
use multimat_property::{PropertyPath, PropertyValue};
use serde::Serialize;

/// Properties to overwrite on every target, in control traversal order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    entries: IndexMap<PropertyPath, PropertyValue>,
}

impl ChangeSet {
    /// Empty change set (nothing to propagate)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of properties to overwrite
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to propagate
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Control value for `path`
    #[inline]
    #[must_use]
    pub fn get(&self, path: &PropertyPath) -> Option<&PropertyValue> {
        self.entries.get(path)
    }

    /// Whether `path` will be overwritten
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &PropertyPath) -> bool {
        self.entries.contains_key(path)
    }

    /// Paths in order
    #[inline]
    pub fn paths(&self) -> impl Iterator<Item = &PropertyPath> {
        self.entries.keys()
    }

    /// Entries in order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyPath, &PropertyValue)> {
        self.entries.iter()
    }
}

impl FromIterator<(PropertyPath, PropertyValue)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (PropertyPath, PropertyValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = (&'a PropertyPath, &'a PropertyValue);
    type IntoIter = indexmap::map::Iter<'a, PropertyPath, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
