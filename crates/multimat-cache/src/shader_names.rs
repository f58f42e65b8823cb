//! Read-through cache of selectable shader names

use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

/// Source of every shader name the host knows about
#[cfg_attr(test, mockall::automock)]
pub trait ShaderCatalog: Send + Sync {
    /// All shader names, unfiltered, in catalog order
    fn shader_names(&self) -> Vec<String>;
}

/// Whether a shader name is offered for selection
///
/// Empty names, auto-generated internal sub-shaders (`__`) and hidden shaders
/// are never offered.
#[inline]
#[must_use]
pub fn is_selectable(name: &str) -> bool {
    !name.is_empty() && !name.contains("__") && !name.contains("Hidden")
}

/// Cached, filtered shader name list
///
/// Loaded on first use; reloaded only by [`refresh`](Self::refresh) or by a
/// lookup miss in [`index_of`](Self::index_of).
pub struct ShaderNameCache<C> {
    catalog: C,
    names: RwLock<Option<Arc<[String]>>>,
}

impl<C: Debug> Debug for ShaderNameCache<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderNameCache")
            .field("catalog", &self.catalog)
            .field("loaded", &self.names.read().as_ref().map(|names| names.len()))
            .finish()
    }
}

impl<C: ShaderCatalog> ShaderNameCache<C> {
    /// Wrap `catalog`; nothing is loaded yet
    #[inline]
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            names: RwLock::new(None),
        }
    }

    /// Selectable names, loading them on first call
    pub fn names(&self) -> Arc<[String]> {
        if let Some(names) = self.names.read().as_ref() {
            return Arc::clone(names);
        }
        self.refresh()
    }

    /// Reload from the catalog
    pub fn refresh(&self) -> Arc<[String]> {
        let mut seen = HashSet::new();
        let names: Arc<[String]> = self
            .catalog
            .shader_names()
            .into_iter()
            .filter(|name| is_selectable(name) && seen.insert(name.clone()))
            .collect();
        tracing::debug!(count = names.len(), "refreshed shader names");
        *self.names.write() = Some(Arc::clone(&names));
        names
    }

    /// Position of `name` in the selectable list
    ///
    /// On a miss the list is refreshed once and the lookup retried, so shaders
    /// imported since the last load are found.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        if let Some(index) = self.names().iter().position(|n| n == name) {
            return Some(index);
        }
        if !is_selectable(name) {
            return None;
        }
        self.refresh().iter().position(|n| n == name)
    }

    /// Whether names have been loaded
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.names.read().is_some()
    }

    /// Drop the loaded names; the next access reloads
    #[inline]
    pub fn clear(&self) {
        *self.names.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog_of(names: &'static [&'static str]) -> MockShaderCatalog {
        let mut catalog = MockShaderCatalog::new();
        catalog
            .expect_shader_names()
            .returning(move || names.iter().map(|s| (*s).to_string()).collect());
        catalog
    }

    #[test]
    fn filters_unselectable_names() {
        let cache = ShaderNameCache::new(catalog_of(&[
            "Standard",
            "",
            "Hidden/Internal-Colored",
            "Legacy Shaders/__Sub",
            "Unlit/Color",
            "Standard",
        ]));
        let names: Vec<String> = cache.names().to_vec();
        assert_eq!(names, vec!["Standard".to_string(), "Unlit/Color".to_string()]);
    }

    #[test]
    fn names_load_once() {
        let mut catalog = MockShaderCatalog::new();
        catalog
            .expect_shader_names()
            .times(1)
            .returning(|| vec!["Standard".into()]);
        let cache = ShaderNameCache::new(catalog);

        assert!(!cache.is_loaded());
        cache.names();
        cache.names();
        assert!(cache.is_loaded());
    }

    #[test]
    fn index_of_hits_without_reload() {
        let mut catalog = MockShaderCatalog::new();
        catalog
            .expect_shader_names()
            .times(1)
            .returning(|| vec!["Standard".into(), "Unlit/Color".into()]);
        let cache = ShaderNameCache::new(catalog);

        assert_eq!(cache.index_of("Unlit/Color"), Some(1));
        assert_eq!(cache.index_of("Standard"), Some(0));
    }

    #[test]
    fn index_of_refreshes_once_on_miss() {
        let mut catalog = MockShaderCatalog::new();
        let mut seq = mockall::Sequence::new();
        catalog
            .expect_shader_names()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| vec!["Standard".into()]);
        catalog
            .expect_shader_names()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| vec!["Standard".into(), "Custom/Toon".into()]);
        let cache = ShaderNameCache::new(catalog);

        cache.names();
        assert_eq!(cache.index_of("Custom/Toon"), Some(1));
    }

    #[test]
    fn unselectable_miss_does_not_refresh() {
        let mut catalog = MockShaderCatalog::new();
        catalog
            .expect_shader_names()
            .times(1)
            .returning(|| vec!["Standard".into()]);
        let cache = ShaderNameCache::new(catalog);

        assert_eq!(cache.index_of("Hidden/Blit"), None);
    }

    #[test]
    fn clear_forces_reload() {
        let mut catalog = MockShaderCatalog::new();
        catalog
            .expect_shader_names()
            .times(2)
            .returning(|| vec!["Standard".into()]);
        let cache = ShaderNameCache::new(catalog);

        cache.names();
        cache.clear();
        assert!(!cache.is_loaded());
        cache.names();
    }
}
