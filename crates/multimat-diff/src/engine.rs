//! Diff engine
//!
//! Compares a control bag against a reference bag (or snapshots the control
//! alone) and produces the [`ChangeSet`] to propagate.

use crate::change_set::ChangeSet;
use multimat_property::{
    PropertyBag, PropertyError, PropertyValue, ReferenceFilter, TextureFilter,
};
use std::sync::Arc;

/// How a change set is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffMode {
    /// Only properties whose control value differs from the reference
    #[default]
    Delta,
    /// Every diffable control property, reference ignored
    SyncAll,
}

impl DiffMode {
    /// Mode for a `sync_all` flag
    #[inline]
    #[must_use]
    pub fn from_sync_all(sync_all: bool) -> Self {
        if sync_all {
            Self::SyncAll
        } else {
            Self::Delta
        }
    }
}

/// Computes change sets from a control and an optional reference
///
/// # Reference values
/// Asset and exposed references are only included when the control holds a
/// non-null reference accepted by the filter. A null reference is never
/// propagated, so diffing never introduces or clears unrelated reference fields.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    filter: Arc<dyn ReferenceFilter>,
}

impl Default for DiffEngine {
    /// Engine propagating texture references only
    fn default() -> Self {
        Self::new(Arc::new(TextureFilter))
    }
}

impl DiffEngine {
    /// Create engine with the given reference filter
    #[inline]
    #[must_use]
    pub fn new(filter: Arc<dyn ReferenceFilter>) -> Self {
        Self { filter }
    }

    /// Compute the change set for `control`
    ///
    /// - [`DiffMode::SyncAll`]: every diffable property of `control`; `reference`
    ///   is ignored
    /// - [`DiffMode::Delta`]: diffable properties present in both bags with the
    ///   same kind whose values differ
    ///
    /// # Errors
    /// - [`DiffError::InvalidArgument`] in delta mode without a reference
    /// - [`DiffError::Property`] if a bag fails with a non-skippable error
    pub fn compute<B: PropertyBag>(
        &self,
        control: &B,
        reference: Option<&B>,
        mode: DiffMode,
    ) -> Result<ChangeSet, DiffError> {
        let reference = match mode {
            DiffMode::SyncAll => None,
            DiffMode::Delta => Some(reference.ok_or_else(|| {
                DiffError::InvalidArgument("delta diff requires a reference member".to_string())
            })?),
        };

        let mut entries = Vec::new();
        for path in control.paths() {
            let Some(value) = skip_absent(control.get(&path))? else {
                continue;
            };

            if !self.is_propagatable(&value) {
                continue;
            }

            match reference {
                None => entries.push((path, value)),
                Some(reference) => {
                    let Some(current) = skip_absent(reference.get(&path))? else {
                        continue;
                    };
                    if current.kind() == value.kind() && !current.same_as(&value) {
                        entries.push((path, value));
                    }
                }
            }
        }

        let change_set: ChangeSet = entries.into_iter().collect();
        tracing::debug!(
            control = %control.member(),
            reference = ?reference.map(|r| r.member()),
            ?mode,
            changed = change_set.len(),
            "computed change set"
        );
        Ok(change_set)
    }

    /// Whether `value` may ever be written to other members
    fn is_propagatable(&self, value: &PropertyValue) -> bool {
        if !value.is_diffable() {
            return false;
        }
        if value.kind().is_reference() {
            return value
                .asset_ref()
                .is_some_and(|asset| self.filter.accepts(asset));
        }
        true
    }
}

/// Treat a missing path or a tag clash as "skip"
fn skip_absent(
    result: Result<PropertyValue, PropertyError>,
) -> Result<Option<PropertyValue>, DiffError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_skippable() => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Errors from diffing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiffError {
    /// Call was malformed; no change set produced
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Bag failure that cannot be skipped
    #[error("property error: {0}")]
    Property(#[from] PropertyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use multimat_property::{
        AssetKind, AssetRef, KindFilter, OpaqueKind, PropertyKind, PropertyRecord,
        PropertySource, RecordStore,
    };
    use multimat_test_utils::{path, MaterialFixture, GLOSSINESS, GRADIENT, MAIN_TEX, SHADER};
    use pretty_assertions::assert_eq;

    fn bags(
        store: &RecordStore,
        control: PropertyRecord,
        reference: PropertyRecord,
    ) -> (multimat_property::StagedBag, multimat_property::StagedBag) {
        let c = store.open(store.insert(control)).unwrap();
        let r = store.open(store.insert(reference)).unwrap();
        (c, r)
    }

    #[test]
    fn identical_records_diff_empty() {
        let fixture = MaterialFixture::new();
        let store = RecordStore::new();
        let (c, r) = bags(&store, fixture.record(), fixture.record());

        let cs = DiffEngine::default().compute(&c, Some(&r), DiffMode::Delta).unwrap();
        assert!(cs.is_empty());
    }

    #[test]
    fn glossiness_scenario() {
        let fixture = MaterialFixture::new();
        let store = RecordStore::new();
        let (c, r) = bags(
            &store,
            fixture.record_with(&[(GLOSSINESS, PropertyValue::Float(0.8))]),
            fixture.record_with(&[(GLOSSINESS, PropertyValue::Float(0.2))]),
        );

        let cs = DiffEngine::default().compute(&c, Some(&r), DiffMode::Delta).unwrap();
        let expected: ChangeSet = [(path(GLOSSINESS), PropertyValue::Float(0.8))]
            .into_iter()
            .collect();
        assert_eq!(cs, expected);
    }

    #[test]
    fn delta_without_reference_is_invalid_argument() {
        let store = RecordStore::new();
        let c = store.open(store.insert(MaterialFixture::new().record())).unwrap();

        let result = DiffEngine::default().compute(&c, None, DiffMode::Delta);
        assert!(matches!(result, Err(DiffError::InvalidArgument(_))));
    }

    #[test]
    fn non_texture_reference_is_omitted() {
        let fixture = MaterialFixture::new();
        let store = RecordStore::new();
        let (c, r) = bags(
            &store,
            fixture.record_with(&[(
                MAIN_TEX,
                PropertyValue::reference(AssetRef::fresh(AssetKind::Mesh)),
            )]),
            fixture.record(),
        );

        let cs = DiffEngine::default().compute(&c, Some(&r), DiffMode::Delta).unwrap();
        assert!(!cs.contains(&path(MAIN_TEX)));
    }

    #[test]
    fn texture_reference_change_is_included() {
        let fixture = MaterialFixture::new();
        let store = RecordStore::new();
        let tex = AssetRef::fresh(AssetKind::Texture2D);
        let (c, r) = bags(
            &store,
            fixture.record_with(&[(MAIN_TEX, PropertyValue::reference(tex.clone()))]),
            fixture.record(),
        );

        let cs = DiffEngine::default().compute(&c, Some(&r), DiffMode::Delta).unwrap();
        assert_eq!(cs.get(&path(MAIN_TEX)), Some(&PropertyValue::reference(tex)));
        assert_eq!(cs.len(), 1);
    }

    #[test]
    fn null_reference_never_propagates() {
        let fixture = MaterialFixture::new();
        let store = RecordStore::new();
        let (c, r) = bags(
            &store,
            fixture.record_with(&[(MAIN_TEX, PropertyValue::AssetReference(None))]),
            fixture.record(),
        );

        let engine = DiffEngine::default();
        assert!(engine.compute(&c, Some(&r), DiffMode::Delta).unwrap().is_empty());
        assert!(!engine
            .compute(&c, None, DiffMode::SyncAll)
            .unwrap()
            .contains(&path(MAIN_TEX)));
    }

    fn exposed(asset: Option<AssetRef>) -> PropertyRecord {
        PropertyRecord::new().with(path("_Detail"), PropertyValue::ExposedReference(asset))
    }

    #[test]
    fn exposed_texture_reference_change_is_included() {
        let store = RecordStore::new();
        let tex = AssetRef::fresh(AssetKind::Texture3D);
        let (c, r) = bags(&store, exposed(Some(tex.clone())), exposed(None));

        let engine = DiffEngine::default();
        let delta = engine.compute(&c, Some(&r), DiffMode::Delta).unwrap();
        assert_eq!(
            delta.get(&path("_Detail")),
            Some(&PropertyValue::ExposedReference(Some(tex)))
        );
        let sync = engine.compute(&c, None, DiffMode::SyncAll).unwrap();
        assert_eq!(sync, delta);
    }

    #[test]
    fn exposed_non_texture_reference_is_omitted() {
        let store = RecordStore::new();
        let (c, r) = bags(
            &store,
            exposed(Some(AssetRef::fresh(AssetKind::Material))),
            exposed(Some(AssetRef::fresh(AssetKind::Texture2D))),
        );

        let engine = DiffEngine::default();
        assert!(engine.compute(&c, Some(&r), DiffMode::Delta).unwrap().is_empty());
        assert!(engine.compute(&c, None, DiffMode::SyncAll).unwrap().is_empty());
    }

    #[test]
    fn exposed_null_reference_never_propagates() {
        let store = RecordStore::new();
        let (c, r) = bags(
            &store,
            exposed(None),
            exposed(Some(AssetRef::fresh(AssetKind::Texture2D))),
        );

        let engine = DiffEngine::default();
        assert!(engine.compute(&c, Some(&r), DiffMode::Delta).unwrap().is_empty());
        assert!(engine.compute(&c, None, DiffMode::SyncAll).unwrap().is_empty());
    }

    #[test]
    fn matching_nan_is_not_a_change() {
        let store = RecordStore::new();
        let record = PropertyRecord::new().with(path("_Cutoff"), f32::NAN);
        let (c, r) = bags(&store, record.clone(), record);

        let cs = DiffEngine::default().compute(&c, Some(&r), DiffMode::Delta).unwrap();
        assert!(cs.is_empty());
    }

    #[test]
    fn sync_all_snapshots_every_diffable_path() {
        let fixture = MaterialFixture::new();
        let store = RecordStore::new();
        let c = store.open(store.insert(fixture.record())).unwrap();

        let cs = DiffEngine::default().compute(&c, None, DiffMode::SyncAll).unwrap();

        // Opaque gradient, shader binding and the null bump map are left out
        assert!(!cs.contains(&path(GRADIENT)));
        assert!(!cs.contains(&path(SHADER)));
        let expected = c
            .paths()
            .into_iter()
            .filter(|p| {
                let v = c.get(p).unwrap();
                let texture = v.asset_ref().is_some_and(|a| a.kind.is_texture());
                v.is_diffable() && (!v.kind().is_reference() || texture)
            })
            .count();
        assert_eq!(cs.len(), expected);
        assert_eq!(cs.get(&path(GLOSSINESS)), Some(&PropertyValue::Float(0.5)));
    }

    #[test]
    fn sync_all_ignores_reference() {
        let fixture = MaterialFixture::new();
        let store = RecordStore::new();
        let (c, r) = bags(&store, fixture.record(), fixture.record());

        let with = DiffEngine::default().compute(&c, Some(&r), DiffMode::SyncAll).unwrap();
        let without = DiffEngine::default().compute(&c, None, DiffMode::SyncAll).unwrap();
        assert_eq!(with, without);
        assert!(!with.is_empty());
    }

    #[test]
    fn absent_and_mismatched_paths_are_skipped() {
        let store = RecordStore::new();
        let (c, r) = bags(
            &store,
            PropertyRecord::new()
                .with(path("_OnlyControl"), 1.0f32)
                .with(path("_Clash"), 1.0f32)
                .with(path("_Shared"), 1.0f32),
            PropertyRecord::new()
                .with(path("_Clash"), PropertyValue::Integer(1))
                .with(path("_Shared"), 2.0f32),
        );

        let cs = DiffEngine::default().compute(&c, Some(&r), DiffMode::Delta).unwrap();
        assert_eq!(cs.paths().collect::<Vec<_>>(), vec![&path("_Shared")]);
    }

    #[test]
    fn opaque_values_never_diff() {
        let store = RecordStore::new();
        let mask = |kind| PropertyRecord::new().with(path("_Mask"), PropertyValue::Opaque(kind));
        let (c, r) = bags(&store, mask(OpaqueKind::LayerMask), mask(OpaqueKind::Generic));
        assert_eq!(
            c.kind_of(&path("_Mask")).unwrap(),
            PropertyKind::Opaque(OpaqueKind::LayerMask)
        );
        let cs = DiffEngine::default().compute(&c, Some(&r), DiffMode::Delta).unwrap();
        assert!(cs.is_empty());
    }

    #[test]
    fn custom_filter_admits_other_kinds() {
        let store = RecordStore::new();
        let mesh = AssetRef::fresh(AssetKind::Mesh);
        let (c, r) = bags(
            &store,
            PropertyRecord::new().with(path("_Mesh"), PropertyValue::reference(mesh.clone())),
            PropertyRecord::new().with(path("_Mesh"), PropertyValue::AssetReference(None)),
        );

        let engine = DiffEngine::new(Arc::new(KindFilter::new([AssetKind::Mesh])));
        let cs = engine.compute(&c, Some(&r), DiffMode::Delta).unwrap();
        assert_eq!(cs.get(&path("_Mesh")), Some(&PropertyValue::reference(mesh)));
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(DiffMode::from_sync_all(true), DiffMode::SyncAll);
        assert_eq!(DiffMode::from_sync_all(false), DiffMode::Delta);
    }
}
