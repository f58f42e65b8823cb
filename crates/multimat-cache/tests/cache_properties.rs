use multimat_cache::{AuxiliaryFactory, CacheError, GroupCache, ShapeFingerprint};
use multimat_property::MemberId;
use proptest::prelude::*;

struct Echo;

impl AuxiliaryFactory<MemberId> for Echo {
    fn build(&mut self, member: MemberId) -> Result<MemberId, CacheError> {
        Ok(member)
    }
}

/// One slot per pick, drawn from `pool`, empty where the flag is false
fn shape_from(pool: &[MemberId], picks: &[(bool, prop::sample::Index)]) -> Vec<Option<MemberId>> {
    picks
        .iter()
        .map(|(filled, index)| filled.then(|| pool[index.index(pool.len())]))
        .collect()
}

fn pick() -> impl Strategy<Value = (bool, prop::sample::Index)> {
    (any::<bool>(), any::<prop::sample::Index>())
}

proptest! {
    #[test]
    fn prop_cache_valid_only_for_its_shape(
        built in prop::collection::vec(pick(), 0..8),
        candidate in prop::collection::vec(pick(), 0..8),
    ) {
        let pool: Vec<MemberId> = (0..4).map(|_| MemberId::new()).collect();
        let built = shape_from(&pool, &built);
        let candidate = shape_from(&pool, &candidate);

        let mut cache = GroupCache::new();
        prop_assert!(cache.rebuild(&built, &mut Echo));
        prop_assert!(cache.validate(&built));
        prop_assert_eq!(cache.validate(&candidate), built == candidate);
        prop_assert_eq!(
            ShapeFingerprint::of(&built) == ShapeFingerprint::of(&candidate),
            built == candidate
        );
    }

    #[test]
    fn prop_rebuild_binds_slot_members(picks in prop::collection::vec(pick(), 0..8)) {
        let pool: Vec<MemberId> = (0..4).map(|_| MemberId::new()).collect();
        let group = shape_from(&pool, &picks);

        let mut cache = GroupCache::new();
        cache.rebuild(&group, &mut Echo);

        for (index, slot) in group.iter().enumerate() {
            prop_assert_eq!(cache.get(index).copied(), *slot);
        }
        prop_assert_eq!(cache.built(), group.iter().flatten().count());
    }
}
