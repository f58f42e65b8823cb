//! Ordered, possibly sparse group of members

use indexmap::IndexSet;
use multimat_cache::GroupShape;
use multimat_property::MemberId;
use serde::{Deserialize, Serialize};

/// Ordered list of member slots
///
/// Slots may be empty and a member may appear more than once; propagation
/// treats every distinct member once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group {
    slots: Vec<Option<MemberId>>,
}

impl Group {
    /// Empty group
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Group over existing slots
    #[inline]
    #[must_use]
    pub fn from_slots(slots: Vec<Option<MemberId>>) -> Self {
        Self { slots }
    }

    /// Number of slots, empty ones included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the group has no slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in order
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Option<MemberId>] {
        &self.slots
    }

    /// Member at `index`; `None` for empty or out-of-range slots
    #[inline]
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<MemberId> {
        self.slots.get(index).copied().flatten()
    }

    /// Replace the slot at `index`, returning the previous occupant
    ///
    /// Out-of-range indices are ignored.
    pub fn set_slot(&mut self, index: usize, member: Option<MemberId>) -> Option<MemberId> {
        let slot = self.slots.get_mut(index)?;
        std::mem::replace(slot, member)
    }

    /// Grow or shrink to `len` slots; new slots are empty
    #[inline]
    pub fn resize(&mut self, len: usize) {
        self.slots.resize(len, None);
    }

    /// Append a slot
    #[inline]
    pub fn push(&mut self, member: Option<MemberId>) {
        self.slots.push(member);
    }

    /// Distinct members in first-seen order
    #[must_use]
    pub fn members(&self) -> Vec<MemberId> {
        self.slots
            .iter()
            .flatten()
            .copied()
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether `member` occupies any slot
    #[must_use]
    pub fn contains(&self, member: MemberId) -> bool {
        self.slots.contains(&Some(member))
    }

    /// Current shape, for cache validation and change detection
    #[inline]
    #[must_use]
    pub fn shape(&self) -> GroupShape {
        GroupShape::of(&self.slots)
    }

    /// Append every selected member not already in the group
    ///
    /// Existing slots keep their order and emptiness; duplicates within
    /// `selection` are added once. Returns how many members were appended.
    pub fn merge_selection<I>(&mut self, selection: I) -> usize
    where
        I: IntoIterator<Item = MemberId>,
    {
        let mut present: IndexSet<MemberId> = self.slots.iter().flatten().copied().collect();
        let before = self.slots.len();
        for member in selection {
            if present.insert(member) {
                self.slots.push(Some(member));
            }
        }
        let added = self.slots.len() - before;
        if added > 0 {
            tracing::debug!(added, len = self.slots.len(), "merged selection into group");
        }
        added
    }
}

impl FromIterator<Option<MemberId>> for Group {
    fn from_iter<I: IntoIterator<Item = Option<MemberId>>>(iter: I) -> Self {
        Self::from_slots(iter.into_iter().collect())
    }
}

impl FromIterator<MemberId> for Group {
    fn from_iter<I: IntoIterator<Item = MemberId>>(iter: I) -> Self {
        Self::from_slots(iter.into_iter().map(Some).collect())
    }
}
