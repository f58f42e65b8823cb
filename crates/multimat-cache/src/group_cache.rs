//! Per-member auxiliary cache bound to a group's shape
//!
//! The cache holds one auxiliary object (an editor, a preview, anything costly
//! to construct) per non-empty slot. It is Valid while the group keeps the
//! exact shape it was built for, and Invalid otherwise. Rebuilding is
//! wholesale: every auxiliary is released before any new one is constructed.

use crate::shape::{GroupShape, ShapeFingerprint};
use multimat_property::MemberId;
use thiserror::Error;

/// Errors from auxiliary construction
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    /// The factory could not build an auxiliary for `member`
    #[error("failed to construct auxiliary for {member}: {reason}")]
    ConstructionFailure {
        /// Member the auxiliary was meant for
        member: MemberId,
        /// Factory-provided reason
        reason: String,
    },
}

impl CacheError {
    /// Shorthand for [`CacheError::ConstructionFailure`]
    #[inline]
    #[must_use]
    pub fn construction_failure(member: MemberId, reason: impl Into<String>) -> Self {
        Self::ConstructionFailure {
            member,
            reason: reason.into(),
        }
    }
}

/// Builds the auxiliary object for one member
#[cfg_attr(test, mockall::automock)]
pub trait AuxiliaryFactory<A> {
    /// Construct a fresh auxiliary bound to `member`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConstructionFailure`] when the member cannot back
    /// an auxiliary; its slot stays empty and the cache stays Invalid.
    fn build(&mut self, member: MemberId) -> Result<A, CacheError>;
}

/// Observable cache state for a given group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Slot-for-slot match with the group
    Valid,
    /// Must be rebuilt before use
    Invalid,
}

#[derive(Debug)]
struct Slot<A> {
    bound: MemberId,
    aux: A,
}

/// Arena of auxiliaries, one per group slot
#[derive(Debug)]
pub struct GroupCache<A> {
    slots: Vec<Option<Slot<A>>>,
    generation: u64,
    invalidated: bool,
}

impl<A> Default for GroupCache<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> GroupCache<A> {
    /// Empty cache; Invalid until the first rebuild
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generation: 0,
            invalidated: true,
        }
    }

    /// Whether the cache matches `group` slot for slot
    ///
    /// Pure: same length, same empty pattern, and every filled slot's auxiliary
    /// bound to the member currently in that slot.
    #[must_use]
    pub fn validate(&self, group: &[Option<MemberId>]) -> bool {
        if self.invalidated || self.slots.len() != group.len() {
            return false;
        }
        self.slots
            .iter()
            .zip(group)
            .all(|(cached, member)| match (cached, member) {
                (None, None) => true,
                (Some(slot), Some(member)) => slot.bound == *member,
                _ => false,
            })
    }

    /// [`validate`](Self::validate) as a [`CacheState`]
    #[inline]
    #[must_use]
    pub fn state(&self, group: &[Option<MemberId>]) -> CacheState {
        if self.validate(group) {
            CacheState::Valid
        } else {
            CacheState::Invalid
        }
    }

    /// Force the next [`rebuild`](Self::rebuild) to reconstruct everything
    #[inline]
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Bring the cache in line with `group`
    ///
    /// A Valid cache is left alone. Otherwise every auxiliary is released,
    /// then one is built per non-empty slot. Returns whether the cache is
    /// Valid afterwards; a construction failure leaves its slot empty and the
    /// cache Invalid, so the next call retries.
    pub fn rebuild<F>(&mut self, group: &[Option<MemberId>], factory: &mut F) -> bool
    where
        F: AuxiliaryFactory<A> + ?Sized,
    {
        if self.validate(group) {
            return true;
        }

        self.release();

        let mut failures = 0usize;
        self.slots = group
            .iter()
            .map(|slot| {
                let member = (*slot)?;
                match factory.build(member) {
                    Ok(aux) => Some(Slot { bound: member, aux }),
                    Err(error) => {
                        tracing::warn!(%member, %error, "auxiliary construction failed");
                        failures += 1;
                        None
                    }
                }
            })
            .collect();
        self.generation += 1;
        self.invalidated = false;

        let valid = failures == 0 && self.validate(group);
        tracing::debug!(
            generation = self.generation,
            slots = group.len(),
            built = self.built(),
            failures,
            fingerprint = %ShapeFingerprint::of(group).short(),
            valid,
            "rebuilt group cache"
        );
        valid
    }

    /// Drop every auxiliary and mark the cache Invalid
    pub fn release(&mut self) {
        if !self.slots.is_empty() {
            tracing::debug!(released = self.built(), "releasing auxiliaries");
        }
        self.slots.clear();
        self.invalidated = true;
    }

    /// Number of completed rebuilds
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of slots (filled or not) from the last rebuild
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the cache holds no slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of live auxiliaries
    #[must_use]
    pub fn built(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Auxiliary at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&A> {
        self.slots.get(index)?.as_ref().map(|slot| &slot.aux)
    }

    /// Mutable auxiliary at `index`
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut A> {
        self.slots.get_mut(index)?.as_mut().map(|slot| &mut slot.aux)
    }

    /// Member the auxiliary at `index` is bound to
    #[inline]
    #[must_use]
    pub fn bound(&self, index: usize) -> Option<MemberId> {
        self.slots.get(index)?.as_ref().map(|slot| slot.bound)
    }

    /// Shape of the live auxiliaries (failed slots read as empty)
    #[must_use]
    pub fn shape(&self) -> GroupShape {
        let slots: Vec<Option<MemberId>> = self
            .slots
            .iter()
            .map(|slot| slot.as_ref().map(|s| s.bound))
            .collect();
        GroupShape::of(&slots)
    }

    /// `(index, bound member, auxiliary)` for every live auxiliary
    pub fn iter(&self) -> impl Iterator<Item = (usize, MemberId, &A)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|s| (index, s.bound, &s.aux)))
    }
}
