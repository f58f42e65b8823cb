//! Group shapes and their fingerprints
//!
//! A group's shape is its length plus the identity (or emptiness) of every slot.
//! [`ShapeFingerprint`] condenses it into a 32-byte Blake3 hash so hosts can
//! cheaply tell whether a group changed between two interaction cycles.

use multimat_property::MemberId;
use std::fmt::{self, Display, Formatter};

const EMPTY_SLOT: u8 = 0;
const FILLED_SLOT: u8 = 1;

/// Shape of a group at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GroupShape {
    slots: Vec<Option<MemberId>>,
}

impl GroupShape {
    /// Capture the shape of `slots`
    #[inline]
    #[must_use]
    pub fn of(slots: &[Option<MemberId>]) -> Self {
        Self {
            slots: slots.to_vec(),
        }
    }

    /// Number of slots
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

    /// Slot identities
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Option<MemberId>] {
        &self.slots
    }

    /// Whether `slots` has exactly this shape
    #[inline]
    #[must_use]
    pub fn matches(&self, slots: &[Option<MemberId>]) -> bool {
        self.slots == slots
    }

    /// Blake3 fingerprint of the shape
    #[must_use]
    pub fn fingerprint(&self) -> ShapeFingerprint {
        ShapeFingerprint::of(&self.slots)
    }
}

/// 32-byte Blake3 hash of a group shape
///
/// Equal shapes always have equal fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeFingerprint([u8; 32]);

impl ShapeFingerprint {
    /// Fingerprint `slots` directly
    #[must_use]
    pub fn of(slots: &[Option<MemberId>]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(slots.len() as u64).to_le_bytes());
        for slot in slots {
            match slot {
                Some(member) => {
                    hasher.update(&[FILLED_SLOT]);
                    hasher.update(member.as_bytes());
                }
                None => {
                    hasher.update(&[EMPTY_SLOT]);
                }
            }
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Raw bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ShapeFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_shapes_equal_fingerprints() {
        let (a, b) = (MemberId::new(), MemberId::new());
        let slots = [Some(a), None, Some(b)];
        assert_eq!(ShapeFingerprint::of(&slots), GroupShape::of(&slots).fingerprint());
    }

    #[test]
    fn emptiness_and_order_matter() {
        let (a, b) = (MemberId::new(), MemberId::new());
        let base = ShapeFingerprint::of(&[Some(a), Some(b)]);
        assert_ne!(base, ShapeFingerprint::of(&[Some(b), Some(a)]));
        assert_ne!(base, ShapeFingerprint::of(&[Some(a), None]));
        assert_ne!(base, ShapeFingerprint::of(&[Some(a), Some(b), None]));
        assert_ne!(ShapeFingerprint::of(&[]), ShapeFingerprint::of(&[None]));
    }

    #[test]
    fn fingerprint_display() {
        let fp = ShapeFingerprint::of(&[None]);
        assert_eq!(fp.to_string().len(), 64);
        assert_eq!(fp.short().len(), 16);
        assert!(fp.to_string().starts_with(&fp.short()));
    }

    #[test]
    fn shape_matches() {
        let a = MemberId::new();
        let shape = GroupShape::of(&[Some(a), None]);
        assert!(shape.matches(&[Some(a), None]));
        assert!(!shape.matches(&[Some(a)]));
        assert_eq!(shape.len(), 2);
    }
}
