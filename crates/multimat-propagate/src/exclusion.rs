//! Sentinel members that propagation must never write

use multimat_property::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Set of member identities excluded from every write
///
/// Typically holds the host's default-valued fallback object, which may show
/// up in a group but must keep its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exclusion {
    members: HashSet<MemberId>,
}

impl Exclusion {
    /// Exclude nothing
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder-style add
    #[inline]
    #[must_use]
    pub fn with(mut self, member: MemberId) -> Self {
        self.members.insert(member);
        self
    }

    /// Add a sentinel
    #[inline]
    pub fn insert(&mut self, member: MemberId) -> bool {
        self.members.insert(member)
    }

    /// Whether `member` must not be written
    #[inline]
    #[must_use]
    pub fn is_excluded(&self, member: MemberId) -> bool {
        self.members.contains(&member)
    }

    /// Number of sentinels
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether nothing is excluded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<MemberId> for Exclusion {
    fn from_iter<I: IntoIterator<Item = MemberId>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}
