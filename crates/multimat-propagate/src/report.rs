//! Outcome of a propagation pass

use multimat_property::{MemberId, PropertyError, PropertyPath};

/// A (member, property) pair that was not written
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedProperty {
    /// Member whose bag rejected the value
    pub member: MemberId,
    /// Property that was skipped
    pub path: PropertyPath,
    /// Why (absent path or kind mismatch)
    pub reason: PropertyError,
}

/// A member that could not be opened or committed
#[derive(Debug, Clone, PartialEq)]
pub struct FailedMember {
    /// Member left untouched
    pub member: MemberId,
    /// Open or commit error
    pub error: PropertyError,
}

/// Per-member results of one propagation pass
///
/// Hosts surface `skipped` and `failed` entries as warnings; neither blocks
/// the rest of the group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropagationReport {
    /// Members now carrying the control's identity, whether or not it changed
    pub identity_synced: Vec<MemberId>,
    /// Members the change set actually wrote to; already matching members are
    /// left out
    pub committed: Vec<MemberId>,
    /// Pairs skipped because the member's schema differs
    pub skipped: Vec<SkippedProperty>,
    /// Members left untouched because of an error
    pub failed: Vec<FailedMember>,
}

impl PropagationReport {
    /// Empty report (nothing attempted)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every attempted member committed without skips
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }

    pub(crate) fn skip(&mut self, member: MemberId, path: &PropertyPath, reason: PropertyError) {
        tracing::debug!(%member, %path, %reason, "skipped property");
        self.skipped.push(SkippedProperty {
            member,
            path: path.clone(),
            reason,
        });
    }

    pub(crate) fn fail(&mut self, member: MemberId, error: PropertyError) {
        tracing::warn!(%member, %error, "member left untouched");
        self.failed.push(FailedMember { member, error });
    }

    /// Whether `member` failed during this pass
    #[must_use]
    pub fn has_failed(&self, member: MemberId) -> bool {
        self.failed.iter().any(|f| f.member == member)
    }
}
