//! Propagation engine
//!
//! Writes a [`ChangeSet`] into every distinct, non-excluded member of a group.
//! The identity property is synced first, as its own step before any diff is
//! taken. The change set is then staged on every bag and all bags are
//! committed in one batch.

use crate::exclusion::Exclusion;
use crate::report::PropagationReport;
use indexmap::IndexSet;
use multimat_diff::ChangeSet;
use multimat_property::{
    MemberId, PropertyBag, PropertyError, PropertyPath, PropertySource, PropertyValue,
};

/// Default identity property: the shader binding
pub const DEFAULT_IDENTITY_PATH: &str = "m_Shader";

/// Applies change sets to groups
#[derive(Debug, Clone)]
pub struct PropagationEngine {
    identity_path: PropertyPath,
    exclusion: Exclusion,
}

impl Default for PropagationEngine {
    fn default() -> Self {
        Self::new(PropertyPath::single(DEFAULT_IDENTITY_PATH), Exclusion::none())
    }
}

impl PropagationEngine {
    /// Create engine syncing `identity_path` and never writing `exclusion`
    #[inline]
    #[must_use]
    pub fn new(identity_path: PropertyPath, exclusion: Exclusion) -> Self {
        Self {
            identity_path,
            exclusion,
        }
    }

    /// Path of the identity property
    #[inline]
    #[must_use]
    pub fn identity_path(&self) -> &PropertyPath {
        &self.identity_path
    }

    /// Sentinels never written
    #[inline]
    #[must_use]
    pub fn exclusion(&self) -> &Exclusion {
        &self.exclusion
    }

    /// Distinct writable members of a group, first occurrence order
    #[must_use]
    pub fn targets(&self, slots: &[Option<MemberId>]) -> Vec<MemberId> {
        slots
            .iter()
            .flatten()
            .copied()
            .filter(|member| !self.exclusion.is_excluded(*member))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Force every target's identity property to the control's value
    ///
    /// Runs unconditionally and ahead of any diff: members whose schema depends
    /// on their identity must expose the control's schema before a reference is
    /// read or a change set is staged. A control without an identity property
    /// leaves the group as is.
    pub fn sync_identity<S: PropertySource>(
        &self,
        control: &impl PropertyBag,
        slots: &[Option<MemberId>],
        source: &S,
        report: &mut PropagationReport,
    ) {
        match control.get(&self.identity_path) {
            Ok(identity) => {
                let targets = self.targets(slots);
                self.sync_identity_value(&identity, &targets, source, report);
            }
            Err(err) => {
                tracing::debug!(
                    control = %control.member(),
                    %err,
                    "control has no identity property"
                );
            }
        }
    }

    /// Stage `change_set` on every target, then commit all staged bags
    ///
    /// Expects [`sync_identity`](Self::sync_identity) to have run on `report`
    /// first; members it failed are left alone. Absent paths and kind
    /// mismatches skip the (member, path) pair. Open and commit failures leave
    /// that member untouched. Neither stops the pass.
    pub fn apply<S: PropertySource>(
        &self,
        change_set: &ChangeSet,
        control: &impl PropertyBag,
        slots: &[Option<MemberId>],
        source: &S,
        report: &mut PropagationReport,
    ) {
        if change_set.is_empty() {
            return;
        }

        let mut staged = Vec::new();
        for member in self.targets(slots) {
            // Identity sync failed: later writes would target the wrong schema
            if report.has_failed(member) {
                continue;
            }

            let mut bag = match source.open(member) {
                Ok(bag) => bag,
                Err(err) => {
                    report.fail(member, err);
                    continue;
                }
            };

            let mut usable = true;
            for (path, value) in change_set {
                if let Err(err) = bag.set(path, value.clone()) {
                    if err.is_skippable() {
                        report.skip(member, path, err);
                    } else {
                        report.fail(member, err);
                        usable = false;
                        break;
                    }
                }
            }

            if usable {
                staged.push(bag);
            }
        }

        for mut bag in staged {
            let member = bag.member();
            let dirty = bag.is_dirty();
            match bag.commit() {
                Ok(()) if dirty => report.committed.push(member),
                Ok(()) => {}
                Err(err) => report.fail(member, err),
            }
        }

        tracing::info!(
            control = %control.member(),
            properties = change_set.len(),
            committed = report.committed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "propagated change set"
        );
    }

    /// Give `member` a new identity and sync it across the group
    ///
    /// Mirrors picking a new shader on one member: the member is written first,
    /// then every other target follows.
    ///
    /// # Errors
    /// - [`PropagateError::Excluded`] if `member` is a sentinel
    /// - [`PropagateError::Property`] if `member` cannot be opened, lacks the
    ///   identity property, or rejects the commit
    pub fn retarget_identity<S: PropertySource>(
        &self,
        member: MemberId,
        identity: PropertyValue,
        slots: &[Option<MemberId>],
        source: &S,
    ) -> Result<PropagationReport, PropagateError> {
        if self.exclusion.is_excluded(member) {
            return Err(PropagateError::Excluded(member));
        }

        let mut bag = source.open(member)?;
        bag.set(&self.identity_path, identity.clone())?;
        bag.commit()?;

        let targets: Vec<MemberId> = self
            .targets(slots)
            .into_iter()
            .filter(|target| *target != member)
            .collect();

        let mut report = PropagationReport::new();
        report.identity_synced.push(member);
        self.sync_identity_value(&identity, &targets, source, &mut report);
        Ok(report)
    }

    /// Force the identity property of every target to `identity`
    fn sync_identity_value<S: PropertySource>(
        &self,
        identity: &PropertyValue,
        targets: &[MemberId],
        source: &S,
        report: &mut PropagationReport,
    ) {
        for &member in targets {
            let mut bag = match source.open(member) {
                Ok(bag) => bag,
                Err(err) => {
                    report.fail(member, err);
                    continue;
                }
            };

            match bag.set(&self.identity_path, identity.clone()) {
                Ok(()) => {}
                Err(err) if err.is_skippable() => {
                    report.skip(member, &self.identity_path, err);
                    continue;
                }
                Err(err) => {
                    report.fail(member, err);
                    continue;
                }
            }

            match bag.commit() {
                Ok(()) => report.identity_synced.push(member),
                Err(err) => report.fail(member, err),
            }
        }
    }
}

/// Errors aborting a propagation call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropagateError {
    /// Attempted to write a sentinel member
    #[error("member {0} is excluded from writes")]
    Excluded(MemberId),

    /// The member being edited failed
    #[error("property error: {0}")]
    Property(#[from] PropertyError),
}
