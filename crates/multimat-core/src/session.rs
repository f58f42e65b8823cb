//! Per-group editing session
//!
//! Ties the pieces together for one group shown in one host view:
//! - [`prepare`](GroupSession::prepare) keeps per-member auxiliaries in step
//!   with the group and reports whether the view may draw them this cycle
//! - [`control_edited`](GroupSession::control_edited) pushes an edit on one
//!   member to the rest of the group
//! - [`sync_all`](GroupSession::sync_all) forces the whole group to the
//!   control's current state

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::group::Group;
use multimat_cache::{AuxiliaryFactory, GroupCache};
use multimat_diff::{select_reference, DiffEngine, DiffMode};
use multimat_propagate::{PropagationEngine, PropagationReport};
use multimat_property::{MemberId, PropertySource, PropertyValue};
use serde::{Deserialize, Serialize};

/// Phase of the host's interaction cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePhase {
    /// Layout pass; the only phase in which a fresh cache may settle
    Layout,
    /// Repaint pass
    Repaint,
    /// Input or any other event
    Other,
}

impl FramePhase {
    /// Whether this is the layout pass
    #[inline]
    #[must_use]
    pub fn is_layout(self) -> bool {
        matches!(self, Self::Layout)
    }
}

/// Editing session over one group
///
/// Owns the diff and propagation engines plus the auxiliary cache for the
/// group's members. Not shared across threads; the host serializes cycles.
#[derive(Debug)]
pub struct GroupSession<A> {
    config: EngineConfig,
    diff: DiffEngine,
    propagation: PropagationEngine,
    cache: GroupCache<A>,
}

impl<A> GroupSession<A> {
    /// Create a session from configuration
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            diff: config.diff_engine(),
            propagation: config.propagation_engine(),
            cache: GroupCache::new(),
            config,
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Auxiliary cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &GroupCache<A> {
        &self.cache
    }

    /// Mutable auxiliary cache
    #[inline]
    pub fn cache_mut(&mut self) -> &mut GroupCache<A> {
        &mut self.cache
    }

    /// Whether `member` may be edited (sentinels are read-only)
    #[inline]
    #[must_use]
    pub fn is_editable(&self, member: MemberId) -> bool {
        !self.propagation.exclusion().is_excluded(member)
    }

    /// Bring auxiliaries in line with `group` and report readiness
    ///
    /// A cache that already matches is ready in any phase. A cache rebuilt
    /// during this call is ready only if every auxiliary was built and the
    /// host is in its layout pass; otherwise the host skips drawing this cycle
    /// and asks again next cycle.
    pub fn prepare<F>(&mut self, group: &Group, phase: FramePhase, factory: &mut F) -> bool
    where
        F: AuxiliaryFactory<A> + ?Sized,
    {
        if self.cache.validate(group.slots()) {
            return true;
        }

        let valid = self.cache.rebuild(group.slots(), factory);
        let ready = valid && phase.is_layout();
        tracing::debug!(
            slots = group.len(),
            generation = self.cache.generation(),
            valid,
            ?phase,
            ready,
            "prepared group"
        );
        ready
    }

    /// Propagate an edit made on `control` to the rest of `group`
    ///
    /// The control's identity is synced across the group first, so every
    /// member exposes the control's schema. The control is then compared
    /// against the reference member (first other non-sentinel member in group
    /// order) and only differing properties move. Without a reference the
    /// report carries the identity sync alone.
    ///
    /// # Errors
    /// - [`EngineError::ExcludedControl`] if `control` is a sentinel
    /// - [`EngineError::Property`] if the control or reference cannot be opened
    /// - [`EngineError::Diff`] if the control cannot be read
    pub fn control_edited<S: PropertySource>(
        &self,
        control: MemberId,
        group: &Group,
        source: &S,
    ) -> Result<PropagationReport, EngineError> {
        self.ensure_editable(control)?;

        let control_bag = source.open(control)?;
        let mut report = PropagationReport::new();
        self.propagation
            .sync_identity(&control_bag, group.slots(), source, &mut report);

        let exclusion = self.propagation.exclusion();
        let Some(reference) =
            select_reference(group.slots(), control, |member| exclusion.is_excluded(member))
        else {
            tracing::debug!(%control, "no reference member; nothing to propagate");
            return Ok(report);
        };

        // Opened after the identity sync so it reflects the control's schema
        let reference_bag = source.open(reference)?;
        let changes = self
            .diff
            .compute(&control_bag, Some(&reference_bag), DiffMode::Delta)?;

        self.propagation
            .apply(&changes, &control_bag, group.slots(), source, &mut report);
        Ok(report)
    }

    /// Force every member of `group` to the control's full state
    ///
    /// # Errors
    /// - [`EngineError::ExcludedControl`] if `control` is a sentinel
    /// - [`EngineError::Property`] if the control cannot be opened
    /// - [`EngineError::Diff`] if the control cannot be read
    pub fn sync_all<S: PropertySource>(
        &self,
        control: MemberId,
        group: &Group,
        source: &S,
    ) -> Result<PropagationReport, EngineError> {
        self.ensure_editable(control)?;

        let control_bag = source.open(control)?;
        let mut report = PropagationReport::new();
        self.propagation
            .sync_identity(&control_bag, group.slots(), source, &mut report);

        let changes = self.diff.compute(&control_bag, None, DiffMode::SyncAll)?;
        tracing::info!(%control, properties = changes.len(), "syncing group to control");

        self.propagation
            .apply(&changes, &control_bag, group.slots(), source, &mut report);
        Ok(report)
    }

    /// Give `member` a new identity and sync it across `group`
    ///
    /// # Errors
    /// Returns [`EngineError::Propagate`] if `member` is a sentinel or its
    /// identity cannot be written.
    pub fn retarget_identity<S: PropertySource>(
        &self,
        member: MemberId,
        identity: PropertyValue,
        group: &Group,
        source: &S,
    ) -> Result<PropagationReport, EngineError> {
        Ok(self
            .propagation
            .retarget_identity(member, identity, group.slots(), source)?)
    }

    /// Force the next [`prepare`](Self::prepare) to rebuild
    #[inline]
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Release every auxiliary; the session may be prepared again later
    pub fn teardown(&mut self) {
        self.cache.release();
        tracing::debug!("session torn down");
    }

    fn ensure_editable(&self, control: MemberId) -> Result<(), EngineError> {
        if self.is_editable(control) {
            Ok(())
        } else {
            Err(EngineError::ExcludedControl(control))
        }
    }
}

impl<A> Default for GroupSession<A> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
