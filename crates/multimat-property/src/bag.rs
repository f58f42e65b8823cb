//! Property bag and source traits
//!
//! A [`PropertySource`] opens a [`PropertyBag`] over one member. The bag stages
//! every `set` in memory; nothing is visible outside the bag until
//! [`PropertyBag::commit`] succeeds.

use crate::member::MemberId;
use crate::path::{PathError, PropertyPath};
use crate::value::{PropertyKind, PropertyValue};

/// Staging handle over the properties of one member
///
/// # Contract
/// - `paths()` is deterministic: two bags of the same schema yield the same order
/// - `get`/`set` only touch the staging copy
/// - `commit()` is all-or-nothing
pub trait PropertyBag {
    /// Member this bag was opened for
    fn member(&self) -> MemberId;

    /// All property paths in traversal order
    fn paths(&self) -> Vec<PropertyPath>;

    /// Current (staged) value at `path`
    ///
    /// # Errors
    /// [`PropertyError::PathNotFound`] if the bag has no such property
    fn get(&self, path: &PropertyPath) -> Result<PropertyValue, PropertyError>;

    /// Stage a new value at `path`
    ///
    /// # Errors
    /// - [`PropertyError::PathNotFound`] if the bag has no such property
    /// - [`PropertyError::TypeMismatch`] if `value` has a different tag than the
    ///   existing property
    fn set(&mut self, path: &PropertyPath, value: PropertyValue) -> Result<(), PropertyError>;

    /// Whether any staged value differs from the opened snapshot
    fn is_dirty(&self) -> bool;

    /// Flush staged values to the member
    ///
    /// # Errors
    /// [`PropertyError::CommitFailed`] if the member can no longer accept the
    /// staged record; no property is changed in that case
    fn commit(&mut self) -> Result<(), PropertyError>;

    /// Kind of the property at `path`
    ///
    /// # Errors
    /// [`PropertyError::PathNotFound`] if the bag has no such property
    fn kind_of(&self, path: &PropertyPath) -> Result<PropertyKind, PropertyError> {
        self.get(path).map(|value| value.kind())
    }
}

/// Opens property bags for members
pub trait PropertySource {
    /// Bag type produced by this source
    type Bag: PropertyBag;

    /// Open a staging bag over `member`
    ///
    /// # Errors
    /// [`PropertyError::NotFound`] if the member is unknown or unreadable
    fn open(&self, member: MemberId) -> Result<Self::Bag, PropertyError>;
}

impl<S: PropertySource + ?Sized> PropertySource for &S {
    type Bag = S::Bag;

    fn open(&self, member: MemberId) -> Result<Self::Bag, PropertyError> {
        (**self).open(member)
    }
}

/// Errors raised by bags and sources
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    /// Member cannot be opened
    #[error("member not found: {0}")]
    NotFound(MemberId),

    /// Property absent on this bag
    #[error("property not found: {0}")]
    PathNotFound(PropertyPath),

    /// Value tag does not match the existing property
    #[error("type mismatch at '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        path: PropertyPath,
        expected: PropertyKind,
        actual: PropertyKind,
    },

    /// Commit rejected; nothing was written
    #[error("commit failed for {member}: {reason}")]
    CommitFailed { member: MemberId, reason: String },

    /// Malformed path
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),
}

impl PropertyError {
    /// Create commit failure for member
    pub fn commit_failed(member: MemberId, reason: impl Into<String>) -> Self {
        Self::CommitFailed {
            member,
            reason: reason.into(),
        }
    }

    /// Whether the error only means "skip this property"
    ///
    /// Heterogeneous schemas are expected, so absent paths and tag mismatches
    /// are never fatal to a propagation pass.
    #[inline]
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::TypeMismatch { .. })
    }
}
