//! In-memory record store
//!
//! [`RecordStore`] keeps one [`PropertyRecord`] per member and hands out
//! [`StagedBag`]s that copy the record on open and write it back on commit.

use crate::bag::{PropertyBag, PropertyError, PropertySource};
use crate::member::MemberId;
use crate::path::PropertyPath;
use crate::value::PropertyValue;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered set of named, typed properties
///
/// Insertion order is the traversal order reported by bags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyRecord {
    properties: IndexMap<PropertyPath, PropertyValue>,
}

impl PropertyRecord {
    /// Create empty record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[inline]
    #[must_use]
    pub fn with(mut self, path: PropertyPath, value: impl Into<PropertyValue>) -> Self {
        self.insert(path, value.into());
        self
    }

    /// Insert or replace a property, returning the previous value
    #[inline]
    pub fn insert(&mut self, path: PropertyPath, value: PropertyValue) -> Option<PropertyValue> {
        self.properties.insert(path, value)
    }

    /// Value at `path`
    #[inline]
    #[must_use]
    pub fn get(&self, path: &PropertyPath) -> Option<&PropertyValue> {
        self.properties.get(path)
    }

    /// Whether the record has a property at `path`
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &PropertyPath) -> bool {
        self.properties.contains_key(path)
    }

    /// Property paths in traversal order
    #[inline]
    pub fn paths(&self) -> impl Iterator<Item = &PropertyPath> {
        self.properties.keys()
    }

    /// Properties in traversal order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyPath, &PropertyValue)> {
        self.properties.iter()
    }

    /// Number of properties
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the record is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Whether both records hold the same paths in the same order with
    /// [`same_as`](PropertyValue::same_as) values
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((pa, va), (pb, vb))| pa == pb && va.same_as(vb))
    }
}

impl FromIterator<(PropertyPath, PropertyValue)> for PropertyRecord {
    fn from_iter<I: IntoIterator<Item = (PropertyPath, PropertyValue)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug)]
struct StoredRecord {
    record: PropertyRecord,
    read_only: bool,
}

/// Shared, thread-safe store of member records
///
/// Cloning is cheap; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    inner: Arc<RwLock<HashMap<MemberId, StoredRecord>>>,
}

impl RecordStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record under a fresh member identity
    pub fn insert(&self, record: PropertyRecord) -> MemberId {
        let member = MemberId::new();
        self.insert_with_id(member, record);
        member
    }

    /// Add or replace the record of `member`
    pub fn insert_with_id(&self, member: MemberId, record: PropertyRecord) {
        self.inner.write().insert(
            member,
            StoredRecord {
                record,
                read_only: false,
            },
        );
    }

    /// Remove a member, returning its record
    pub fn remove(&self, member: MemberId) -> Option<PropertyRecord> {
        self.inner.write().remove(&member).map(|stored| stored.record)
    }

    /// Whether the store knows `member`
    #[must_use]
    pub fn contains(&self, member: MemberId) -> bool {
        self.inner.read().contains_key(&member)
    }

    /// Copy of the committed record of `member`
    #[must_use]
    pub fn snapshot(&self, member: MemberId) -> Option<PropertyRecord> {
        self.inner.read().get(&member).map(|stored| stored.record.clone())
    }

    /// Committed value of one property
    #[must_use]
    pub fn value(&self, member: MemberId, path: &PropertyPath) -> Option<PropertyValue> {
        self.inner
            .read()
            .get(&member)
            .and_then(|stored| stored.record.get(path).cloned())
    }

    /// Mark a member as locked against writes
    ///
    /// Commits to a read-only member fail and leave the record unchanged.
    pub fn set_read_only(&self, member: MemberId, read_only: bool) {
        if let Some(stored) = self.inner.write().get_mut(&member) {
            stored.read_only = read_only;
        }
    }

    /// Number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    fn write_back(
        &self,
        member: MemberId,
        snapshot: &PropertyRecord,
        staged: &PropertyRecord,
    ) -> Result<usize, PropertyError> {
        let mut guard = self.inner.write();
        let stored = guard
            .get_mut(&member)
            .ok_or_else(|| PropertyError::commit_failed(member, "member no longer exists"))?;

        if stored.read_only {
            return Err(PropertyError::commit_failed(member, "member is read-only"));
        }

        // Validate every change before writing any of them
        let changes: Vec<(&PropertyPath, &PropertyValue)> = staged
            .iter()
            .filter(|(path, value)| !snapshot.get(path).is_some_and(|old| old.same_as(value)))
            .collect();

        for (path, value) in &changes {
            match stored.record.get(path) {
                Some(current) if current.kind() == value.kind() => {}
                Some(_) => {
                    return Err(PropertyError::commit_failed(
                        member,
                        format!("schema changed at '{path}'"),
                    ))
                }
                None => {
                    return Err(PropertyError::commit_failed(
                        member,
                        format!("property '{path}' was removed"),
                    ))
                }
            }
        }

        for (path, value) in &changes {
            stored.record.insert((*path).clone(), (*value).clone());
        }

        Ok(changes.len())
    }
}

impl PropertySource for RecordStore {
    type Bag = StagedBag;

    fn open(&self, member: MemberId) -> Result<StagedBag, PropertyError> {
        let snapshot = self.snapshot(member).ok_or(PropertyError::NotFound(member))?;
        Ok(StagedBag {
            member,
            store: self.clone(),
            staged: snapshot.clone(),
            snapshot,
        })
    }
}

/// Bag over one record of a [`RecordStore`]
///
/// Holds the record as opened plus a staging copy. Commit writes only the
/// properties that changed, under a single store lock.
#[derive(Debug)]
pub struct StagedBag {
    member: MemberId,
    store: RecordStore,
    snapshot: PropertyRecord,
    staged: PropertyRecord,
}

impl PropertyBag for StagedBag {
    fn member(&self) -> MemberId {
        self.member
    }

    fn paths(&self) -> Vec<PropertyPath> {
        self.staged.paths().cloned().collect()
    }

    fn get(&self, path: &PropertyPath) -> Result<PropertyValue, PropertyError> {
        self.staged
            .get(path)
            .cloned()
            .ok_or_else(|| PropertyError::PathNotFound(path.clone()))
    }

    fn set(&mut self, path: &PropertyPath, value: PropertyValue) -> Result<(), PropertyError> {
        let current = self
            .staged
            .get(path)
            .ok_or_else(|| PropertyError::PathNotFound(path.clone()))?;

        if current.kind() != value.kind() {
            return Err(PropertyError::TypeMismatch {
                path: path.clone(),
                expected: current.kind(),
                actual: value.kind(),
            });
        }

        self.staged.insert(path.clone(), value);
        Ok(())
    }

    fn is_dirty(&self) -> bool {
        !self.staged.same_as(&self.snapshot)
    }

    fn commit(&mut self) -> Result<(), PropertyError> {
        if !self.is_dirty() {
            return Ok(());
        }

        let written = self.store.write_back(self.member, &self.snapshot, &self.staged)?;
        tracing::debug!(member = %self.member, written, "committed staged properties");
        self.snapshot = self.staged.clone();
        Ok(())
    }
}
