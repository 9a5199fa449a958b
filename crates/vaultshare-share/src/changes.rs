//! Pending permission changes keyed by (object, grantee).

use std::collections::BTreeMap;

use vaultshare_core::types::{AcoId, AroId};
use vaultshare_entity::{AcoKind, Change, PermissionChangePayload};

/// The set of pending changes relative to the persisted permissions.
///
/// Only the latest change per (object, grantee) pair is retained. The
/// persisted permissions themselves are never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: BTreeMap<(AcoId, AroId), Change>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change, replacing any earlier change for the same pair.
    pub fn record(&mut self, change: Change) {
        self.entries.insert((change.aco_id, change.aro_id), change);
    }

    /// Drops every change recorded for a grantee. Returns how many were dropped.
    pub fn discard_for(&mut self, aro_id: AroId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, aro), _| *aro != aro_id);
        before - self.entries.len()
    }

    /// The pending change for a pair, if any.
    pub fn get(&self, aco_id: AcoId, aro_id: AroId) -> Option<&Change> {
        self.entries.get(&(aco_id, aro_id))
    }

    /// Check whether a grantee has any pending change.
    pub fn contains_aro(&self, aro_id: AroId) -> bool {
        self.entries.keys().any(|(_, aro)| *aro == aro_id)
    }

    /// Iterate over the pending changes.
    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.entries.values()
    }

    /// Pending changes on one object.
    pub fn for_aco(&self, aco_id: AcoId) -> impl Iterator<Item = &Change> {
        self.entries
            .range((aco_id, AroId::from_uuid(uuid::Uuid::nil()))..)
            .take_while(move |((aco, _), _)| *aco == aco_id)
            .map(|(_, change)| change)
    }

    /// All pending changes.
    pub fn to_vec(&self) -> Vec<Change> {
        self.entries.values().cloned().collect()
    }

    /// Pending changes on objects of one kind.
    pub fn of_kind(&self, kind: AcoKind) -> Vec<Change> {
        self.iter().filter(|c| c.aco_kind == kind).cloned().collect()
    }

    /// Wire payloads of the pending changes on objects of one kind.
    pub fn payloads(&self, kind: AcoKind) -> Vec<PermissionChangePayload> {
        self.iter()
            .filter(|c| c.aco_kind == kind)
            .map(PermissionChangePayload::from)
            .collect()
    }

    /// Number of pending changes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
