//! Change tracking for one batch of objects being shared together.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use vaultshare_core::error::AppError;
use vaultshare_core::types::{AcoId, AroId};
use vaultshare_entity::{
    AccessControlObject, AccessLevel, AcoKind, Change, Grantee, PermissionChangePayload,
};

use crate::aggregate::{self, AggregatedGrant};
use crate::changes::ChangeSet;
use crate::owner_check;

/// Applies grant, level and revoke edits to a batch of objects and keeps
/// the minimal set of changes relative to the persisted permissions.
///
/// One engine is created per sharing dialog and never reused for another
/// batch. Every operation runs to completion synchronously.
#[derive(Debug, Clone)]
pub struct ShareEngine {
    /// The objects being shared, with their persisted permissions.
    acos: Vec<AccessControlObject>,
    /// Grantees currently shown in the dialog.
    visible: BTreeMap<AroId, Grantee>,
    /// Pending changes.
    changes: ChangeSet,
}

impl ShareEngine {
    /// Creates an engine for a batch; every grantee with a persisted
    /// permission starts visible.
    ///
    /// Fails with a validation error when the batch is empty, lists an
    /// object twice, holds a permission that points at another object, or
    /// lists a grantee twice on one object.
    pub fn new(acos: Vec<AccessControlObject>) -> Result<Self, AppError> {
        validate_batch(&acos)?;
        Ok(Self::from_validated(acos))
    }

    fn from_validated(acos: Vec<AccessControlObject>) -> Self {
        let visible = aggregate::distinct_grantees(&acos)
            .into_iter()
            .map(|aro| (aro.id(), aro))
            .collect();
        Self {
            acos,
            visible,
            changes: ChangeSet::new(),
        }
    }

    /// The objects of the batch.
    pub fn acos(&self) -> &[AccessControlObject] {
        &self.acos
    }

    /// Aggregated view of the persisted permissions, ignoring pending edits.
    pub fn initial_grants(&self) -> Vec<AggregatedGrant> {
        aggregate::build(&self.acos)
    }

    /// Aggregated view of the visible grantees with pending edits applied.
    pub fn grants(&self) -> Vec<AggregatedGrant> {
        let mut grants: Vec<AggregatedGrant> = self
            .visible
            .values()
            .map(|aro| self.aggregate_applied(aro))
            .collect();
        aggregate::sort_grants(&mut grants);
        grants
    }

    /// Aggregated row of one visible grantee with pending edits applied.
    pub fn grant(&self, aro_id: AroId) -> Result<AggregatedGrant, AppError> {
        let aro = self.require_visible(aro_id)?;
        Ok(self.aggregate_applied(aro))
    }

    /// Grantees currently shown, in id order.
    pub fn visible_grantees(&self) -> impl Iterator<Item = &Grantee> {
        self.visible.values()
    }

    /// Check whether a grantee is currently shown.
    pub fn is_visible(&self, aro_id: AroId) -> bool {
        self.visible.contains_key(&aro_id)
    }

    /// Adds a grantee with read access on every object.
    ///
    /// Fails with a conflict when the grantee is already shown; callers are
    /// expected to filter search results first.
    pub fn add_grantee(&mut self, aro: Grantee) -> Result<AggregatedGrant, AppError> {
        let aro_id = aro.id();
        if self.visible.contains_key(&aro_id) {
            return Err(AppError::conflict(format!(
                "Grantee '{}' is already in the share list",
                aro.display_name()
            )));
        }

        self.visible.insert(aro_id, aro.clone());
        self.apply_level(&aro, AccessLevel::Read);

        debug!(
            aro_id = %aro_id,
            aro_kind = %aro.kind(),
            pending = self.changes.len(),
            "Grantee added"
        );

        Ok(self.aggregate_applied(&aro))
    }

    /// Sets the level of a grantee on every object of the batch.
    ///
    /// Pairs already persisted at the target level produce no change.
    /// Calling this twice with the same level is a no-op the second time.
    pub fn set_level(&mut self, aro_id: AroId, level: AccessLevel) -> Result<(), AppError> {
        let aro = self.require_visible(aro_id)?.clone();
        self.apply_level(&aro, level);

        debug!(
            aro_id = %aro_id,
            level = %level,
            pending = self.changes.len(),
            "Grantee level set"
        );

        Ok(())
    }

    /// Revokes a grantee from every object and removes it from the view.
    ///
    /// A grantee added during this session leaves no change behind.
    pub fn remove_grantee(&mut self, aro_id: AroId) -> Result<(), AppError> {
        self.require_visible(aro_id)?;
        self.changes.discard_for(aro_id);

        for aco in &self.acos {
            if let Some(original) = aco.permission_for(aro_id) {
                self.changes.record(Change::delete(original));
            }
        }
        self.visible.remove(&aro_id);

        debug!(
            aro_id = %aro_id,
            pending = self.changes.len(),
            "Grantee removed"
        );

        Ok(())
    }

    /// Discards every pending edit and restores the persisted grantees.
    pub fn reset(&mut self) {
        *self = Self::from_validated(std::mem::take(&mut self.acos));
    }

    /// Check whether a grantee has any pending change.
    pub fn has_pending_change(&self, aro_id: AroId) -> bool {
        self.changes.contains_aro(aro_id)
    }

    /// Check whether anything is pending.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// All pending changes.
    pub fn diff(&self) -> Vec<Change> {
        self.changes.to_vec()
    }

    /// Pending changes on resources.
    pub fn resource_changes(&self) -> Vec<Change> {
        self.changes.of_kind(AcoKind::Resource)
    }

    /// Pending changes on folders.
    pub fn folder_changes(&self) -> Vec<Change> {
        self.changes.of_kind(AcoKind::Folder)
    }

    /// Wire payloads of the pending changes on objects of one kind.
    pub fn payloads(&self, kind: AcoKind) -> Vec<PermissionChangePayload> {
        self.changes.payloads(kind)
    }

    /// Objects that would be left without an owner.
    pub fn objects_with_no_owner(&self) -> Vec<&AccessControlObject> {
        owner_check::objects_with_no_owner(&self.acos, &self.changes)
    }

    fn require_visible(&self, aro_id: AroId) -> Result<&Grantee, AppError> {
        self.visible
            .get(&aro_id)
            .ok_or_else(|| AppError::not_found(format!("Grantee {aro_id} is not in the share list")))
    }

    /// Replaces the grantee's changes with the ones needed to reach `level`
    /// on every object.
    fn apply_level(&mut self, aro: &Grantee, level: AccessLevel) {
        let aro_id = aro.id();
        self.changes.discard_for(aro_id);

        for aco in &self.acos {
            match aco.permission_for(aro_id) {
                Some(original) if original.level == level => {}
                Some(original) => self.changes.record(Change::update(original, level)),
                None => self.changes.record(Change::grant(
                    aco.id,
                    aco.kind,
                    aro_id,
                    aro.kind(),
                    level,
                )),
            }
        }
    }

    fn aggregate_applied(&self, aro: &Grantee) -> AggregatedGrant {
        let aro_id = aro.id();
        let mut grant = aggregate::aggregate_grantee(&self.acos, aro, |aco| {
            match self.changes.get(aco.id, aro_id) {
                Some(change) => change.resulting_level(),
                None => aco.level_for(aro_id),
            }
        });
        grant.has_pending_change = self.changes.contains_aro(aro_id);
        grant
    }
}

fn validate_batch(acos: &[AccessControlObject]) -> Result<(), AppError> {
    if acos.is_empty() {
        return Err(AppError::validation("Nothing to share: the batch is empty"));
    }

    let mut aco_ids: HashSet<AcoId> = HashSet::new();
    for aco in acos {
        if !aco_ids.insert(aco.id) {
            return Err(AppError::validation(format!(
                "'{}' appears more than once in the batch",
                aco.name
            )));
        }

        let mut aro_ids: HashSet<AroId> = HashSet::new();
        for p in &aco.permissions {
            if p.aco_id != aco.id || p.aco_kind != aco.kind {
                return Err(AppError::validation(format!(
                    "Permission of '{}' on '{}' points at another object",
                    p.aro.display_name(),
                    aco.name
                )));
            }
            if !aro_ids.insert(p.aro_id()) {
                return Err(AppError::validation(format!(
                    "'{}' holds more than one permission on '{}'",
                    p.aro.display_name(),
                    aco.name
                )));
            }
        }
    }
    Ok(())
}
