//! Change entity model.

use serde::{Deserialize, Serialize};

use vaultshare_core::types::{AcoId, AroId, PermissionId};

use crate::grantee::AroKind;
use crate::permission::{AccessLevel, AcoKind, Permission};

/// A pending mutation of one (object, grantee) permission pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// The object the change applies to.
    pub aco_id: AcoId,
    /// Kind of the object.
    pub aco_kind: AcoKind,
    /// The grantee the change applies to.
    pub aro_id: AroId,
    /// Kind of the grantee.
    pub aro_kind: AroKind,
    /// Target level (the original level for deletions).
    pub level: AccessLevel,
    /// No original permission exists for this pair.
    pub is_new: bool,
    /// The original permission is being revoked.
    pub is_delete: bool,
    /// The original permission row being updated or deleted.
    pub permission_id: Option<PermissionId>,
}

impl Change {
    /// A grant on a pair that has no persisted permission.
    pub fn grant(
        aco_id: AcoId,
        aco_kind: AcoKind,
        aro_id: AroId,
        aro_kind: AroKind,
        level: AccessLevel,
    ) -> Self {
        Self {
            aco_id,
            aco_kind,
            aro_id,
            aro_kind,
            level,
            is_new: true,
            is_delete: false,
            permission_id: None,
        }
    }

    /// A level change of a persisted permission.
    pub fn update(original: &Permission, level: AccessLevel) -> Self {
        Self {
            aco_id: original.aco_id,
            aco_kind: original.aco_kind,
            aro_id: original.aro_id(),
            aro_kind: original.aro_kind(),
            level,
            is_new: false,
            is_delete: false,
            permission_id: original.id,
        }
    }

    /// A revocation of a persisted permission.
    pub fn delete(original: &Permission) -> Self {
        Self {
            is_delete: true,
            ..Self::update(original, original.level)
        }
    }

    /// Level held after the change is applied (None when revoked).
    pub fn resulting_level(&self) -> Option<AccessLevel> {
        if self.is_delete {
            None
        } else {
            Some(self.level)
        }
    }

    /// Check whether this change leaves the grantee as an owner.
    pub fn grants_owner(&self) -> bool {
        !self.is_delete && self.level.is_owner()
    }
}
