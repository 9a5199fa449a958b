//! Wire shape of a change sent to the persistence API.

use serde::{Deserialize, Serialize};

use vaultshare_core::types::{AcoId, AroId, PermissionId};

use super::model::Change;
use crate::grantee::AroKind;
use crate::permission::{AccessLevel, AcoKind};

/// One permission change as submitted to the persistence API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionChangePayload {
    /// No original permission exists for this pair.
    pub is_new: bool,
    /// Grantee kind.
    pub aro: AroKind,
    /// Grantee identifier.
    pub aro_foreign_key: AroId,
    /// Object kind.
    pub aco: AcoKind,
    /// Object identifier.
    pub aco_foreign_key: AcoId,
    /// Level ordinal.
    #[serde(rename = "type")]
    pub level: AccessLevel,
    /// Present and true when the permission is revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    /// Original permission row id, for updates and deletions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PermissionId>,
}

impl From<&Change> for PermissionChangePayload {
    fn from(change: &Change) -> Self {
        Self {
            is_new: change.is_new,
            aro: change.aro_kind,
            aro_foreign_key: change.aro_id,
            aco: change.aco_kind,
            aco_foreign_key: change.aco_id,
            level: change.level,
            delete: change.is_delete.then_some(true),
            id: change.permission_id,
        }
    }
}
