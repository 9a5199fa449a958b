//! Access control object (resource or folder) entity.

use serde::{Deserialize, Serialize};

use vaultshare_core::types::{AcoId, AroId};

use crate::permission::{AccessLevel, AcoKind, Permission};

/// A resource or folder being shared, with its persisted permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlObject {
    /// Object identifier.
    pub id: AcoId,
    /// Whether this is a resource or a folder.
    pub kind: AcoKind,
    /// Object name shown to the user.
    pub name: String,
    /// Permissions currently persisted for this object.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl AccessControlObject {
    /// Find the persisted permission of a grantee on this object.
    pub fn permission_for(&self, aro_id: AroId) -> Option<&Permission> {
        self.permissions.iter().find(|p| p.aro_id() == aro_id)
    }

    /// Persisted level of a grantee on this object.
    pub fn level_for(&self, aro_id: AroId) -> Option<AccessLevel> {
        self.permission_for(aro_id).map(|p| p.level)
    }

    /// Iterate over the persisted owner permissions.
    pub fn owners(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter().filter(|p| p.is_owner())
    }
}
