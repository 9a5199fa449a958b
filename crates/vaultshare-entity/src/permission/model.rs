//! Permission entity model.

use serde::{Deserialize, Serialize};

use vaultshare_core::types::{AcoId, AroId, PermissionId};

use super::level::AccessLevel;
use crate::grantee::{AroKind, Grantee};

/// Kind of access control object a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcoKind {
    /// A resource (a stored secret with its metadata).
    Resource,
    /// A folder of resources.
    Folder,
}

impl AcoKind {
    /// Return the kind as the name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resource => "Resource",
            Self::Folder => "Folder",
        }
    }
}

impl std::fmt::Display for AcoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted grant of an access level to a grantee on a resource or folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Identifier of the persisted row (None for grants not yet created).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PermissionId>,
    /// The object this permission applies to.
    pub aco_id: AcoId,
    /// Kind of the object.
    pub aco_kind: AcoKind,
    /// The grantee holding the permission.
    pub aro: Grantee,
    /// The granted level.
    pub level: AccessLevel,
}

impl Permission {
    /// Identifier of the grantee.
    pub fn aro_id(&self) -> AroId {
        self.aro.id()
    }

    /// Kind of the grantee.
    pub fn aro_kind(&self) -> AroKind {
        self.aro.kind()
    }

    /// Check whether this permission makes its grantee an owner.
    pub fn is_owner(&self) -> bool {
        self.level.is_owner()
    }
}
