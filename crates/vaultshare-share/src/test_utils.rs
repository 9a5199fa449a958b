//! Builders for sharing fixtures used by unit tests.

use vaultshare_core::types::{AcoId, AroId, PermissionId};
use vaultshare_entity::{AccessControlObject, AccessLevel, AcoKind, Grantee, Permission};

pub(crate) fn user(first_name: &str, last_name: &str) -> Grantee {
    Grantee::User {
        id: AroId::new(),
        username: format!("{}@example.com", first_name.to_lowercase()),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

pub(crate) fn group(name: &str) -> Grantee {
    Grantee::Group {
        id: AroId::new(),
        name: name.to_string(),
    }
}

/// A persisted permission; the object fields are filled in by
/// [`resource`] and [`folder`].
pub(crate) fn perm(aro: &Grantee, level: AccessLevel) -> Permission {
    Permission {
        id: Some(PermissionId::new()),
        aco_id: AcoId::new(),
        aco_kind: AcoKind::Resource,
        aro: aro.clone(),
        level,
    }
}

pub(crate) fn resource(name: &str, permissions: Vec<Permission>) -> AccessControlObject {
    aco(AcoKind::Resource, name, permissions)
}

pub(crate) fn folder(name: &str, permissions: Vec<Permission>) -> AccessControlObject {
    aco(AcoKind::Folder, name, permissions)
}

fn aco(kind: AcoKind, name: &str, permissions: Vec<Permission>) -> AccessControlObject {
    let id = AcoId::new();
    let permissions = permissions
        .into_iter()
        .map(|p| Permission {
            aco_id: id,
            aco_kind: kind,
            ..p
        })
        .collect();
    AccessControlObject {
        id,
        kind,
        name: name.to_string(),
        permissions,
    }
}
