//! Owner invariant: every shared object keeps at least one owner.
//!
//! Violations are reported, never raised. The check is stateless and must
//! be re-run after every edit; a non-empty result blocks the save.

use vaultshare_entity::AccessControlObject;

use crate::changes::ChangeSet;

/// Returns the objects that would be left without an owner once the
/// pending changes are applied.
///
/// Algorithm, per object:
/// 1. If a pending change grants owner (and is not a revocation), the
///    object is safe.
/// 2. Otherwise count the persisted owners whose pending change revokes or
///    downgrades them.
/// 3. The object fails when every persisted owner is affected (this
///    includes objects that had no owner to begin with).
pub fn objects_with_no_owner<'a>(
    acos: &'a [AccessControlObject],
    changes: &ChangeSet,
) -> Vec<&'a AccessControlObject> {
    acos.iter()
        .filter(|aco| !has_owner_after(aco, changes))
        .collect()
}

fn has_owner_after(aco: &AccessControlObject, changes: &ChangeSet) -> bool {
    if changes.for_aco(aco.id).any(|c| c.grants_owner()) {
        return true;
    }

    let owners = aco.owners().count();
    let revoked = aco
        .owners()
        .filter(|p| {
            changes
                .get(aco.id, p.aro_id())
                .is_some_and(|c| c.is_delete || !c.level.is_owner())
        })
        .count();

    revoked < owners
}
