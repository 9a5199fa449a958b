//! Aggregation of per-object permissions into one row per grantee.
//!
//! Aggregation rules:
//! - A grantee is uniform only when it holds a permission on every object
//!   in the batch and all of them carry the same level.
//! - Partial coverage always yields `Varies`, even when the present
//!   permissions agree.
//! - A `Varies` row lists, per level bucket, the names of the objects the
//!   grantee holds that level on ("no access" included).

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use vaultshare_core::types::AroId;
use vaultshare_entity::{AccessBucket, AccessControlObject, AccessLevel, Grantee, Permission};

/// Level of a grantee across the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantLevel {
    /// Same explicit level on every object.
    Uniform(AccessLevel),
    /// Missing on some object, or differing levels.
    Varies,
}

impl GrantLevel {
    /// Check whether the level differs across the batch.
    pub fn is_varies(&self) -> bool {
        matches!(self, Self::Varies)
    }
}

impl std::fmt::Display for GrantLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniform(level) => write!(f, "{level}"),
            Self::Varies => write!(f, "varies"),
        }
    }
}

/// A grantee's access across every object of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedGrant {
    /// The grantee.
    pub aro: Grantee,
    /// Common level, or `Varies`.
    pub level: GrantLevel,
    /// Persisted permissions of the grantee within the batch.
    pub source_permissions: Vec<Permission>,
    /// Object names per level bucket (only populated when `Varies`).
    pub varies_breakdown: BTreeMap<AccessBucket, Vec<String>>,
    /// Whether the grantee has unsaved changes.
    pub has_pending_change: bool,
}

/// Builds the aggregated view of the persisted permissions of a batch.
///
/// Rows are sorted by display name, case-insensitively, with the grantee
/// id as tie-breaker.
pub fn build(acos: &[AccessControlObject]) -> Vec<AggregatedGrant> {
    let grantees = distinct_grantees(acos);
    let mut grants: Vec<AggregatedGrant> = grantees
        .iter()
        .map(|aro| aggregate_grantee(acos, aro, |aco| aco.level_for(aro.id())))
        .collect();
    sort_grants(&mut grants);
    grants
}

/// Union of the grantees referenced by any persisted permission, in
/// first-seen order.
pub fn distinct_grantees(acos: &[AccessControlObject]) -> Vec<Grantee> {
    let mut seen: HashSet<AroId> = HashSet::new();
    acos.iter()
        .flat_map(|aco| aco.permissions.iter())
        .filter(|p| seen.insert(p.aro_id()))
        .map(|p| p.aro.clone())
        .collect()
}

/// Aggregates one grantee given its level on each object.
pub(crate) fn aggregate_grantee<F>(
    acos: &[AccessControlObject],
    aro: &Grantee,
    level_of: F,
) -> AggregatedGrant
where
    F: Fn(&AccessControlObject) -> Option<AccessLevel>,
{
    let levels: Vec<(&AccessControlObject, Option<AccessLevel>)> =
        acos.iter().map(|aco| (aco, level_of(aco))).collect();

    let granted: Vec<AccessLevel> = levels.iter().filter_map(|(_, level)| *level).collect();
    let level = match granted.first() {
        Some(first) if granted.len() == acos.len() && granted.iter().all(|l| l == first) => {
            GrantLevel::Uniform(*first)
        }
        _ => GrantLevel::Varies,
    };

    let mut varies_breakdown: BTreeMap<AccessBucket, Vec<String>> = BTreeMap::new();
    if level.is_varies() {
        for (aco, aco_level) in &levels {
            varies_breakdown
                .entry(AccessBucket::from(*aco_level))
                .or_default()
                .push(aco.name.clone());
        }
    }

    let source_permissions = acos
        .iter()
        .filter_map(|aco| aco.permission_for(aro.id()))
        .cloned()
        .collect();

    AggregatedGrant {
        aro: aro.clone(),
        level,
        source_permissions,
        varies_breakdown,
        has_pending_change: false,
    }
}

/// Sorts rows by lowercase display name, then id.
pub(crate) fn sort_grants(grants: &mut [AggregatedGrant]) {
    grants.sort_by_cached_key(|g| (g.aro.display_name().to_lowercase(), g.aro.id()));
}
