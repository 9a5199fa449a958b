//! Display rows shared by the CLI commands.

use std::collections::HashMap;

use serde::Serialize;
use tabled::Tabled;

use vaultshare_core::types::{AcoId, AroId};
use vaultshare_entity::{Change, Grantee};
use vaultshare_share::{AggregatedGrant, ShareEngine, aggregate};

use crate::output::{self, OutputFormat};

/// Aggregated grant display row
#[derive(Debug, Serialize, Tabled)]
pub struct GrantRow {
    /// Grantee ID
    pub id: String,
    /// Display name
    pub name: String,
    /// User or group
    pub kind: String,
    /// Level across the batch
    pub level: String,
    /// Per-level object names when the level varies
    pub breakdown: String,
    /// Unsaved changes
    pub pending: bool,
}

impl From<&AggregatedGrant> for GrantRow {
    fn from(grant: &AggregatedGrant) -> Self {
        Self {
            id: grant.aro.id().to_string(),
            name: grant.aro.display_name(),
            kind: grant.aro.kind().to_string(),
            level: grant.level.to_string(),
            breakdown: breakdown(grant),
            pending: grant.has_pending_change,
        }
    }
}

fn breakdown(grant: &AggregatedGrant) -> String {
    grant
        .varies_breakdown
        .iter()
        .map(|(bucket, names)| format!("{}: {}", bucket, names.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Pending change display row
#[derive(Debug, Serialize, Tabled)]
pub struct ChangeRow {
    /// Object name
    pub object: String,
    /// Resource or folder
    pub kind: String,
    /// Grantee display name
    pub grantee: String,
    /// grant, update or revoke
    pub action: String,
    /// Target level (the revoked level for revocations)
    pub level: String,
}

/// Grantee display row
#[derive(Debug, Serialize, Tabled)]
pub struct GranteeRow {
    /// Grantee ID
    pub id: String,
    /// Display name
    pub name: String,
    /// User or group
    pub kind: String,
}

impl From<&Grantee> for GranteeRow {
    fn from(aro: &Grantee) -> Self {
        Self {
            id: aro.id().to_string(),
            name: aro.display_name(),
            kind: aro.kind().to_string(),
        }
    }
}

/// Live view, diff and owner check of an edited batch.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    /// Aggregated grants with pending edits applied.
    pub grants: Vec<GrantRow>,
    /// Pending changes.
    pub changes: Vec<ChangeRow>,
    /// Names of objects that would be left without an owner.
    pub ownerless: Vec<String>,
}

impl PlanReport {
    /// Build the report from the engine's current state.
    pub fn from_engine(engine: &ShareEngine) -> Self {
        let objects: HashMap<AcoId, &str> = engine
            .acos()
            .iter()
            .map(|aco| (aco.id, aco.name.as_str()))
            .collect();
        let mut grantees: HashMap<AroId, String> = aggregate::distinct_grantees(engine.acos())
            .iter()
            .map(|aro| (aro.id(), aro.display_name()))
            .collect();
        grantees.extend(engine.visible_grantees().map(|aro| (aro.id(), aro.display_name())));

        let mut changes: Vec<ChangeRow> = engine
            .diff()
            .iter()
            .map(|change| change_row(change, &objects, &grantees))
            .collect();
        changes.sort_by(|a, b| (&a.object, &a.grantee).cmp(&(&b.object, &b.grantee)));

        Self {
            grants: engine.grants().iter().map(GrantRow::from).collect(),
            changes,
            ownerless: engine
                .objects_with_no_owner()
                .iter()
                .map(|aco| aco.name.clone())
                .collect(),
        }
    }

    /// Print the report in the selected format.
    pub fn print(&self, format: OutputFormat) {
        match format {
            OutputFormat::Json => output::print_json(self),
            OutputFormat::Table => {
                output::print_heading("Access");
                output::print_list(&self.grants, format);
                output::print_heading("Changes");
                output::print_list(&self.changes, format);
                println!();
                if self.ownerless.is_empty() {
                    output::print_success("Every object keeps an owner");
                } else {
                    output::print_warning(&format!(
                        "No owner left on: {}",
                        self.ownerless.join(", ")
                    ));
                }
            }
        }
    }
}

fn change_row(
    change: &Change,
    objects: &HashMap<AcoId, &str>,
    grantees: &HashMap<AroId, String>,
) -> ChangeRow {
    let action = if change.is_delete {
        "revoke"
    } else if change.is_new {
        "grant"
    } else {
        "update"
    };
    ChangeRow {
        object: objects
            .get(&change.aco_id)
            .map(|name| name.to_string())
            .unwrap_or_else(|| change.aco_id.to_string()),
        kind: change.aco_kind.to_string(),
        grantee: grantees
            .get(&change.aro_id)
            .cloned()
            .unwrap_or_else(|| change.aro_id.to_string()),
        action: action.to_string(),
        level: change.level.to_string(),
    }
}
