//! Batch and edit file loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use vaultshare_core::error::{AppError, ErrorKind};
use vaultshare_core::result::AppResult;
use vaultshare_core::types::AroId;
use vaultshare_entity::{AccessControlObject, AccessLevel, Grantee};
use vaultshare_share::ShareSession;

/// Objects to share plus the users and groups that can be searched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFile {
    /// Resources and folders with their persisted permissions.
    pub acos: Vec<AccessControlObject>,
    /// Searchable grantees.
    #[serde(default)]
    pub directory: Vec<Grantee>,
}

impl BatchFile {
    /// Read a batch file.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let batch: Self = read_json(path).await?;
        debug!(
            path = %path.display(),
            acos = batch.acos.len(),
            directory = batch.directory.len(),
            "Batch loaded"
        );
        Ok(batch)
    }

    /// Look a grantee up in the directory, then among persisted permissions.
    pub fn find_grantee(&self, aro_id: AroId) -> Option<&Grantee> {
        self.directory.iter().find(|g| g.id() == aro_id).or_else(|| {
            self.acos
                .iter()
                .find_map(|aco| aco.permission_for(aro_id))
                .map(|p| &p.aro)
        })
    }
}

/// Kind of edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditOp {
    /// Add a grantee with read access.
    Add,
    /// Set a grantee's level on every object.
    Set,
    /// Revoke a grantee from every object.
    Remove,
}

/// One edit as written in an edits file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edit {
    /// What to do.
    pub op: EditOp,
    /// The grantee to edit.
    pub aro_id: AroId,
    /// Level name or ordinal; required for `set`, optional for `add`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Edit {
    fn level(&self) -> AppResult<Option<AccessLevel>> {
        self.level.as_deref().map(str::parse).transpose()
    }
}

/// Read an edits file.
pub async fn load_edits(path: &Path) -> AppResult<Vec<Edit>> {
    read_json(path).await
}

/// Replay edits against a session, stopping at the first failure.
pub fn apply_edits(session: &mut ShareSession, batch: &BatchFile, edits: &[Edit]) -> AppResult<()> {
    for (index, edit) in edits.iter().enumerate() {
        apply_edit(session, batch, edit).map_err(|e| {
            AppError::new(e.kind, format!("Edit #{}: {}", index + 1, e.message))
        })?;
    }
    Ok(())
}

fn apply_edit(session: &mut ShareSession, batch: &BatchFile, edit: &Edit) -> AppResult<()> {
    match edit.op {
        EditOp::Add => {
            let aro = batch.find_grantee(edit.aro_id).cloned().ok_or_else(|| {
                AppError::not_found(format!("Grantee {} is not in the directory", edit.aro_id))
            })?;
            session.add_grantee(aro)?;
            if let Some(level) = edit.level()? {
                session.set_level(edit.aro_id, level)?;
            }
            Ok(())
        }
        EditOp::Set => {
            let level = edit
                .level()?
                .ok_or_else(|| AppError::validation("A 'set' edit needs a level"))?;
            session.set_level(edit.aro_id, level)
        }
        EditOp::Remove => session.remove_grantee(edit.aro_id),
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Io,
            format!("Failed to read {}", path.display()),
            e,
        )
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Invalid JSON in {}: {}", path.display(), e),
            e,
        )
    })
}
