//! Sharing session: one engine per dialog plus the single-flight save guard.
//!
//! Session lifecycle:
//! - `Editing`: edits are accepted.
//! - `Saving`: a save is outstanding; edits and further saves are refused.
//! - `Saved`: the changes were committed; the session is finished.
//!
//! A failed or cancelled save returns to `Editing` with the change set
//! intact so the user can retry.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use vaultshare_core::config::AppConfig;
use vaultshare_core::config::search::SearchConfig;
use vaultshare_core::config::share::ShareConfig;
use vaultshare_core::error::AppError;
use vaultshare_core::result::AppResult;
use vaultshare_core::types::AroId;
use vaultshare_entity::{AccessControlObject, AccessLevel, AcoKind, Grantee};

use crate::aggregate::AggregatedGrant;
use crate::collaborator::{GranteeDirectory, PermissionStore, SaveRequest};
use crate::engine::ShareEngine;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Edits are accepted.
    Editing,
    /// A save is outstanding.
    Saving,
    /// The changes were committed.
    Saved,
}

/// Summary of a committed save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    /// Number of resource changes committed.
    pub resources: usize,
    /// Number of folder changes committed.
    pub folders: usize,
}

/// The state behind one share dialog.
#[derive(Debug)]
pub struct ShareSession {
    /// The change tracker.
    engine: ShareEngine,
    /// Save behavior.
    share: ShareConfig,
    /// Grantee search behavior.
    search: SearchConfig,
    /// Lifecycle state.
    state: SessionState,
}

impl ShareSession {
    /// Creates a session for a batch of objects.
    ///
    /// Fails when the batch is malformed, see [`ShareEngine::new`].
    pub fn new(acos: Vec<AccessControlObject>, config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            engine: ShareEngine::new(acos)?,
            share: config.share.clone(),
            search: config.search.clone(),
            state: SessionState::Editing,
        })
    }

    /// The underlying change tracker.
    pub fn engine(&self) -> &ShareEngine {
        &self.engine
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Aggregated view with pending edits applied.
    pub fn grants(&self) -> Vec<AggregatedGrant> {
        self.engine.grants()
    }

    /// Searches grantees that can still be added.
    ///
    /// Keywords shorter than the configured minimum return nothing without
    /// querying the directory.
    pub async fn search_grantees<D>(&self, directory: &D, keywords: &str) -> AppResult<Vec<Grantee>>
    where
        D: GranteeDirectory + ?Sized,
    {
        let keywords = keywords.trim();
        if keywords.chars().count() < self.search.min_keyword_length {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<Grantee> = directory
            .search(keywords)
            .await?
            .into_iter()
            .filter(|g| !self.engine.is_visible(g.id()))
            .collect();
        candidates.truncate(self.search.max_results);
        Ok(candidates)
    }

    /// Adds a grantee with read access on every object.
    pub fn add_grantee(&mut self, aro: Grantee) -> AppResult<AggregatedGrant> {
        self.ensure_editing()?;
        self.engine.add_grantee(aro)
    }

    /// Sets a grantee's level on every object.
    pub fn set_level(&mut self, aro_id: AroId, level: AccessLevel) -> AppResult<()> {
        self.ensure_editing()?;
        self.engine.set_level(aro_id, level)
    }

    /// Revokes a grantee from every object.
    pub fn remove_grantee(&mut self, aro_id: AroId) -> AppResult<()> {
        self.ensure_editing()?;
        self.engine.remove_grantee(aro_id)
    }

    /// Discards every pending edit.
    pub fn reset(&mut self) -> AppResult<()> {
        self.ensure_editing()?;
        self.engine.reset();
        Ok(())
    }

    /// Names of the objects that would be left without an owner.
    pub fn ownerless_object_names(&self) -> Vec<String> {
        self.engine
            .objects_with_no_owner()
            .iter()
            .map(|aco| aco.name.clone())
            .collect()
    }

    /// Starts a save: checks the owner invariant and locks the session.
    pub fn begin_save(&mut self) -> AppResult<SaveRequest> {
        self.ensure_editing()?;

        let ownerless = self.ownerless_object_names();
        if !ownerless.is_empty() {
            return Err(AppError::validation(format!(
                "Every shared item needs at least one owner: {}",
                ownerless.join(", ")
            )));
        }

        let request = SaveRequest {
            resources: self.engine.payloads(AcoKind::Resource),
            folders: self.engine.payloads(AcoKind::Folder),
        };
        if request.is_empty() {
            return Err(AppError::validation("There are no changes to save"));
        }
        self.state = SessionState::Saving;
        Ok(request)
    }

    /// Finishes a save started with [`ShareSession::begin_save`].
    ///
    /// The collaborator's error is returned unchanged.
    pub fn complete_save(&mut self, result: AppResult<()>) -> AppResult<()> {
        if self.state != SessionState::Saving {
            return Err(AppError::conflict("No save is in progress"));
        }
        match result {
            Ok(()) => {
                self.state = SessionState::Saved;
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Editing;
                Err(e)
            }
        }
    }

    /// Abandons an outstanding save, keeping every pending edit.
    pub fn cancel_save(&mut self) {
        if self.state == SessionState::Saving {
            self.state = SessionState::Editing;
        }
    }

    /// Checks the owner invariant, optionally dry-runs, then commits.
    ///
    /// Dropping the returned future before it completes leaves the session
    /// editable with its change set intact.
    pub async fn save<S>(&mut self, store: &S) -> AppResult<SaveSummary>
    where
        S: PermissionStore + ?Sized,
    {
        let request = self.begin_save()?;
        let simulate = self.share.simulate_before_save;
        let mut guard = InFlight {
            state: &mut self.state,
            committed: false,
        };

        if simulate {
            store.simulate(&request).await.inspect_err(|e| {
                warn!(error = %e, "Simulated permission update rejected");
            })?;
        }
        store.update_permissions(&request).await.inspect_err(|e| {
            warn!(error = %e, "Permission update failed");
        })?;

        guard.commit();

        let summary = SaveSummary {
            resources: request.resources.len(),
            folders: request.folders.len(),
        };
        info!(
            resources = summary.resources,
            folders = summary.folders,
            "Share saved"
        );
        Ok(summary)
    }

    fn ensure_editing(&self) -> AppResult<()> {
        match self.state {
            SessionState::Editing => Ok(()),
            SessionState::Saving => Err(AppError::conflict("A save is already in progress")),
            SessionState::Saved => Err(AppError::conflict("This share has already been saved")),
        }
    }
}

/// Resets `Saving` back to `Editing` unless the save committed.
struct InFlight<'a> {
    state: &'a mut SessionState,
    committed: bool,
}

impl InFlight<'_> {
    fn commit(&mut self) {
        *self.state = SessionState::Saved;
        self.committed = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.committed {
            *self.state = SessionState::Editing;
        }
    }
}
