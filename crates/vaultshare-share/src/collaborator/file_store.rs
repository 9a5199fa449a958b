//! File-backed permission store.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use vaultshare_core::error::{AppError, ErrorKind};
use vaultshare_core::result::AppResult;

use super::{PermissionStore, SaveRequest};

/// Writes submitted changes to a JSON file instead of a remote API.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Destination of committed requests.
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PermissionStore for JsonFileStore {
    async fn simulate(&self, request: &SaveRequest) -> AppResult<()> {
        // Encoding is the only thing that can fail locally.
        let encoded = serde_json::to_vec(request)?;
        debug!(
            bytes = encoded.len(),
            changes = request.len(),
            "Simulated permission update"
        );
        Ok(())
    }

    async fn update_permissions(&self, request: &SaveRequest) -> AppResult<()> {
        let encoded = serde_json::to_vec_pretty(request)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Io,
                        format!("Failed to create directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }
        fs::write(&self.path, encoded).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to write {}", self.path.display()),
                e,
            )
        })?;

        info!(
            path = %self.path.display(),
            resources = request.resources.len(),
            folders = request.folders.len(),
            "Permission changes written"
        );
        Ok(())
    }
}
