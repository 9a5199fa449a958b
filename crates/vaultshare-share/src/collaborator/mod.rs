//! Collaborators the sharing session talks to: grantee search and
//! permission persistence.
//!
//! Both traits are defined here and implemented by the host application
//! (an HTTP API client in production). [`StaticDirectory`] and
//! [`JsonFileStore`] are local implementations used by the CLI and tests.

pub mod directory;
pub mod file_store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vaultshare_core::result::AppResult;
use vaultshare_entity::{Grantee, PermissionChangePayload};

pub use directory::StaticDirectory;
pub use file_store::JsonFileStore;

/// The changes submitted in one save, split by object kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Changes on resources.
    pub resources: Vec<PermissionChangePayload>,
    /// Changes on folders.
    pub folders: Vec<PermissionChangePayload>,
}

impl SaveRequest {
    /// Total number of changes in the request.
    pub fn len(&self) -> usize {
        self.resources.len() + self.folders.len()
    }

    /// Check whether the request carries no change.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.folders.is_empty()
    }
}

/// Searches users and groups that can be added to a share.
#[async_trait]
pub trait GranteeDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Return the users and groups matching free-text keywords.
    async fn search(&self, keywords: &str) -> AppResult<Vec<Grantee>>;
}

/// Persists permission changes.
///
/// Errors returned here are shown to the user verbatim and leave the
/// session's change set untouched.
#[async_trait]
pub trait PermissionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Apply the changes server-side without committing, surfacing
    /// integrity violations the client cannot detect.
    async fn simulate(&self, request: &SaveRequest) -> AppResult<()>;

    /// Commit the changes.
    async fn update_permissions(&self, request: &SaveRequest) -> AppResult<()>;
}
