//! In-memory grantee directory.

use async_trait::async_trait;

use vaultshare_core::result::AppResult;
use vaultshare_entity::Grantee;

use super::GranteeDirectory;

/// A directory over a fixed list of users and groups.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    grantees: Vec<Grantee>,
}

impl StaticDirectory {
    /// Creates a directory over the given grantees.
    pub fn new(grantees: Vec<Grantee>) -> Self {
        Self { grantees }
    }
}

#[async_trait]
impl GranteeDirectory for StaticDirectory {
    async fn search(&self, keywords: &str) -> AppResult<Vec<Grantee>> {
        let keywords = keywords.trim();
        Ok(self
            .grantees
            .iter()
            .filter(|g| g.matches(keywords))
            .cloned()
            .collect())
    }
}
