//! # VaultShare Share
//!
//! The sharing permission reconciliation engine: aggregates the persisted
//! permissions of a batch of resources and folders into one row per
//! grantee, tracks the edits made in a share dialog as a minimal change
//! set, and checks that every object keeps at least one owner before the
//! changes are saved.

pub mod aggregate;
pub mod changes;
pub mod collaborator;
pub mod engine;
pub mod owner_check;
pub mod session;

#[cfg(test)]
mod test_utils;

pub use aggregate::{AggregatedGrant, GrantLevel};
pub use changes::ChangeSet;
pub use collaborator::{GranteeDirectory, JsonFileStore, PermissionStore, SaveRequest, StaticDirectory};
pub use engine::ShareEngine;
pub use owner_check::objects_with_no_owner;
pub use session::{SaveSummary, SessionState, ShareSession};
