//! # vaultshare-entity
//!
//! Domain entity models for VaultShare. Every struct in this crate is a
//! plain value object describing the sharing state: the objects being
//! shared, the grantees receiving access, the persisted permissions, and
//! the pending changes. All entities derive `Debug`, `Clone`, `Serialize`
//! and `Deserialize`.

pub mod aco;
pub mod change;
pub mod grantee;
pub mod permission;

pub use aco::AccessControlObject;
pub use change::{Change, PermissionChangePayload};
pub use grantee::{AroKind, Grantee};
pub use permission::{AccessBucket, AccessLevel, AcoKind, Permission};
