//! Shared types used across VaultShare crates.

pub mod id;

pub use id::{AcoId, AroId, PermissionId};
