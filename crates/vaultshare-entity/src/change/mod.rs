//! Pending permission change entities.

pub mod model;
pub mod payload;

pub use model::Change;
pub use payload::PermissionChangePayload;
