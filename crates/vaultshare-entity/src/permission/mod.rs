//! Permission domain entities.

pub mod level;
pub mod model;

pub use level::{AccessBucket, AccessLevel};
pub use model::{AcoKind, Permission};
