//! Sharing session configuration.

use serde::{Deserialize, Serialize};

/// Settings for a sharing session and its save step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Run the persistence collaborator's dry-run before committing.
    #[serde(default)]
    pub simulate_before_save: bool,
}
