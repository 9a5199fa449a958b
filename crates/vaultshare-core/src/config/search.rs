//! Grantee search configuration.

use serde::{Deserialize, Serialize};

/// Settings for the grantee autocomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keywords shorter than this are not sent to the directory.
    #[serde(default = "default_min_keyword_length")]
    pub min_keyword_length: usize,
    /// Maximum number of candidates returned to the caller.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_keyword_length: default_min_keyword_length(),
            max_results: default_max_results(),
        }
    }
}

fn default_min_keyword_length() -> usize {
    3
}

fn default_max_results() -> usize {
    20
}
