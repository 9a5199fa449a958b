//! Grantee (user or group) domain entities.

use serde::{Deserialize, Serialize};
use std::fmt;

use vaultshare_core::types::AroId;

/// Kind of grantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AroKind {
    /// An individual user.
    User,
    /// A group of users.
    Group,
}

impl AroKind {
    /// Return the kind as the name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Group => "Group",
        }
    }
}

impl fmt::Display for AroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user or group that can receive access to resources and folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Grantee {
    /// An individual user.
    User {
        /// User identifier.
        id: AroId,
        /// Login name.
        username: String,
        /// Profile first name.
        #[serde(default)]
        first_name: String,
        /// Profile last name.
        #[serde(default)]
        last_name: String,
    },
    /// A group of users.
    Group {
        /// Group identifier.
        id: AroId,
        /// Group name.
        name: String,
    },
}

impl Grantee {
    /// Identifier of the grantee.
    pub fn id(&self) -> AroId {
        match self {
            Self::User { id, .. } | Self::Group { id, .. } => *id,
        }
    }

    /// Kind discriminant of the grantee.
    pub fn kind(&self) -> AroKind {
        match self {
            Self::User { .. } => AroKind::User,
            Self::Group { .. } => AroKind::Group,
        }
    }

    /// Name shown in the share dialog.
    ///
    /// Users show their full name, or their username when the profile has
    /// no name at all.
    pub fn display_name(&self) -> String {
        match self {
            Self::User {
                username,
                first_name,
                last_name,
                ..
            } => {
                let full = format!("{first_name} {last_name}");
                let full = full.trim();
                if full.is_empty() {
                    username.clone()
                } else {
                    full.to_string()
                }
            }
            Self::Group { name, .. } => name.clone(),
        }
    }

    /// Check whether the grantee matches a free-text search keyword.
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        let in_name = self.display_name().to_lowercase().contains(&keyword);
        match self {
            Self::User { username, .. } => in_name || username.to_lowercase().contains(&keyword),
            Self::Group { .. } => in_name,
        }
    }
}
