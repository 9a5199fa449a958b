//! Access level enumeration types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use vaultshare_core::AppError;

/// Permission level granted to a grantee on a resource or folder.
///
/// Ordered by privilege: Owner > Update > Read. On the wire a level is
/// the ordinal used by the server's permission model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum AccessLevel {
    /// Can view and use the object.
    Read,
    /// Can view and modify the object.
    Update,
    /// Full control including sharing and deleting.
    Owner,
}

impl AccessLevel {
    /// All canonical levels, least privileged first.
    pub const ALL: [AccessLevel; 3] = [Self::Read, Self::Update, Self::Owner];

    /// Return the ordinal used by the server's permission model.
    pub fn ordinal(&self) -> i32 {
        match self {
            Self::Read => 1,
            Self::Update => 7,
            Self::Owner => 15,
        }
    }

    /// Decode a server ordinal.
    pub fn from_ordinal(value: i32) -> Result<Self, AppError> {
        match value {
            1 => Ok(Self::Read),
            7 => Ok(Self::Update),
            15 => Ok(Self::Owner),
            _ => Err(AppError::validation(format!(
                "Invalid access level ordinal: {value}"
            ))),
        }
    }

    /// Check if this is the owner level.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Check if this level grants at least the given level.
    pub fn has_at_least(&self, required: &AccessLevel) -> bool {
        self >= required
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Update => "update",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<AccessLevel> for i32 {
    fn from(level: AccessLevel) -> i32 {
        level.ordinal()
    }
}

impl TryFrom<i32> for AccessLevel {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_ordinal(value)
    }
}

impl FromStr for AccessLevel {
    type Err = AppError;

    /// Accepts a level name (`read`, `update`, `owner`) or its ordinal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "owner" => Ok(Self::Owner),
            other => match other.parse::<i32>() {
                Ok(ordinal) => Self::from_ordinal(ordinal),
                Err(_) => Err(AppError::validation(format!(
                    "Invalid access level: '{s}'. Expected one of: read, update, owner"
                ))),
            },
        }
    }
}

/// Bucket of a "varies" breakdown: either one of the levels or no access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessBucket {
    /// The grantee has no permission on the object.
    NoAccess,
    /// The grantee has read access.
    Read,
    /// The grantee has update access.
    Update,
    /// The grantee owns the object.
    Owner,
}

impl AccessBucket {
    /// Return the bucket as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAccess => "no access",
            Self::Read => "read",
            Self::Update => "update",
            Self::Owner => "owner",
        }
    }
}

impl From<AccessLevel> for AccessBucket {
    fn from(level: AccessLevel) -> Self {
        match level {
            AccessLevel::Read => Self::Read,
            AccessLevel::Update => Self::Update,
            AccessLevel::Owner => Self::Owner,
        }
    }
}

impl From<Option<AccessLevel>> for AccessBucket {
    fn from(level: Option<AccessLevel>) -> Self {
        level.map_or(Self::NoAccess, Self::from)
    }
}

impl fmt::Display for AccessBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
