use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What kind of record a favorite points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteTarget {
    Project,
    Screen,
}

impl FavoriteTarget {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Project => "project",
            Self::Screen => "screen",
        }
    }
}

impl FromStr for FavoriteTarget {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "screen" => Ok(Self::Screen),
            other => Err(CoreError::InvalidInput(format!("unknown favorite target: {other}"))),
        }
    }
}

/// A user's bookmark on a project or screen.
///
/// `(user_id, target, target_id)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub target: FavoriteTarget,
    pub target_id: String,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    #[must_use]
    pub fn new(user_id: String, target: FavoriteTarget, target_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            target,
            target_id,
            created_at: Utc::now(),
        }
    }

    /// Whether two favorites refer to the same bookmark slot.
    #[must_use]
    pub fn same_slot(&self, user_id: &str, target: FavoriteTarget, target_id: &str) -> bool {
        self.user_id == user_id && self.target == target && self.target_id == target_id
    }
}
