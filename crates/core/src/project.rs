use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::search::Taggable;

/// Target platform of a design project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Web,
    Ios,
    Android,
    Desktop,
    Other,
}

impl Platform {
    pub const ALL_VARIANTS_STR: &'static str = "web|ios|android|desktop|other";

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Web => "web",
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Desktop => "desktop",
            Self::Other => "other",
        }
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "desktop" => Ok(Self::Desktop),
            "other" => Ok(Self::Other),
            other => Err(CoreError::InvalidInput(format!(
                "unknown platform '{other}', expected one of {}",
                Self::ALL_VARIANTS_STR
            ))),
        }
    }
}

/// A design project grouping related screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub platform: Platform,
    pub tags: Vec<String>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

/// Partial update; `None` leaves the field unchanged. A blank
/// `description` or `cover_url` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub platform: Option<Platform>,
    pub tags: Option<Vec<String>>,
    pub cover_url: Option<String>,
}

/// Set an optional text field from a patch value: blank clears, `None` keeps.
pub(crate) fn patch_text(field: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        let value = value.trim();
        *field = (!value.is_empty()).then(|| value.to_owned());
    }
}

impl Project {
    /// Build a new project with a fresh id and timestamps.
    #[must_use]
    pub fn from_input(input: ProjectInput) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            platform: input.platform,
            tags: input.tags,
            cover_url: input.cover_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch and bump `updated_at`.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        patch_text(&mut self.description, patch.description);
        if let Some(platform) = patch.platform {
            self.platform = platform;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        patch_text(&mut self.cover_url, patch.cover_url);
        self.updated_at = Utc::now();
    }
}

impl Taggable for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
