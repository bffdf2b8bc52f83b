use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::project::patch_text;
use crate::search::Taggable;

/// A single UI screen captured for inspiration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Screen {
    pub id: String,
    pub project_id: Option<String>,
    pub name: String,
    pub image_url: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenInput {
    #[serde(default)]
    pub project_id: Option<String>,
    pub name: String,
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update; `None` leaves the field unchanged. A blank `project_id`
/// detaches the screen from its project and a blank `description` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenPatch {
    pub project_id: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Screen {
    #[must_use]
    pub fn from_input(input: ScreenInput) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: input.project_id,
            name: input.name,
            image_url: input.image_url,
            description: input.description,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ScreenPatch) {
        patch_text(&mut self.project_id, patch.project_id);
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        patch_text(&mut self.description, patch.description);
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }
}

impl Taggable for Screen {
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
