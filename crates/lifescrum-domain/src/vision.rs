use serde::{Deserialize, Serialize};

use crate::field_update::FieldUpdate;
use crate::story::DEFAULT_STORY_TYPE;

pub type VisionId = String;

/// Long-term goal, ranked by `order` (lower is more important).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vision {
    pub id: VisionId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default = "default_vision_type")]
    pub vision_type: String,
    #[serde(default)]
    pub order: i64,
}

fn default_vision_type() -> String {
    DEFAULT_STORY_TYPE.to_string()
}

#[derive(Debug, Clone, Default)]
pub struct VisionDraft {
    pub title: String,
    pub description: Option<String>,
    pub vision_type: Option<String>,
    pub order: Option<i64>,
}

impl VisionDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VisionUpdate {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub vision_type: Option<String>,
    pub order: Option<i64>,
}

impl Vision {
    pub fn new(draft: VisionDraft) -> Self {
        Self {
            id: crate::new_id(),
            title: draft.title,
            description: draft.description,
            vision_type: draft.vision_type.unwrap_or_else(default_vision_type),
            order: draft.order.unwrap_or(0),
        }
    }

    pub fn update(&mut self, updates: VisionUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        updates.description.apply_to(&mut self.description);
        if let Some(vision_type) = updates.vision_type {
            self.vision_type = vision_type;
        }
        if let Some(order) = updates.order {
            self.order = order;
        }
    }
}
