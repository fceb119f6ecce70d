use serde::{Deserialize, Serialize};

pub type LabelId = String;

pub const DEFAULT_LABEL_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct LabelDraft {
    pub id: Option<LabelId>,
    pub name: String,
    pub color: Option<String>,
}

impl LabelDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LabelUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl Label {
    pub fn new(draft: LabelDraft) -> Self {
        Self {
            id: draft.id.unwrap_or_else(crate::new_id),
            name: draft.name,
            color: draft
                .color
                .unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string()),
        }
    }

    pub fn update(&mut self, updates: LabelUpdate) {
        if let Some(name) = updates.name {
            self.name = name;
        }
        if let Some(color) = updates.color {
            self.color = color;
        }
    }

    pub(crate) fn seeded(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}
