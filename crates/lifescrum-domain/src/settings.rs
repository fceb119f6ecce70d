//! User-editable configuration stored alongside the board.
//!
//! Every field carries a serde default so settings written by older
//! versions still load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::label::Label;
use crate::role::{Role, RoleId};
use crate::story::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryTypeConfig {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySizeConfig {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub time_estimate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionTypeConfig {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default = "default_story_types")]
    pub story_types: Vec<StoryTypeConfig>,
    #[serde(default = "default_story_sizes")]
    pub story_sizes: Vec<StorySizeConfig>,
    #[serde(default = "default_vision_types")]
    pub vision_types: Vec<VisionTypeConfig>,
    /// Absent in settings saved before quadrant colors existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_colors: Option<BTreeMap<Priority, String>>,
    #[serde(default = "default_weight_base_color")]
    pub weight_base_color: String,
    #[serde(default)]
    pub role_to_type_map: BTreeMap<RoleId, String>,
}

impl Default for Settings {
    fn default() -> Self {
        default_settings()
    }
}

impl Settings {
    /// Copy with the quadrant color table filled in when it is missing.
    pub fn migrated(&self) -> Settings {
        let mut settings = self.clone();
        if settings.priority_colors.is_none() {
            settings.priority_colors = Some(default_priority_colors());
        }
        settings
    }

    pub fn priority_color(&self, priority: Priority) -> Option<&str> {
        self.priority_colors
            .as_ref()
            .and_then(|colors| colors.get(&priority))
            .map(String::as_str)
    }

    pub fn story_type_color(&self, story_type: &str) -> Option<&str> {
        self.story_types
            .iter()
            .find(|t| t.name == story_type)
            .map(|t| t.color.as_str())
    }

    pub fn type_for_role(&self, role_id: &str) -> Option<&str> {
        self.role_to_type_map.get(role_id).map(String::as_str)
    }
}

fn type_table() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Spiritual", "#8B5CF6"),
        ("Physical", "#EF4444"),
        ("Intellectual", "#3B82F6"),
        ("Social", "#10B981"),
    ]
}

fn default_story_types() -> Vec<StoryTypeConfig> {
    type_table()
        .into_iter()
        .map(|(name, color)| StoryTypeConfig {
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}

fn default_vision_types() -> Vec<VisionTypeConfig> {
    type_table()
        .into_iter()
        .map(|(name, color)| VisionTypeConfig {
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}

fn default_story_sizes() -> Vec<StorySizeConfig> {
    [
        ("XS", "#10B981", "15 min"),
        ("S", "#3B82F6", "30 min"),
        ("M", "#F59E0B", "1 hour"),
        ("L", "#EF4444", "2-4 hours"),
        ("XL", "#8B5CF6", "1+ days"),
    ]
    .into_iter()
    .map(|(name, color, estimate)| StorySizeConfig {
        name: name.to_string(),
        color: color.to_string(),
        time_estimate: estimate.to_string(),
    })
    .collect()
}

fn default_weight_base_color() -> String {
    "#3B82F6".to_string()
}

pub fn default_priority_colors() -> BTreeMap<Priority, String> {
    [
        (Priority::Q1, "#EF4444"),
        (Priority::Q2, "#10B981"),
        (Priority::Q3, "#F59E0B"),
        (Priority::Q4, "#6B7280"),
    ]
    .into_iter()
    .map(|(priority, color)| (priority, color.to_string()))
    .collect()
}

pub fn default_settings() -> Settings {
    let roles = vec![
        Role::seeded("disciple", "Disciple of Christ", "#8B5CF6"),
        Role::seeded("student", "Student", "#3B82F6"),
        Role::seeded("friend", "Friend", "#10B981"),
        Role::seeded("family", "Family Member", "#F59E0B"),
    ];
    let labels = vec![
        Label::seeded("workout", "workout", "#EF4444"),
        Label::seeded("study", "study", "#3B82F6"),
        Label::seeded("family", "family", "#F59E0B"),
        Label::seeded("spiritual", "spiritual", "#8B5CF6"),
    ];
    let role_to_type_map = [
        ("disciple", "Spiritual"),
        ("student", "Intellectual"),
        ("friend", "Social"),
        ("family", "Social"),
    ]
    .into_iter()
    .map(|(role, story_type)| (role.to_string(), story_type.to_string()))
    .collect();

    Settings {
        theme: Theme::System,
        roles,
        labels,
        story_types: default_story_types(),
        story_sizes: default_story_sizes(),
        vision_types: default_vision_types(),
        priority_colors: Some(default_priority_colors()),
        weight_base_color: default_weight_base_color(),
        role_to_type_map,
    }
}
