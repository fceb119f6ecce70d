use chrono::{DateTime, NaiveDate, Utc};
use lifescrum_core::ScrumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::field_update::FieldUpdate;
use crate::label::LabelId;
use crate::role::{Role, RoleId};
use crate::sprint::SprintId;
use crate::vision::{Vision, VisionId};

pub type StoryId = String;

pub const DEFAULT_STORY_TYPE: &str = "Intellectual";

/// Eisenhower quadrant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Priority {
    Q1,
    Q2,
    Q3,
    #[default]
    Q4,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Q1, Priority::Q2, Priority::Q3, Priority::Q4];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Q1 => "Q1",
            Priority::Q2 => "Q2",
            Priority::Q3 => "Q3",
            Priority::Q4 => "Q4",
        }
    }

    /// Sort rank, Q1 first.
    pub fn order(&self) -> u8 {
        match self {
            Priority::Q1 => 1,
            Priority::Q2 => 2,
            Priority::Q3 => 3,
            Priority::Q4 => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ScrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "Q1" => Ok(Priority::Q1),
            "Q2" => Ok(Priority::Q2),
            "Q3" => Ok(Priority::Q3),
            "Q4" => Ok(Priority::Q4),
            _ => Err(ScrumError::Validation(format!(
                "Invalid priority '{}'. Valid values: Q1, Q2, Q3, Q4",
                s
            ))),
        }
    }
}

/// Relative effort on a Fibonacci-like scale. Serialized as the bare number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weight {
    #[default]
    One,
    Three,
    Five,
    Eight,
    Thirteen,
    TwentyOne,
}

impl Weight {
    pub const ALL: [Weight; 6] = [
        Weight::One,
        Weight::Three,
        Weight::Five,
        Weight::Eight,
        Weight::Thirteen,
        Weight::TwentyOne,
    ];

    pub fn value(&self) -> u8 {
        match self {
            Weight::One => 1,
            Weight::Three => 3,
            Weight::Five => 5,
            Weight::Eight => 8,
            Weight::Thirteen => 13,
            Weight::TwentyOne => 21,
        }
    }

    /// Time bucket that usually fits this much effort.
    pub fn suggested_size(&self) -> Size {
        match self.value() {
            0..=1 => Size::Xs,
            2..=3 => Size::S,
            4..=8 => Size::M,
            9..=13 => Size::L,
            _ => Size::Xl,
        }
    }
}

impl TryFrom<u8> for Weight {
    type Error = ScrumError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Weight::ALL
            .into_iter()
            .find(|w| w.value() == value)
            .ok_or_else(|| {
                ScrumError::Validation(format!(
                    "Invalid weight {}. Valid values: 1, 3, 5, 8, 13, 21",
                    value
                ))
            })
    }
}

impl From<Weight> for u8 {
    fn from(weight: Weight) -> Self {
        weight.value()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for Weight {
    type Err = ScrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| ScrumError::Validation(format!("Invalid weight '{}'", s)))?;
        Weight::try_from(value)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Size {
    #[serde(rename = "XS")]
    Xs,
    S,
    #[default]
    M,
    L,
    #[serde(rename = "XL")]
    Xl,
}

impl Size {
    pub const ALL: [Size; 5] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ScrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ScrumError::Validation(format!(
                    "Invalid size '{}'. Valid values: XS, S, M, L, XL",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    #[serde(default = "crate::new_id")]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: crate::new_id(),
            text: text.into(),
            done: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatCadence {
    #[default]
    None,
    Weekly,
    Biweekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repeat {
    pub cadence: RepeatCadence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

fn default_story_type() -> String {
    DEFAULT_STORY_TYPE.to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<LabelId>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub weight: Weight,
    #[serde(default)]
    pub size: Size,
    /// Free-form; the settings' story type table only supplies colors.
    #[serde(rename = "type", default = "default_story_type")]
    pub story_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_id: Option<VisionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<SprintId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<StoryId>>,
}

impl Story {
    pub fn new(draft: StoryDraft) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_id(),
            title: draft.title,
            description: draft.description,
            labels: draft.labels,
            priority: draft.priority.unwrap_or_default(),
            weight: draft.weight.unwrap_or_default(),
            size: draft.size.unwrap_or_default(),
            story_type: draft.story_type.unwrap_or_else(default_story_type),
            role_id: draft.role_id,
            vision_id: draft.vision_id,
            due_date: draft.due_date,
            sprint_id: draft.sprint_id.resolve(None),
            scheduled: draft.scheduled,
            checklist: draft.checklist,
            created_at: Some(now),
            updated_at: Some(now),
            deleted: false,
            repeat: draft.repeat,
            subtasks: draft.subtasks,
        }
    }

    /// Timestamp used for last-write-wins: `updatedAt`, then `createdAt`, then the epoch.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at
            .or(self.created_at)
            .unwrap_or_default()
    }

    /// Bump `updated_at` without ever moving it backwards.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = Some(match self.updated_at {
            Some(previous) if previous > now => previous,
            _ => now,
        });
    }

    pub fn update(&mut self, updates: StoryUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(description) = updates.description {
            self.description = description;
        }
        if let Some(labels) = updates.labels {
            self.labels = labels;
        }
        if let Some(priority) = updates.priority {
            self.priority = priority;
        }
        if let Some(weight) = updates.weight {
            self.weight = weight;
        }
        if let Some(size) = updates.size {
            self.size = size;
        }
        if let Some(story_type) = updates.story_type {
            self.story_type = story_type;
        }
        updates.role_id.apply_to(&mut self.role_id);
        updates.vision_id.apply_to(&mut self.vision_id);
        updates.due_date.apply_to(&mut self.due_date);
        updates.sprint_id.apply_to(&mut self.sprint_id);
        updates.scheduled.apply_to(&mut self.scheduled);
        if let Some(checklist) = updates.checklist {
            self.checklist = checklist;
        }
        if let Some(deleted) = updates.deleted {
            self.deleted = deleted;
        }
        updates.repeat.apply_to(&mut self.repeat);
        updates.subtasks.apply_to(&mut self.subtasks);
        self.touch();
    }

    pub fn mark_deleted(&mut self) {
        self.deleted = true;
        self.touch();
    }

    pub fn restore(&mut self) {
        self.deleted = false;
        self.touch();
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(parse_loose_datetime)
    }

    pub fn is_in_sprint(&self, sprint_id: &str) -> bool {
        self.sprint_id.as_deref() == Some(sprint_id)
    }
}

/// Input to the story factory. Unset fields take the factory defaults.
#[derive(Debug, Clone, Default)]
pub struct StoryDraft {
    pub title: String,
    pub description: String,
    pub labels: Vec<LabelId>,
    pub priority: Option<Priority>,
    pub weight: Option<Weight>,
    pub size: Option<Size>,
    pub story_type: Option<String>,
    pub role_id: Option<RoleId>,
    pub vision_id: Option<VisionId>,
    pub due_date: Option<String>,
    /// `NoChange` means "put it in the current sprint", `Clear` means "no sprint".
    pub sprint_id: FieldUpdate<SprintId>,
    pub scheduled: Option<String>,
    pub checklist: Vec<ChecklistItem>,
    pub repeat: Option<Repeat>,
    pub subtasks: Option<Vec<StoryId>>,
}

impl StoryDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for Story
#[derive(Debug, Clone, Default)]
pub struct StoryUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub labels: Option<Vec<LabelId>>,
    pub priority: Option<Priority>,
    pub weight: Option<Weight>,
    pub size: Option<Size>,
    pub story_type: Option<String>,
    pub role_id: FieldUpdate<RoleId>,
    pub vision_id: FieldUpdate<VisionId>,
    pub due_date: FieldUpdate<String>,
    pub sprint_id: FieldUpdate<SprintId>,
    pub scheduled: FieldUpdate<String>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub deleted: Option<bool>,
    pub repeat: FieldUpdate<Repeat>,
    pub subtasks: FieldUpdate<Vec<StoryId>>,
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or RFC 3339. Anything else is treated as no date.
pub fn parse_loose_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

/// User-story sentence used to prefill a description.
pub fn generate_description(
    role: Option<&Role>,
    vision: Option<&Vision>,
    custom_text: Option<&str>,
) -> String {
    if let Some(text) = custom_text.filter(|t| !t.is_empty()) {
        return text.to_string();
    }
    let role_name = role
        .map(|r| r.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("person");
    let vision_text = vision
        .map(|v| format!(" so that I fulfill ({})", v.title))
        .unwrap_or_default();
    format!("As a {} I need to <...>{}", role_name, vision_text)
}
