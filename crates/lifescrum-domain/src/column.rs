use lifescrum_core::ScrumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::story::StoryId;

pub type ColumnId = String;

pub const ICEBOX: &str = "icebox";
pub const BACKLOG: &str = "backlog";
pub const TODO: &str = "todo";
pub const IN_PROGRESS: &str = "progress";
pub const REVIEW: &str = "review";
pub const DONE: &str = "done";

/// The fixed kanban stages. Any stage may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnName {
    Icebox,
    Backlog,
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Done,
}

impl ColumnName {
    pub const ALL: [ColumnName; 6] = [
        ColumnName::Icebox,
        ColumnName::Backlog,
        ColumnName::ToDo,
        ColumnName::InProgress,
        ColumnName::Review,
        ColumnName::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnName::Icebox => "Icebox",
            ColumnName::Backlog => "Backlog",
            ColumnName::ToDo => "To Do",
            ColumnName::InProgress => "In Progress",
            ColumnName::Review => "Review",
            ColumnName::Done => "Done",
        }
    }

    pub fn default_id(&self) -> &'static str {
        match self {
            ColumnName::Icebox => ICEBOX,
            ColumnName::Backlog => BACKLOG,
            ColumnName::ToDo => TODO,
            ColumnName::InProgress => IN_PROGRESS,
            ColumnName::Review => REVIEW,
            ColumnName::Done => DONE,
        }
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnName {
    type Err = ScrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ColumnName::ALL
            .into_iter()
            .find(|name| {
                name.as_str().eq_ignore_ascii_case(wanted) || name.default_id() == wanted
            })
            .ok_or_else(|| ScrumError::Validation(format!("Unknown column '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub name: ColumnName,
    #[serde(default)]
    pub story_ids: Vec<StoryId>,
}

impl Column {
    pub fn new(name: ColumnName) -> Self {
        Self {
            id: name.default_id().to_string(),
            name,
            story_ids: Vec::new(),
        }
    }

    pub fn position_of(&self, story_id: &str) -> Option<usize> {
        self.story_ids.iter().position(|id| id == story_id)
    }

    /// Removes every occurrence and returns the first position it held.
    pub fn remove_story(&mut self, story_id: &str) -> Option<usize> {
        let position = self.position_of(story_id);
        self.story_ids.retain(|id| id != story_id);
        position
    }

    /// Inserts at `index` (clamped to the end), or appends when `index` is `None`.
    pub fn insert_story(&mut self, story_id: StoryId, index: Option<usize>) {
        let at = index
            .unwrap_or(self.story_ids.len())
            .min(self.story_ids.len());
        self.story_ids.insert(at, story_id);
    }
}

pub fn default_columns() -> Vec<Column> {
    ColumnName::ALL.into_iter().map(Column::new).collect()
}
