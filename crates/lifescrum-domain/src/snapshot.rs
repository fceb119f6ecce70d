//! Point-in-time capture of every collection.
//!
//! The store builds one of these for export; `Backup` adds the export
//! timestamp and drops tombstones.

use serde::{Deserialize, Serialize};

use crate::{Board, Column, Label, Role, Settings, Sprint, Story, Vision};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Includes tombstoned stories.
    #[serde(default)]
    pub stories: Vec<Story>,
    #[serde(default)]
    pub sprints: Vec<Sprint>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub visions: Vec<Vision>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub settings: Settings,
}

impl Snapshot {
    pub fn active_stories(&self) -> impl Iterator<Item = &Story> {
        self.stories.iter().filter(|s| !s.deleted)
    }
}
