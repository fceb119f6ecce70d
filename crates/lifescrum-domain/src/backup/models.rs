//! Backup data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Board, Column, Label, Role, Settings, Snapshot, Sprint, Story, Vision};

/// What gets written to a backup file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub exported_at: DateTime<Utc>,
    pub stories: Vec<Story>,
    pub sprints: Vec<Sprint>,
    pub roles: Vec<Role>,
    pub labels: Vec<Label>,
    pub visions: Vec<Vision>,
    pub columns: Vec<Column>,
    pub boards: Vec<Board>,
    pub settings: Settings,
}

impl Backup {
    /// Everything in the snapshot except tombstoned stories.
    pub fn from_snapshot(snapshot: &Snapshot, exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at,
            stories: snapshot.active_stories().cloned().collect(),
            sprints: snapshot.sprints.clone(),
            roles: snapshot.roles.clone(),
            labels: snapshot.labels.clone(),
            visions: snapshot.visions.clone(),
            columns: snapshot.columns.clone(),
            boards: snapshot.boards.clone(),
            settings: snapshot.settings.clone(),
        }
    }
}

/// A parsed backup. `None` means the file did not carry that collection
/// and the existing one should be kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    pub stories: Vec<Story>,
    #[serde(default)]
    pub sprints: Option<Vec<Sprint>>,
    #[serde(default)]
    pub roles: Option<Vec<Role>>,
    #[serde(default)]
    pub labels: Option<Vec<Label>>,
    #[serde(default)]
    pub visions: Option<Vec<Vision>>,
    #[serde(default)]
    pub columns: Option<Vec<Column>>,
    #[serde(default)]
    pub boards: Option<Vec<Board>>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

impl ImportPayload {
    /// Legacy payload: stories only.
    pub fn stories_only(stories: Vec<Story>) -> Self {
        Self {
            stories,
            ..Self::default()
        }
    }
}

impl From<Backup> for ImportPayload {
    fn from(backup: Backup) -> Self {
        Self {
            stories: backup.stories,
            sprints: Some(backup.sprints),
            roles: Some(backup.roles),
            labels: Some(backup.labels),
            visions: Some(backup.visions),
            columns: Some(backup.columns),
            boards: Some(backup.boards),
            settings: Some(backup.settings),
        }
    }
}
