//! Converts a snapshot into the backup file format.

use chrono::{DateTime, SecondsFormat, Utc};
use lifescrum_core::{ScrumError, ScrumResult};

use super::models::Backup;
use crate::Snapshot;

pub struct BackupExporter;

impl BackupExporter {
    pub fn export(snapshot: &Snapshot, now: DateTime<Utc>) -> Backup {
        Backup::from_snapshot(snapshot, now)
    }

    /// Pretty-printed JSON.
    pub fn to_json(backup: &Backup) -> ScrumResult<String> {
        serde_json::to_string_pretty(backup).map_err(|e| ScrumError::Serialization(e.to_string()))
    }

    /// `backup-2025-01-01T10-00-00.json`: the export instant with `:` and `.`
    /// swapped for `-`, cut to the second.
    pub fn default_filename(now: DateTime<Utc>) -> String {
        let stamp = now
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");
        let stamp: String = stamp.chars().take(19).collect();
        format!("backup-{}.json", stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{Story, StoryDraft};
    use chrono::TimeZone;

    #[test]
    fn test_export_drops_tombstones() {
        let mut gone = Story::new(StoryDraft::new("gone"));
        gone.deleted = true;
        let snapshot = Snapshot {
            stories: vec![Story::new(StoryDraft::new("kept")), gone],
            ..Snapshot::default()
        };

        let backup = BackupExporter::export(&snapshot, Utc::now());
        assert_eq!(backup.stories.len(), 1);
        assert_eq!(backup.stories[0].title, "kept");
    }

    #[test]
    fn test_to_json_shape() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let backup = BackupExporter::export(&Snapshot::default(), now);
        let json = BackupExporter::to_json(&backup).unwrap();

        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["exportedAt"], "2025-01-01T10:00:00Z");
        for key in [
            "stories", "sprints", "roles", "labels", "visions", "columns", "boards",
        ] {
            assert!(value[key].is_array(), "{} missing", key);
        }
        assert!(value["settings"].is_object());
    }

    #[test]
    fn test_default_filename() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(
            BackupExporter::default_filename(now),
            "backup-2025-01-01T10-00-00.json"
        );
    }
}
