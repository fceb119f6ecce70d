use chrono::{NaiveDate, Utc};
use lifescrum_domain::{
    default_board, default_columns, default_settings, generate_sprints_from, parse_backup,
    BackupExporter, Priority, Size, Snapshot, Story, StoryDraft, Weight,
};

const WEB_BACKUP: &str = r##"{
  "exportedAt": "2025-02-03T09:15:00.000Z",
  "stories": [
    {
      "id": "a1",
      "title": "Morning prayer",
      "description": "As a Disciple of Christ I need to pray",
      "labels": ["spiritual"],
      "priority": "Q2",
      "weight": 1,
      "size": "XS",
      "type": "Spiritual",
      "roleId": "disciple",
      "sprintId": "Week-6-2025",
      "checklist": [{"id": "c1", "text": "Read", "done": true}],
      "createdAt": "2025-02-01T08:00:00.000Z",
      "updatedAt": "2025-02-02T08:00:00.000Z"
    }
  ],
  "sprints": [
    {"id": "Week-6-2025", "isoWeek": 6, "year": 2025, "startDate": "2025-02-03", "endDate": "2025-02-09"}
  ],
  "roles": [{"id": "disciple", "name": "Disciple of Christ", "color": "#8B5CF6"}],
  "labels": [{"id": "spiritual", "name": "spiritual", "color": "#8B5CF6"}],
  "visions": [{"id": "v1", "title": "Grow in faith", "type": "Spiritual", "order": 0}],
  "columns": [{"id": "todo", "name": "To Do", "storyIds": ["a1"]}],
  "boards": [{"id": "main-board", "name": "Main Board", "columns": ["todo"]}],
  "settings": {"theme": "dark", "roles": [], "labels": [], "weightBaseColor": "#3B82F6"}
}"##;

#[test]
fn test_reads_backup_written_by_web_app() {
    let payload = parse_backup(WEB_BACKUP).unwrap();

    let story = &payload.stories[0];
    assert_eq!(story.priority, Priority::Q2);
    assert_eq!(story.weight, Weight::One);
    assert_eq!(story.size, Size::Xs);
    assert_eq!(story.role_id.as_deref(), Some("disciple"));
    assert!(story.checklist[0].done);
    assert!(story.updated_at > story.created_at);

    let sprints = payload.sprints.unwrap();
    assert_eq!(
        sprints[0].start_date,
        NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
    );
    assert_eq!(payload.columns.unwrap()[0].story_ids, vec!["a1"]);

    let settings = payload.settings.unwrap();
    assert!(settings.priority_colors.is_none());
    assert!(settings.migrated().priority_colors.is_some());
}

#[test]
fn test_export_then_parse_keeps_every_collection() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let mut deleted = Story::new(StoryDraft::new("Old habit"));
    deleted.mark_deleted();
    let snapshot = Snapshot {
        stories: vec![Story::new(StoryDraft::new("Walk")), deleted],
        sprints: generate_sprints_from(today, 4),
        roles: default_settings().roles,
        labels: default_settings().labels,
        visions: vec![],
        columns: default_columns(),
        boards: vec![default_board()],
        settings: default_settings(),
    };

    let json = BackupExporter::to_json(&BackupExporter::export(&snapshot, Utc::now())).unwrap();
    let payload = parse_backup(&json).unwrap();

    assert_eq!(payload.stories.len(), 1);
    assert_eq!(payload.stories[0].title, "Walk");
    assert_eq!(payload.sprints.map(|s| s.len()), Some(4));
    assert_eq!(payload.roles.map(|r| r.len()), Some(4));
    assert_eq!(payload.columns.map(|c| c.len()), Some(6));
    assert_eq!(payload.settings, Some(default_settings()));
}
