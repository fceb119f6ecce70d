pub mod backup;
pub mod board;
pub mod color;
pub mod column;
pub mod field_update;
pub mod filter;
pub mod label;
pub mod planner;
pub mod role;
pub mod settings;
pub mod snapshot;
pub mod sprint;
pub mod story;
pub mod vision;

pub use backup::{parse_backup, Backup, BackupExporter, BackupImporter, ImportPayload};
pub use board::{default_board, Board, BoardId, DEFAULT_BOARD_ID};
pub use color::{hex_to_rgb, lighten_factor, rgb_to_hex, weight_gradient_color, DEFAULT_WEIGHT_MAX};
pub use column::{default_columns, Column, ColumnId, ColumnName};
pub use field_update::FieldUpdate;
pub use filter::{
    filter_stories, parse_filter_keywords, FilterContext, FilterKeywords, FilterParams,
    StoryFilter,
};
pub use label::{Label, LabelDraft, LabelId, LabelUpdate};
pub use planner::{plan_stories, BrainLevel};
pub use role::{Role, RoleDraft, RoleId, RoleUpdate};
pub use settings::{
    default_priority_colors, default_settings, Settings, StorySizeConfig, StoryTypeConfig,
    Theme, VisionTypeConfig,
};
pub use snapshot::Snapshot;
pub use sprint::{
    current_week, generate_sprints, generate_sprints_from, sprint_id, today, week_dates, Sprint,
    SprintId,
};
pub use story::{
    generate_description, parse_loose_datetime, ChecklistItem, Priority, Repeat, RepeatCadence,
    Size, Story, StoryDraft, StoryId, StoryUpdate, Weight,
};
pub use vision::{Vision, VisionDraft, VisionId, VisionUpdate};

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
