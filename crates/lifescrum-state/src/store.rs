//! The store: single owner of every collection.
//!
//! Reads hand out borrows. Each mutation updates memory, writes the touched
//! slots through the `KeyValueStore` and broadcasts one `StoreEvent` per
//! slot. A failed write is logged and does not undo the mutation.

use chrono::{DateTime, NaiveDate, Utc};
use lifescrum_core::{AppConfig, ScrumError, ScrumResult};
use lifescrum_domain::column::ICEBOX;
use lifescrum_domain::{
    default_board, default_columns, default_settings, filter_stories, generate_sprints,
    parse_backup, plan_stories, sprint, Backup, BackupExporter, Board, BrainLevel, Column,
    FieldUpdate, FilterContext, FilterParams, ImportPayload, Label, LabelDraft, LabelUpdate,
    Role, RoleDraft, RoleUpdate, Settings, Size, Snapshot, Sprint, SprintId, Story, StoryDraft,
    StoryUpdate, Vision, VisionDraft, VisionId, VisionUpdate,
};
use lifescrum_persistence::{load_slot, save_slot, KeyValueStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::sync::broadcast;

use crate::events::StoreEvent;
use crate::import::{merge_stories, ImportMode, ImportSummary, LastWriteWinsResolver};
use crate::preferences::{Preferences, RoadmapPosition, Section, ViewType};
use crate::slots::Slot;
use crate::views::{self, ColumnView};

/// Buffer for the change channel. Lagging subscribers skip ahead.
const EVENT_CAPACITY: usize = 64;

pub struct Store {
    kv: Box<dyn KeyValueStore>,
    config: AppConfig,
    stories: Vec<Story>,
    sprints: Vec<Sprint>,
    roles: Vec<Role>,
    labels: Vec<Label>,
    visions: Vec<Vision>,
    columns: Vec<Column>,
    boards: Vec<Board>,
    settings: Settings,
    preferences: Preferences,
    events: broadcast::Sender<StoreEvent>,
}

impl Store {
    /// Loads every slot, repairing missing or corrupt ones with defaults.
    pub fn open(kv: Box<dyn KeyValueStore>, config: AppConfig) -> Self {
        let defaults = default_settings();
        let window = config.effective_sprint_window_weeks();
        let backend = kv.as_ref();

        let stories: Vec<Story> = load_or(backend, Slot::Stories, Vec::new);
        let sprints = load_non_empty(backend, Slot::Sprints, || generate_sprints(window));
        let roles = load_or(backend, Slot::Roles, || defaults.roles.clone());
        let labels = load_or(backend, Slot::Labels, || defaults.labels.clone());
        let visions = load_or(backend, Slot::Visions, Vec::new);
        let columns = load_non_empty(backend, Slot::Columns, default_columns);
        let boards = load_non_empty(backend, Slot::Boards, || vec![default_board()]);
        let settings = load_or(backend, Slot::Settings, || defaults.clone());
        let preferences = load_preferences(backend);

        tracing::info!(
            "Opened store: {} stories, {} sprints, {} visions",
            stories.len(),
            sprints.len(),
            visions.len()
        );

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            kv,
            config,
            stories,
            sprints,
            roles,
            labels,
            visions,
            columns,
            boards,
            settings,
            preferences,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // Reads

    /// Raw collection, tombstones included.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn story(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    pub fn active_stories(&self) -> impl Iterator<Item = &Story> {
        self.stories.iter().filter(|s| !s.deleted)
    }

    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn visions(&self) -> &[Vision] {
        &self.visions
    }

    /// Visions sorted by rank; equal ranks keep insertion order.
    pub fn visions_by_order(&self) -> Vec<&Vision> {
        let mut sorted: Vec<&Vision> = self.visions.iter().collect();
        sorted.sort_by_key(|v| v.order);
        sorted
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Settings with legacy gaps filled in. The stored value is left as is.
    pub fn settings(&self) -> Settings {
        self.settings.migrated()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    // Derived views

    pub fn current_sprint(&self) -> Option<&Sprint> {
        self.current_sprint_on(sprint::today())
    }

    pub fn current_sprint_on(&self, today: NaiveDate) -> Option<&Sprint> {
        views::current_sprint(
            &self.sprints,
            self.preferences.selected_sprint_id.as_deref(),
            today,
        )
    }

    pub fn filtered_stories(&self) -> Vec<&Story> {
        self.filtered_stories_at(Utc::now())
    }

    pub fn filtered_stories_at(&self, now: DateTime<Utc>) -> Vec<&Story> {
        self.stories_matching(&self.preferences.filter, now)
    }

    /// Applies `params` without touching the persisted filter.
    pub fn stories_matching(&self, params: &FilterParams, now: DateTime<Utc>) -> Vec<&Story> {
        let ctx = FilterContext {
            roles: &self.roles,
            labels: &self.labels,
            current_sprint_id: self.current_sprint().map(|s| s.id.as_str()),
            now,
        };
        filter_stories(&self.stories, params, ctx)
    }

    /// Board for the current sprint.
    pub fn stories_by_column(&self) -> Vec<ColumnView<'_>> {
        let sprint_id = self.current_sprint().map(|s| s.id.as_str());
        views::stories_by_column(&self.columns, &self.stories, sprint_id)
    }

    pub fn planned_stories(&self, level: BrainLevel, size: Size) -> Vec<&Story> {
        plan_stories(&self.stories, level, size)
    }

    // Stories

    /// Creates a story and places it at the end of `target_column`
    /// (`icebox` when `None`).
    ///
    /// An untouched draft sprint means the current sprint; `FieldUpdate::Clear`
    /// keeps the story out of every sprint.
    pub fn add_story(&mut self, mut draft: StoryDraft, target_column: Option<&str>) -> Story {
        if !draft.sprint_id.is_change() {
            draft.sprint_id = match self.current_sprint() {
                Some(sprint) => FieldUpdate::Set(sprint.id.clone()),
                None => FieldUpdate::Clear,
            };
        }
        let story = Story::new(draft);
        tracing::debug!("Adding story {} ({})", story.id, story.title);

        self.stories.push(story.clone());
        self.persist(Slot::Stories);

        let column_id = target_column.unwrap_or(ICEBOX);
        match self.columns.iter_mut().find(|c| c.id == column_id) {
            Some(column) => {
                column.insert_story(story.id.clone(), None);
                self.persist(Slot::Columns);
            }
            None => tracing::warn!("Column {} not found; story {} is unplaced", column_id, story.id),
        }

        story
    }

    /// One copy of the draft per sprint, from the draft's sprint (or the
    /// current one) to the end of the window, stopping at the first sprint
    /// starting after `until`. Titles get ` (Week <n>)` appended.
    pub fn add_repeating_story(
        &mut self,
        draft: StoryDraft,
        target_column: Option<&str>,
        until: Option<NaiveDate>,
    ) -> Vec<Story> {
        let requested = match &draft.sprint_id {
            FieldUpdate::Set(id) => self.sprints.iter().position(|s| &s.id == id),
            _ => None,
        };
        let start = requested.or_else(|| {
            let current = self.current_sprint()?;
            self.sprints.iter().position(|s| s.id == current.id)
        });
        let Some(start) = start else {
            return Vec::new();
        };

        let weeks: Vec<(SprintId, u32)> = self.sprints[start..]
            .iter()
            .take_while(|s| until.map_or(true, |end| s.start_date <= end))
            .map(|s| (s.id.clone(), s.iso_week))
            .collect();

        weeks
            .into_iter()
            .map(|(sprint_id, iso_week)| {
                let weekly = StoryDraft {
                    title: format!("{} (Week {})", draft.title, iso_week),
                    sprint_id: FieldUpdate::Set(sprint_id),
                    ..draft.clone()
                };
                self.add_story(weekly, target_column)
            })
            .collect()
    }

    pub fn update_story(&mut self, id: &str, update: StoryUpdate) -> Option<&Story> {
        let story = self.stories.iter_mut().find(|s| s.id == id)?;
        story.update(update);
        tracing::debug!("Updated story {}", id);
        self.persist(Slot::Stories);
        self.story(id)
    }

    /// Tombstones the story. Column lists keep the id.
    pub fn delete_story(&mut self, id: &str) -> bool {
        let Some(story) = self.stories.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        story.mark_deleted();
        tracing::debug!("Deleted story {}", id);
        self.persist(Slot::Stories);
        true
    }

    pub fn restore_story(&mut self, id: &str) -> bool {
        let Some(story) = self.stories.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        story.restore();
        tracing::debug!("Restored story {}", id);
        self.persist(Slot::Stories);
        true
    }

    /// Moves a story between columns. `index` defaults to the end of `to`
    /// (or the current position for a same-column move) and is clamped.
    /// An unknown story or `to` column leaves everything untouched.
    pub fn move_story(&mut self, id: &str, from: &str, to: &str, index: Option<usize>) -> bool {
        if self.story(id).is_none() {
            tracing::debug!("Move of {} ignored: no such story", id);
            return false;
        }
        let Some(to_idx) = self.columns.iter().position(|c| c.id == to) else {
            tracing::debug!("Move of {} ignored: no column {}", id, to);
            return false;
        };

        if from == to {
            let column = &mut self.columns[to_idx];
            let previous = column.remove_story(id);
            column.insert_story(id.to_string(), index.or(previous));
        } else {
            if let Some(source) = self.columns.iter_mut().find(|c| c.id == from) {
                source.remove_story(id);
            }
            let destination = &mut self.columns[to_idx];
            destination.remove_story(id);
            destination.insert_story(id.to_string(), index);
        }

        tracing::debug!("Moved story {} from {} to {}", id, from, to);
        self.persist(Slot::Columns);
        true
    }

    // Roles and labels. Deleting never cascades into stories.

    pub fn add_role(&mut self, draft: RoleDraft) -> Role {
        let role = Role::new(draft);
        self.roles.push(role.clone());
        self.persist(Slot::Roles);
        role
    }

    pub fn update_role(&mut self, id: &str, update: RoleUpdate) -> Option<&Role> {
        let role = self.roles.iter_mut().find(|r| r.id == id)?;
        role.update(update);
        self.persist(Slot::Roles);
        self.roles.iter().find(|r| r.id == id)
    }

    pub fn delete_role(&mut self, id: &str) -> bool {
        let before = self.roles.len();
        self.roles.retain(|r| r.id != id);
        let removed = self.roles.len() != before;
        if removed {
            self.persist(Slot::Roles);
        }
        removed
    }

    pub fn add_label(&mut self, draft: LabelDraft) -> Label {
        let label = Label::new(draft);
        self.labels.push(label.clone());
        self.persist(Slot::Labels);
        label
    }

    pub fn update_label(&mut self, id: &str, update: LabelUpdate) -> Option<&Label> {
        let label = self.labels.iter_mut().find(|l| l.id == id)?;
        label.update(update);
        self.persist(Slot::Labels);
        self.labels.iter().find(|l| l.id == id)
    }

    pub fn delete_label(&mut self, id: &str) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l.id != id);
        let removed = self.labels.len() != before;
        if removed {
            self.persist(Slot::Labels);
        }
        removed
    }

    // Visions

    pub fn add_vision(&mut self, draft: VisionDraft) -> Vision {
        let vision = Vision::new(draft);
        self.visions.push(vision.clone());
        self.persist(Slot::Visions);
        vision
    }

    pub fn update_vision(&mut self, id: &str, update: VisionUpdate) -> Option<&Vision> {
        let vision = self.visions.iter_mut().find(|v| v.id == id)?;
        vision.update(update);
        self.persist(Slot::Visions);
        self.visions.iter().find(|v| v.id == id)
    }

    pub fn delete_vision(&mut self, id: &str) -> bool {
        let before = self.visions.len();
        self.visions.retain(|v| v.id != id);
        let removed = self.visions.len() != before;
        if removed {
            self.persist(Slot::Visions);
        }
        removed
    }

    /// Listed visions move to the front with `order` = their index.
    /// A partial list keeps every unlisted vision after the listed ones,
    /// in its previous relative order and with its `order` unchanged.
    /// Unknown ids are ignored.
    pub fn reorder_visions(&mut self, ordered_ids: &[VisionId]) {
        let mut reordered: Vec<Vision> = Vec::with_capacity(self.visions.len());
        for id in ordered_ids {
            if let Some(pos) = self.visions.iter().position(|v| &v.id == id) {
                let mut vision = self.visions.remove(pos);
                vision.order = reordered.len() as i64;
                reordered.push(vision);
            }
        }
        reordered.append(&mut self.visions);
        self.visions = reordered;
        self.persist(Slot::Visions);
    }

    // Sprints and settings

    /// An empty list is replaced by a fresh window.
    pub fn set_sprints(&mut self, sprints: Vec<Sprint>) {
        self.sprints = if sprints.is_empty() {
            generate_sprints(self.config.effective_sprint_window_weeks())
        } else {
            sprints
        };
        self.persist(Slot::Sprints);
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.persist(Slot::Settings);
    }

    // Preferences

    pub fn select_sprint(&mut self, sprint_id: Option<SprintId>) {
        self.preferences.selected_sprint_id = sprint_id;
        self.persist(Slot::SelectedSprint);
    }

    pub fn set_current_view(&mut self, view: ViewType) {
        self.preferences.current_view = view;
        self.persist(Slot::CurrentView);
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.preferences.filter.text = text.into();
        self.persist(Slot::FilterText);
    }

    pub fn set_filter_keywords(&mut self, keywords: impl Into<String>) {
        self.preferences.filter.keywords = keywords.into();
        self.persist(Slot::FilterKeywords);
    }

    pub fn set_filter_due_soon(&mut self, due_soon: bool) {
        self.preferences.filter.due_soon = due_soon;
        self.persist(Slot::FilterDueSoon);
    }

    pub fn set_filter(&mut self, params: FilterParams) {
        self.preferences.filter = params;
        self.persist(Slot::FilterText);
        self.persist(Slot::FilterKeywords);
        self.persist(Slot::FilterDueSoon);
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(FilterParams::default());
    }

    pub fn set_section_collapsed(&mut self, section: Section, collapsed: bool) {
        self.preferences.set_collapsed(section, collapsed);
        self.persist(section.slot());
    }

    pub fn set_chart_above_board(&mut self, above: bool) {
        self.preferences.chart_above_board = above;
        self.persist(Slot::ChartAboveBoard);
    }

    pub fn set_roadmap_position(&mut self, position: RoadmapPosition) {
        self.preferences.roadmap_position = position;
        self.persist(Slot::RoadmapPosition);
    }

    // Backup

    /// Every collection as of now, tombstones excluded.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            stories: self.active_stories().cloned().collect(),
            sprints: self.sprints.clone(),
            roles: self.roles.clone(),
            labels: self.labels.clone(),
            visions: self.visions.clone(),
            columns: self.columns.clone(),
            boards: self.boards.clone(),
            settings: self.settings(),
        }
    }

    /// Backup stamped `now`, tombstones excluded.
    pub fn export_backup(&self, now: DateTime<Utc>) -> Backup {
        BackupExporter::export(&self.export_snapshot(), now)
    }

    pub fn export_json(&self) -> ScrumResult<String> {
        let backup = self.export_backup(Utc::now());
        tracing::info!("Exporting {} stories", backup.stories.len());
        BackupExporter::to_json(&backup)
    }

    /// Applies a parsed payload. Absent collections are kept; empty sprint,
    /// column and board lists are ignored.
    pub fn import_snapshot(&mut self, payload: ImportPayload, mode: ImportMode) -> ImportSummary {
        let ImportPayload {
            stories,
            sprints,
            roles,
            labels,
            visions,
            columns,
            boards,
            settings,
        } = payload;

        self.stories = match mode {
            ImportMode::Overwrite => stories,
            ImportMode::Merge => merge_stories(&self.stories, stories, &LastWriteWinsResolver),
        };
        let mut touched = vec![Slot::Stories];

        if let Some(sprints) = sprints.filter(|s| !s.is_empty()) {
            self.sprints = sprints;
            touched.push(Slot::Sprints);
        }
        if let Some(roles) = roles {
            self.roles = roles;
            touched.push(Slot::Roles);
        }
        if let Some(labels) = labels {
            self.labels = labels;
            touched.push(Slot::Labels);
        }
        if let Some(visions) = visions {
            self.visions = visions;
            touched.push(Slot::Visions);
        }
        if let Some(columns) = columns.filter(|c| !c.is_empty()) {
            self.columns = columns;
            touched.push(Slot::Columns);
        }
        if let Some(boards) = boards.filter(|b| !b.is_empty()) {
            self.boards = boards;
            touched.push(Slot::Boards);
        }
        if let Some(settings) = settings {
            self.settings = settings;
            touched.push(Slot::Settings);
        }

        for slot in touched {
            self.persist(slot);
        }

        let summary = ImportSummary {
            mode,
            stories: self.active_stories().count(),
            roles: self.roles.len(),
            labels: self.labels.len(),
            visions: self.visions.len(),
        };
        tracing::info!(
            "Imported ({}): {} stories, {} roles, {} labels, {} visions",
            summary.mode,
            summary.stories,
            summary.roles,
            summary.labels,
            summary.visions
        );
        self.notify(StoreEvent::Imported(summary.clone()));
        summary
    }

    /// Parses first, so a rejected payload leaves the store untouched.
    pub fn import_json(&mut self, json: &str, mode: ImportMode) -> ScrumResult<ImportSummary> {
        let payload = parse_backup(json)?;
        Ok(self.import_snapshot(payload, mode))
    }

    pub async fn import_file(&mut self, path: &Path, mode: ImportMode) -> ScrumResult<ImportSummary> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            ScrumError::Io(e)
        })?;
        self.import_json(&json, mode)
    }

    // Persistence

    fn persist(&self, slot: Slot) {
        let backend = self.kv.as_ref();
        let key = slot.key();
        let prefs = &self.preferences;
        let result = match slot {
            Slot::Stories => save_slot(backend, key, &self.stories),
            Slot::Sprints => save_slot(backend, key, &self.sprints),
            Slot::Roles => save_slot(backend, key, &self.roles),
            Slot::Labels => save_slot(backend, key, &self.labels),
            Slot::Visions => save_slot(backend, key, &self.visions),
            Slot::Columns => save_slot(backend, key, &self.columns),
            Slot::Boards => save_slot(backend, key, &self.boards),
            Slot::Settings => save_slot(backend, key, &self.settings),
            Slot::SelectedSprint => save_slot(backend, key, &prefs.selected_sprint_id),
            Slot::CurrentView => save_slot(backend, key, &prefs.current_view),
            Slot::FilterText => save_slot(backend, key, &prefs.filter.text),
            Slot::FilterKeywords => save_slot(backend, key, &prefs.filter.keywords),
            Slot::FilterDueSoon => save_slot(backend, key, &prefs.filter.due_soon),
            Slot::ChartCollapsed => save_slot(backend, key, &prefs.chart_collapsed),
            Slot::BoardCollapsed => save_slot(backend, key, &prefs.board_collapsed),
            Slot::RoadmapCollapsed => save_slot(backend, key, &prefs.roadmap_collapsed),
            Slot::ChartAboveBoard => save_slot(backend, key, &prefs.chart_above_board),
            Slot::RoadmapPosition => save_slot(backend, key, &prefs.roadmap_position),
            Slot::BurndownCollapsed => save_slot(backend, key, &prefs.burndown_collapsed),
            Slot::BurnupCollapsed => save_slot(backend, key, &prefs.burnup_collapsed),
        };

        if let Err(e) = result {
            tracing::error!("Failed to persist {}: {}", key, e);
        }
        self.notify(StoreEvent::Changed(slot));
    }

    fn notify(&self, event: StoreEvent) {
        // Err only means nobody is listening.
        let _ = self.events.send(event);
    }
}

fn load_or<T, F>(kv: &dyn KeyValueStore, slot: Slot, default: F) -> T
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    load_slot(kv, slot.key()).unwrap_or_else(default)
}

fn load_non_empty<T, F>(kv: &dyn KeyValueStore, slot: Slot, default: F) -> Vec<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match load_slot::<Vec<T>>(kv, slot.key()) {
        Some(items) if !items.is_empty() => items,
        Some(_) => {
            tracing::warn!("Slot {} is empty, falling back to default", slot);
            default()
        }
        None => default(),
    }
}

fn load_preferences(kv: &dyn KeyValueStore) -> Preferences {
    let d = Preferences::default();
    Preferences {
        selected_sprint_id: load_slot::<Option<SprintId>>(kv, Slot::SelectedSprint.key())
            .flatten(),
        current_view: load_or(kv, Slot::CurrentView, || d.current_view),
        filter: FilterParams {
            text: load_or(kv, Slot::FilterText, String::new),
            keywords: load_or(kv, Slot::FilterKeywords, String::new),
            due_soon: load_or(kv, Slot::FilterDueSoon, || d.filter.due_soon),
        },
        chart_collapsed: load_or(kv, Slot::ChartCollapsed, || d.chart_collapsed),
        board_collapsed: load_or(kv, Slot::BoardCollapsed, || d.board_collapsed),
        roadmap_collapsed: load_or(kv, Slot::RoadmapCollapsed, || d.roadmap_collapsed),
        chart_above_board: load_or(kv, Slot::ChartAboveBoard, || d.chart_above_board),
        roadmap_position: load_or(kv, Slot::RoadmapPosition, || d.roadmap_position),
        burndown_collapsed: load_or(kv, Slot::BurndownCollapsed, || d.burndown_collapsed),
        burnup_collapsed: load_or(kv, Slot::BurnupCollapsed, || d.burnup_collapsed),
    }
}
