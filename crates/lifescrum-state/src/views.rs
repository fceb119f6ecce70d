//! Derived views. Pure functions over borrowed collections; the store wraps
//! them with its own state and clock.

use chrono::NaiveDate;
use lifescrum_domain::{current_week, sprint_id, Column, Sprint, Story};
use serde::Serialize;

/// Selected sprint if it still exists, else the sprint for `today`'s ISO
/// week, else the first sprint. `None` only for an empty list.
pub fn current_sprint<'a>(
    sprints: &'a [Sprint],
    selected_id: Option<&str>,
    today: NaiveDate,
) -> Option<&'a Sprint> {
    let (week, year) = current_week(today);
    let this_week = sprint_id(week, year);

    selected_id
        .and_then(|id| sprints.iter().find(|s| s.id == id))
        .or_else(|| sprints.iter().find(|s| s.id == this_week))
        .or_else(|| sprints.first())
}

/// One column with its visible stories resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    pub stories: Vec<&'a Story>,
}

/// Resolves each column's ids against `stories`, keeping column order and
/// dropping unknown ids, tombstones and stories outside `sprint_id`.
/// With no sprint, only unknown ids and tombstones are dropped.
pub fn stories_by_column<'a>(
    columns: &'a [Column],
    stories: &'a [Story],
    sprint_id: Option<&str>,
) -> Vec<ColumnView<'a>> {
    columns
        .iter()
        .map(|column| ColumnView {
            column,
            stories: column
                .story_ids
                .iter()
                .filter_map(|id| stories.iter().find(|s| &s.id == id))
                .filter(|s| !s.deleted)
                .filter(|s| sprint_id.map_or(true, |sprint| s.is_in_sprint(sprint)))
                .collect(),
        })
        .collect()
}

/// Column currently holding `story_id`, if any.
pub fn column_of<'a>(columns: &'a [Column], story_id: &str) -> Option<&'a Column> {
    columns.iter().find(|c| c.position_of(story_id).is_some())
}
