//! Story filter implementations.
//!
//! Each criterion is a `StoryFilter`; `CompositeFilter` ANDs them together.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::keywords::{parse_filter_keywords, FilterKeywords};
use crate::label::Label;
use crate::role::Role;
use crate::story::Story;

/// Window used by the due-soon toggle.
pub const DUE_SOON_DAYS: i64 = 7;

/// Returns true if the story passes the criterion.
pub trait StoryFilter {
    fn matches(&self, story: &Story) -> bool;
}

/// The three user-facing filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub due_soon: bool,
}

impl FilterParams {
    pub fn has_active_filters(&self) -> bool {
        !self.text.trim().is_empty() || !self.keywords.trim().is_empty() || self.due_soon
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Lookups the keyword filters need to resolve weak references.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub roles: &'a [Role],
    pub labels: &'a [Label],
    pub current_sprint_id: Option<&'a str>,
    pub now: DateTime<Utc>,
}

pub struct NotDeletedFilter;

impl StoryFilter for NotDeletedFilter {
    fn matches(&self, story: &Story) -> bool {
        !story.deleted
    }
}

/// Case-insensitive substring of title or description.
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }
}

impl StoryFilter for TextFilter {
    fn matches(&self, story: &Story) -> bool {
        story.title.to_lowercase().contains(&self.needle)
            || story.description.to_lowercase().contains(&self.needle)
    }
}

/// One `key=values` clause. Unknown keys match everything.
pub struct KeywordFilter<'a> {
    key: String,
    values: Vec<String>,
    ctx: FilterContext<'a>,
}

impl<'a> KeywordFilter<'a> {
    pub fn new(key: impl Into<String>, values: Vec<String>, ctx: FilterContext<'a>) -> Self {
        Self {
            key: key.into(),
            values,
            ctx,
        }
    }

    fn accepts(&self, candidate: &str) -> bool {
        self.values.iter().any(|v| v == candidate)
    }

    fn matches_sprint(&self, story: &Story) -> bool {
        self.values.iter().any(|value| {
            let wanted = if value == "current" {
                self.ctx.current_sprint_id
            } else {
                Some(value.as_str())
            };
            wanted.is_some_and(|id| story.is_in_sprint(id))
        })
    }
}

impl StoryFilter for KeywordFilter<'_> {
    fn matches(&self, story: &Story) -> bool {
        match self.key.as_str() {
            "weight" => self.accepts(&story.weight.to_string()),
            "size" => self.accepts(story.size.as_str()),
            "priority" => self.accepts(story.priority.as_str()),
            "type" => self.accepts(&story.story_type),
            "role" => story
                .role_id
                .as_deref()
                .and_then(|id| self.ctx.roles.iter().find(|r| r.id == id))
                .is_some_and(|role| self.accepts(&role.name.to_lowercase())),
            "label" => story.labels.iter().any(|label_id| {
                self.ctx
                    .labels
                    .iter()
                    .find(|l| &l.id == label_id)
                    .is_some_and(|label| self.accepts(&label.name.to_lowercase()))
            }),
            "sprint" => self.matches_sprint(story),
            _ => true,
        }
    }
}

/// Due date parses and falls no later than `now + 7 days`. Overdue counts.
pub struct DueSoonFilter {
    horizon: DateTime<Utc>,
}

impl DueSoonFilter {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            horizon: now + Duration::days(DUE_SOON_DAYS),
        }
    }
}

impl StoryFilter for DueSoonFilter {
    fn matches(&self, story: &Story) -> bool {
        story.due_at().is_some_and(|due| due <= self.horizon)
    }
}

/// AND of every contained filter. Empty matches all.
pub struct CompositeFilter<'a> {
    filters: Vec<Box<dyn StoryFilter + 'a>>,
}

impl<'a> CompositeFilter<'a> {
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    pub fn with_filter(mut self, filter: Box<dyn StoryFilter + 'a>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Builds the full chain for a set of user inputs.
    pub fn from_params(params: &FilterParams, ctx: FilterContext<'a>) -> Self {
        let mut composite = Self::new().with_filter(Box::new(NotDeletedFilter));

        if !params.text.trim().is_empty() {
            composite = composite.with_filter(Box::new(TextFilter::new(&params.text)));
        }

        let keywords: FilterKeywords = parse_filter_keywords(&params.keywords);
        for (key, values) in keywords {
            composite = composite.with_filter(Box::new(KeywordFilter::new(key, values, ctx)));
        }

        if params.due_soon {
            composite = composite.with_filter(Box::new(DueSoonFilter::new(ctx.now)));
        }

        composite
    }
}

impl Default for CompositeFilter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryFilter for CompositeFilter<'_> {
    fn matches(&self, story: &Story) -> bool {
        self.filters.iter().all(|f| f.matches(story))
    }
}

/// Non-deleted stories passing every active filter, in input order.
pub fn filter_stories<'s>(
    stories: &'s [Story],
    params: &FilterParams,
    ctx: FilterContext<'_>,
) -> Vec<&'s Story> {
    let filter = CompositeFilter::from_params(params, ctx);
    stories.iter().filter(|s| filter.matches(s)).collect()
}
