//! Story filtering.
//!
//! A free-text search, a `key=value,...` keyword language and a due-soon
//! toggle, combined with AND logic over non-deleted stories.

pub mod keywords;
pub mod story_filter;

pub use keywords::{parse_filter_keywords, FilterKeywords};
pub use story_filter::{
    filter_stories, CompositeFilter, DueSoonFilter, FilterContext, FilterParams, KeywordFilter,
    NotDeletedFilter, StoryFilter, TextFilter, DUE_SOON_DAYS,
};
