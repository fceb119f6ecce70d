use lifescrum_core::ScrumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::story::{Size, Story, Weight};

/// How much focus is available right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrainLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl BrainLevel {
    pub fn accepted_weights(&self) -> &'static [Weight] {
        match self {
            BrainLevel::Low => &[Weight::One, Weight::Three],
            BrainLevel::Moderate => &[Weight::Five, Weight::Eight],
            BrainLevel::High => &[Weight::Eight, Weight::Thirteen, Weight::TwentyOne],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrainLevel::Low => "low",
            BrainLevel::Moderate => "moderate",
            BrainLevel::High => "high",
        }
    }
}

impl fmt::Display for BrainLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrainLevel {
    type Err = ScrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(BrainLevel::Low),
            "moderate" => Ok(BrainLevel::Moderate),
            "high" => Ok(BrainLevel::High),
            _ => Err(ScrumError::Validation(format!(
                "Invalid brain level '{}'. Valid values: low, moderate, high",
                s
            ))),
        }
    }
}

/// Live stories that fit the brain level and time bucket, most urgent first
/// and heaviest first within a quadrant.
pub fn plan_stories(stories: &[Story], level: BrainLevel, size: Size) -> Vec<&Story> {
    let weights = level.accepted_weights();
    let mut planned: Vec<&Story> = stories
        .iter()
        .filter(|s| !s.deleted)
        .filter(|s| weights.contains(&s.weight))
        .filter(|s| s.size == size)
        .collect();
    planned.sort_by(|a, b| {
        a.priority
            .order()
            .cmp(&b.priority.order())
            .then_with(|| b.weight.cmp(&a.weight))
    });
    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{Priority, StoryDraft};

    fn story(title: &str, priority: Priority, weight: Weight, size: Size) -> Story {
        Story::new(StoryDraft {
            priority: Some(priority),
            weight: Some(weight),
            size: Some(size),
            ..StoryDraft::new(title)
        })
    }

    #[test]
    fn test_plan_filters_and_sorts() {
        let mut deleted = story("deleted", Priority::Q1, Weight::Eight, Size::M);
        deleted.deleted = true;
        let stories = vec![
            story("q2-heavy", Priority::Q2, Weight::Eight, Size::M),
            story("q1-light", Priority::Q1, Weight::Five, Size::M),
            story("q2-light", Priority::Q2, Weight::Five, Size::M),
            story("wrong-size", Priority::Q1, Weight::Five, Size::L),
            story("wrong-weight", Priority::Q1, Weight::One, Size::M),
            deleted,
        ];

        let planned = plan_stories(&stories, BrainLevel::Moderate, Size::M);
        let titles: Vec<&str> = planned.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["q1-light", "q2-heavy", "q2-light"]);
    }

    #[test]
    fn test_eight_fits_two_levels() {
        assert!(BrainLevel::Moderate.accepted_weights().contains(&Weight::Eight));
        assert!(BrainLevel::High.accepted_weights().contains(&Weight::Eight));
        assert!(!BrainLevel::Low.accepted_weights().contains(&Weight::Eight));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("HIGH".parse::<BrainLevel>().unwrap(), BrainLevel::High);
        assert!("tired".parse::<BrainLevel>().is_err());
    }
}
