//! UI preferences that persist between sessions.

use lifescrum_core::ScrumError;
use lifescrum_domain::{FilterParams, SprintId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::slots::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewType {
    #[default]
    Sprint,
    StoryBoards,
    Importance,
    Planner,
    SprintPlanning,
    Settings,
}

impl ViewType {
    pub const ALL: [ViewType; 6] = [
        ViewType::Sprint,
        ViewType::StoryBoards,
        ViewType::Importance,
        ViewType::Planner,
        ViewType::SprintPlanning,
        ViewType::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Sprint => "sprint",
            ViewType::StoryBoards => "story-boards",
            ViewType::Importance => "importance",
            ViewType::Planner => "planner",
            ViewType::SprintPlanning => "sprint-planning",
            ViewType::Settings => "settings",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = ScrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewType::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| ScrumError::Validation(format!("Unknown view '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapPosition {
    Top,
    Middle,
    #[default]
    Bottom,
}

impl FromStr for RoadmapPosition {
    type Err = ScrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(RoadmapPosition::Top),
            "middle" => Ok(RoadmapPosition::Middle),
            "bottom" => Ok(RoadmapPosition::Bottom),
            _ => Err(ScrumError::Validation(format!(
                "Invalid roadmap position '{}'. Valid values: top, middle, bottom",
                s
            ))),
        }
    }
}

/// Collapsible page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Chart,
    Board,
    Roadmap,
    Burndown,
    Burnup,
}

impl Section {
    pub fn slot(&self) -> Slot {
        match self {
            Section::Chart => Slot::ChartCollapsed,
            Section::Board => Slot::BoardCollapsed,
            Section::Roadmap => Slot::RoadmapCollapsed,
            Section::Burndown => Slot::BurndownCollapsed,
            Section::Burnup => Slot::BurnupCollapsed,
        }
    }
}

impl FromStr for Section {
    type Err = ScrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chart" => Ok(Section::Chart),
            "board" => Ok(Section::Board),
            "roadmap" => Ok(Section::Roadmap),
            "burndown" => Ok(Section::Burndown),
            "burnup" => Ok(Section::Burnup),
            _ => Err(ScrumError::Validation(format!(
                "Invalid section '{}'. Valid values: chart, board, roadmap, burndown, burnup",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// `None` follows the calendar week.
    pub selected_sprint_id: Option<SprintId>,
    pub current_view: ViewType,
    pub filter: FilterParams,
    pub chart_collapsed: bool,
    pub board_collapsed: bool,
    pub roadmap_collapsed: bool,
    pub chart_above_board: bool,
    pub roadmap_position: RoadmapPosition,
    pub burndown_collapsed: bool,
    pub burnup_collapsed: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            selected_sprint_id: None,
            current_view: ViewType::default(),
            filter: FilterParams::default(),
            chart_collapsed: false,
            board_collapsed: false,
            roadmap_collapsed: true,
            chart_above_board: false,
            roadmap_position: RoadmapPosition::default(),
            burndown_collapsed: false,
            burnup_collapsed: false,
        }
    }
}

impl Preferences {
    pub fn is_collapsed(&self, section: Section) -> bool {
        match section {
            Section::Chart => self.chart_collapsed,
            Section::Board => self.board_collapsed,
            Section::Roadmap => self.roadmap_collapsed,
            Section::Burndown => self.burndown_collapsed,
            Section::Burnup => self.burnup_collapsed,
        }
    }

    pub(crate) fn set_collapsed(&mut self, section: Section, collapsed: bool) {
        let flag = match section {
            Section::Chart => &mut self.chart_collapsed,
            Section::Board => &mut self.board_collapsed,
            Section::Roadmap => &mut self.roadmap_collapsed,
            Section::Burndown => &mut self.burndown_collapsed,
            Section::Burnup => &mut self.burnup_collapsed,
        };
        *flag = collapsed;
    }
}
