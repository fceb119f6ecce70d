use std::fmt;

/// Every key the store reads or writes.
///
/// The key strings match the ones the planner has always used, so a data
/// directory can be seeded from an exported browser profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Stories,
    Sprints,
    Roles,
    Labels,
    Visions,
    Columns,
    Boards,
    Settings,
    SelectedSprint,
    CurrentView,
    FilterText,
    FilterKeywords,
    FilterDueSoon,
    ChartCollapsed,
    BoardCollapsed,
    RoadmapCollapsed,
    ChartAboveBoard,
    RoadmapPosition,
    BurndownCollapsed,
    BurnupCollapsed,
}

impl Slot {
    pub const ALL: [Slot; 20] = [
        Slot::Stories,
        Slot::Sprints,
        Slot::Roles,
        Slot::Labels,
        Slot::Visions,
        Slot::Columns,
        Slot::Boards,
        Slot::Settings,
        Slot::SelectedSprint,
        Slot::CurrentView,
        Slot::FilterText,
        Slot::FilterKeywords,
        Slot::FilterDueSoon,
        Slot::ChartCollapsed,
        Slot::BoardCollapsed,
        Slot::RoadmapCollapsed,
        Slot::ChartAboveBoard,
        Slot::RoadmapPosition,
        Slot::BurndownCollapsed,
        Slot::BurnupCollapsed,
    ];

    /// Slots written by a full import.
    pub const COLLECTIONS: [Slot; 8] = [
        Slot::Stories,
        Slot::Sprints,
        Slot::Roles,
        Slot::Labels,
        Slot::Visions,
        Slot::Columns,
        Slot::Boards,
        Slot::Settings,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Slot::Stories => "life-scrum-stories",
            Slot::Sprints => "life-scrum-sprints",
            Slot::Roles => "life-scrum-roles",
            Slot::Labels => "life-scrum-labels",
            Slot::Visions => "life-scrum-visions",
            Slot::Columns => "life-scrum-columns",
            Slot::Boards => "life-scrum-boards",
            Slot::Settings => "life-scrum-settings",
            Slot::SelectedSprint => "life-scrum-selected-sprint",
            Slot::CurrentView => "life-scrum-current-view",
            Slot::FilterText => "life-scrum-filter-text",
            Slot::FilterKeywords => "life-scrum-filter-keywords",
            Slot::FilterDueSoon => "life-scrum-filter-due-soon",
            Slot::ChartCollapsed => "life-scrum-chart-collapsed",
            Slot::BoardCollapsed => "life-scrum-board-collapsed",
            Slot::RoadmapCollapsed => "life-scrum-roadmap-collapsed",
            Slot::ChartAboveBoard => "life-scrum-chart-above-board",
            Slot::RoadmapPosition => "life-scrum-roadmap-position",
            Slot::BurndownCollapsed => "life-scrum-burndown-collapsed",
            Slot::BurnupCollapsed => "life-scrum-burnup-collapsed",
        }
    }

    pub fn from_key(key: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
