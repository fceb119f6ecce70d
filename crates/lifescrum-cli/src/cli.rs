use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifescrum")]
#[command(about = "A personal life scrum planner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the planner data (or set LIFESCRUM_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR", env = "LIFESCRUM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Story operations
    Story(StoryCommand),
    /// Kanban board for the current sprint
    Board(BoardCommand),
    /// Weekly sprint operations
    Sprint(SprintCommand),
    /// Role operations
    Role(RoleCommand),
    /// Label operations
    Label(LabelCommand),
    /// Vision operations
    Vision(VisionCommand),
    /// Persisted story filter
    Filter(FilterCommand),
    /// Suggest stories for the available focus and time
    Plan(PlanArgs),
    /// View and layout preferences
    Prefs(PrefsCommand),
    /// Export a backup
    Export(ExportArgs),
    /// Import a backup
    Import(ImportArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Story commands
#[derive(Args)]
pub struct StoryCommand {
    #[command(subcommand)]
    pub action: StoryAction,
}

#[derive(Subcommand)]
pub enum StoryAction {
    /// Create a story
    Add(StoryAddArgs),
    /// List stories through the persisted filter
    List(StoryListArgs),
    /// Get a specific story
    Get {
        #[arg(long)]
        id: String,
    },
    /// Update a story
    Update(StoryUpdateArgs),
    /// Soft-delete a story
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Restore a deleted story
    Restore {
        #[arg(long)]
        id: String,
    },
    /// Move a story to another column
    Move {
        #[arg(long)]
        id: String,
        /// Destination column id or name
        #[arg(long)]
        column: String,
        #[arg(long)]
        position: Option<usize>,
    },
}

#[derive(Args)]
pub struct StoryAddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub weight: Option<String>,
    #[arg(long)]
    pub size: Option<String>,
    #[arg(long = "type")]
    pub story_type: Option<String>,
    /// Role id or name
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub vision: Option<String>,
    /// Label ids or names
    #[arg(long, value_delimiter = ',')]
    pub labels: Vec<String>,
    #[arg(long)]
    pub due_date: Option<String>,
    #[arg(long)]
    pub scheduled: Option<String>,
    /// Checklist item text, repeatable
    #[arg(long = "check")]
    pub checklist: Vec<String>,
    /// Sprint id (defaults to the current sprint)
    #[arg(long, conflicts_with = "no_sprint")]
    pub sprint: Option<String>,
    /// Keep the story out of every sprint
    #[arg(long)]
    pub no_sprint: bool,
    /// Column id or name (defaults to Icebox)
    #[arg(long)]
    pub column: Option<String>,
    /// Create one copy per remaining sprint
    #[arg(long, conflicts_with = "no_sprint")]
    pub repeat: bool,
    /// Last date a repeated copy may start on (YYYY-MM-DD)
    #[arg(long, requires = "repeat")]
    pub until: Option<String>,
}

#[derive(Args)]
pub struct StoryListArgs {
    /// Every live story, ignoring the filter
    #[arg(long)]
    pub all: bool,
    /// Deleted stories only
    #[arg(long, conflicts_with = "all")]
    pub deleted: bool,
    /// Override the filter text for this listing
    #[arg(long)]
    pub text: Option<String>,
    /// Override the filter keywords for this listing
    #[arg(long)]
    pub keywords: Option<String>,
    /// Only stories due within a week
    #[arg(long)]
    pub due_soon: bool,
}

#[derive(Args)]
pub struct StoryUpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub weight: Option<String>,
    #[arg(long)]
    pub size: Option<String>,
    #[arg(long = "type")]
    pub story_type: Option<String>,
    #[arg(long, conflicts_with = "clear_role")]
    pub role: Option<String>,
    #[arg(long)]
    pub clear_role: bool,
    #[arg(long, conflicts_with = "clear_vision")]
    pub vision: Option<String>,
    #[arg(long)]
    pub clear_vision: bool,
    #[arg(long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,
    #[arg(long, conflicts_with = "clear_due_date")]
    pub due_date: Option<String>,
    #[arg(long)]
    pub clear_due_date: bool,
    #[arg(long, conflicts_with = "clear_sprint")]
    pub sprint: Option<String>,
    #[arg(long)]
    pub clear_sprint: bool,
    #[arg(long, conflicts_with = "clear_scheduled")]
    pub scheduled: Option<String>,
    #[arg(long)]
    pub clear_scheduled: bool,
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Columns with the current sprint's stories
    Show,
    /// List board definitions
    List,
}

// Sprint commands
#[derive(Args)]
pub struct SprintCommand {
    #[command(subcommand)]
    pub action: SprintAction,
}

#[derive(Subcommand)]
pub enum SprintAction {
    /// List the sprint window
    List,
    /// Show the current sprint
    Current,
    /// Select a sprint, or follow the calendar week again with --clear
    Select {
        #[arg(long, required_unless_present = "clear")]
        id: Option<String>,
        #[arg(long, conflicts_with = "id")]
        clear: bool,
    },
}

// Role commands
#[derive(Args)]
pub struct RoleCommand {
    #[command(subcommand)]
    pub action: RoleAction,
}

#[derive(Subcommand)]
pub enum RoleAction {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    List,
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
}

// Label commands
#[derive(Args)]
pub struct LabelCommand {
    #[command(subcommand)]
    pub action: LabelAction,
}

#[derive(Subcommand)]
pub enum LabelAction {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    List,
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
}

// Vision commands
#[derive(Args)]
pub struct VisionCommand {
    #[command(subcommand)]
    pub action: VisionAction,
}

#[derive(Subcommand)]
pub enum VisionAction {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type")]
        vision_type: Option<String>,
        #[arg(long)]
        order: Option<i64>,
    },
    /// List visions by rank
    List,
    Update(VisionUpdateArgs),
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Rank visions in the given order
    Reorder {
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args)]
pub struct VisionUpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long = "type")]
    pub vision_type: Option<String>,
    #[arg(long)]
    pub order: Option<i64>,
}

// Filter commands
#[derive(Args)]
pub struct FilterCommand {
    #[command(subcommand)]
    pub action: FilterAction,
}

#[derive(Subcommand)]
pub enum FilterAction {
    /// Change parts of the filter; unset flags keep their value
    Set {
        #[arg(long)]
        text: Option<String>,
        /// e.g. "weight=3,5 priority=Q1"
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long)]
        due_soon: Option<bool>,
    },
    Clear,
    Show,
}

#[derive(Args)]
pub struct PlanArgs {
    /// low, moderate or high
    #[arg(long, default_value = "moderate")]
    pub level: String,
    /// XS, S, M, L or XL
    #[arg(long, default_value = "M")]
    pub size: String,
}

// Preference commands
#[derive(Args)]
pub struct PrefsCommand {
    #[command(subcommand)]
    pub action: PrefsAction,
}

#[derive(Subcommand)]
pub enum PrefsAction {
    Show,
    /// Set the current view
    View {
        #[arg(long)]
        name: String,
    },
    /// Collapse or expand a section
    Section {
        /// chart, board, roadmap, burndown or burnup
        #[arg(long)]
        name: String,
        #[arg(long, action = clap::ArgAction::Set)]
        collapsed: bool,
    },
    Layout {
        #[arg(long)]
        chart_above_board: Option<bool>,
        #[arg(long)]
        roadmap_position: Option<String>,
    },
}

// Export/Import commands
#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(long)]
    pub file: PathBuf,
    /// overwrite or merge
    #[arg(long, default_value = "overwrite")]
    pub mode: String,
}
