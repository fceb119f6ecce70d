pub mod events;
pub mod import;
pub mod preferences;
pub mod slots;
pub mod store;
pub mod views;

pub use events::StoreEvent;
pub use import::{merge_stories, ConflictResolver, ImportMode, ImportSummary, LastWriteWinsResolver};
pub use preferences::{Preferences, RoadmapPosition, Section, ViewType};
pub use slots::Slot;
pub use store::Store;
pub use views::ColumnView;
