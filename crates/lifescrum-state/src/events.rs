use crate::import::ImportSummary;
use crate::slots::Slot;

/// Broadcast to subscribers after the store changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// One slot was rewritten.
    Changed(Slot),
    /// An import finished; the per-slot `Changed` events precede it.
    Imported(ImportSummary),
}

impl StoreEvent {
    pub fn slot(&self) -> Option<Slot> {
        match self {
            StoreEvent::Changed(slot) => Some(*slot),
            StoreEvent::Imported(_) => None,
        }
    }
}
