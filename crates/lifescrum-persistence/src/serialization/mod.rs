pub mod json_serializer;

pub use json_serializer::{load_slot, save_slot, JsonSerializer};
