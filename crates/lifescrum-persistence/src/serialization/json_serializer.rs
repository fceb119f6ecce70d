use crate::traits::{KeyValueStore, Serializer};
use lifescrum_core::{ScrumError, ScrumResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON serializer for slot values
pub struct JsonSerializer;

impl<T: Serialize + DeserializeOwned> Serializer<T> for JsonSerializer {
    fn serialize(&self, data: &T) -> ScrumResult<String> {
        serde_json::to_string(data).map_err(|e| ScrumError::Serialization(e.to_string()))
    }

    fn deserialize(&self, raw: &str) -> ScrumResult<T> {
        serde_json::from_str(raw).map_err(|e| ScrumError::Serialization(e.to_string()))
    }
}

/// Reads and decodes a slot.
///
/// Missing slots, unreadable slots and slots holding malformed JSON all come
/// back as `None`; the latter two are logged so a repaired slot leaves a trace.
pub fn load_slot<T: Serialize + DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read slot {}: {}", key, e);
            return None;
        }
    };

    match Serializer::<T>::deserialize(&JsonSerializer, &raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Slot {} is corrupt, falling back to default: {}", key, e);
            None
        }
    }
}

/// Encodes and writes a slot.
pub fn save_slot<T: Serialize + DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> ScrumResult<()> {
    let raw = Serializer::<T>::serialize(&JsonSerializer, value)?;
    store.set(key, &raw)
}
