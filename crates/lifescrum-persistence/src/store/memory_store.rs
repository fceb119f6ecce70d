use crate::traits::KeyValueStore;
use lifescrum_core::ScrumResult;
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// In-process store. Nothing survives the process; used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, handy for seeding fixtures.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ScrumResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ScrumResult<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ScrumResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> ScrumResult<Vec<String>> {
        Ok(self.entries.lock().keys().cloned().collect())
    }
}
