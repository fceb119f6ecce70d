use lifescrum_core::ScrumResult;

/// String-keyed storage with one value per slot.
/// Implementations handle the backend (memory, a directory of files, ...).
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the slot has never been written.
    fn get(&self, key: &str) -> ScrumResult<Option<String>>;

    /// Replace the slot's value
    fn set(&self, key: &str, value: &str) -> ScrumResult<()>;

    /// Removing a missing slot is not an error
    fn remove(&self, key: &str) -> ScrumResult<()>;

    /// All written slot keys, sorted
    fn keys(&self) -> ScrumResult<Vec<String>>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> ScrumResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> ScrumResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> ScrumResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> ScrumResult<Vec<String>> {
        (**self).keys()
    }
}

/// Trait for serialization strategies used on slot values
pub trait Serializer<T>: Send + Sync {
    fn serialize(&self, data: &T) -> ScrumResult<String>;

    fn deserialize(&self, raw: &str) -> ScrumResult<T>;
}
